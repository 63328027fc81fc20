//! Cache-side queries and statistics.

use crate::model::Memory;
use std::collections::BTreeSet;

/// Aggregate statistics over the loaded gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryStats {
    /// Total number of memories.
    pub total: usize,
    /// Memories carrying a non-empty audio URL.
    pub with_audio: usize,
    /// Memories without audio.
    pub without_audio: usize,
    /// Distinct years present, newest first.
    pub years: Vec<i32>,
}

/// Case-insensitive substring match against name or message.
///
/// An empty or whitespace-only query returns the full set unfiltered.
pub fn search(memories: &[Memory], query: &str) -> Vec<Memory> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return memories.to_vec();
    }
    memories
        .iter()
        .filter(|memory| {
            memory.name.to_lowercase().contains(&query)
                || memory.message.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Memories whose creation date falls in the given calendar year.
///
/// Records with unparseable dates never match.
pub fn filter_by_year(memories: &[Memory], year: i32) -> Vec<Memory> {
    memories
        .iter()
        .filter(|memory| memory.year() == Some(year))
        .cloned()
        .collect()
}

/// Compute gallery statistics.
pub fn stats(memories: &[Memory]) -> GalleryStats {
    let total = memories.len();
    let with_audio = memories.iter().filter(|memory| memory.has_audio()).count();
    let years: BTreeSet<i32> = memories.iter().filter_map(Memory::year).collect();
    GalleryStats {
        total,
        with_audio,
        without_audio: total - with_audio,
        years: years.into_iter().rev().collect(),
    }
}

//! Shared test doubles for Recuerdo crates.

mod storage;

pub use storage::FaultyStorage;

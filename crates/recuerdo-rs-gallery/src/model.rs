//! Memory record model and form-level validation.

use crate::error::{FieldError, GalleryError, ValidationErrors};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use recuerdo_rs_config::LimitsConfig;
use serde::{Deserialize, Serialize};

/// A single memorial record.
///
/// Field names on the wire are camelCase; that format is fixed by
/// previously stored data. `date` stays a string because stored records
/// may carry bare dates like `2024-01-01`; it is parsed leniently only
/// for sorting and year extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// Record identifier, unique across the active set.
    pub id: String,
    /// Who the memory is from or about.
    pub name: String,
    /// Message, dedication, or remembrance text.
    pub message: String,
    /// Photo URL, falling back to the gallery placeholder when blank.
    pub photo_url: String,
    /// Optional voice message or music URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// ISO-8601 creation timestamp. Never mutated after creation.
    pub date: String,
}

impl Memory {
    /// Parse the creation date leniently.
    ///
    /// Tries RFC 3339 first, then a naive datetime, then a bare date.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
        None
    }

    /// Calendar year of the creation date, if it parses.
    pub fn year(&self) -> Option<i32> {
        self.parsed_date().map(|date| date.year())
    }

    /// Whether the record carries a non-empty audio URL.
    pub fn has_audio(&self) -> bool {
        self.audio_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Trim fields and apply the placeholder photo fallback.
    pub fn sanitized(self, placeholder_photo_url: &str) -> Memory {
        let photo_url = self.photo_url.trim();
        let photo_url = if photo_url.is_empty() {
            placeholder_photo_url.to_string()
        } else {
            photo_url.to_string()
        };
        let audio_url = self
            .audio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        Memory {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            message: self.message.trim().to_string(),
            photo_url,
            audio_url,
            date: self.date,
        }
    }
}

/// User-submitted form input before promotion to a full record.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraft {
    pub name: String,
    pub message: String,
    pub photo_url: String,
    pub audio_url: Option<String>,
}

impl MemoryDraft {
    /// Check the draft against the form rules, reporting per-field errors.
    pub fn validate(&self, limits: &LimitsConfig) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "required"));
        }
        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError::new("message", "required"));
        } else if message.chars().count() > limits.max_message_chars {
            errors.push(FieldError::new(
                "message",
                format!("must be at most {} characters", limits.max_message_chars),
            ));
        }
        let photo_url = self.photo_url.trim();
        if !photo_url.is_empty() && !is_valid_url(photo_url) {
            errors.push(FieldError::new("photo_url", "must be an absolute URL"));
        }
        if let Some(audio_url) = self.audio_url.as_deref() {
            let audio_url = audio_url.trim();
            if !audio_url.is_empty() && !is_valid_url(audio_url) {
                errors.push(FieldError::new("audio_url", "must be an absolute URL"));
            }
        }
        errors
    }

    /// Promote a valid draft to a full record with a fresh id and timestamp.
    pub fn promote(self, limits: &LimitsConfig) -> Result<Memory, GalleryError> {
        let errors = self.validate(limits);
        if !errors.is_empty() {
            return Err(GalleryError::Validation(ValidationErrors(errors)));
        }
        let memory = Memory {
            id: generate_memory_id(),
            name: self.name,
            message: self.message,
            photo_url: self.photo_url,
            audio_url: self.audio_url,
            date: Utc::now().to_rfc3339(),
        };
        Ok(memory.sanitized(&limits.placeholder_photo_url))
    }
}

/// Generate a unique memory id: unix millis plus a random base36 suffix.
pub fn generate_memory_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("mem_{}_{suffix}", Utc::now().timestamp_millis())
}

/// Whether a string parses as an absolute URL. No scheme restriction.
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{Memory, MemoryDraft, generate_memory_id, is_valid_url};
    use pretty_assertions::assert_eq;
    use recuerdo_rs_config::{DEFAULT_PHOTO_URL, LimitsConfig};

    fn memory(date: &str) -> Memory {
        Memory {
            id: "mem_1".to_string(),
            name: "Ana".to_string(),
            message: "Te recuerdo".to_string(),
            photo_url: String::new(),
            audio_url: None,
            date: date.to_string(),
        }
    }

    #[test]
    fn dates_parse_leniently() {
        assert!(memory("2024-11-01T00:00:00Z").parsed_date().is_some());
        assert!(memory("2024-11-01T12:30:00").parsed_date().is_some());
        assert!(memory("2024-01-01").parsed_date().is_some());
        assert!(memory("not a date").parsed_date().is_none());
        assert_eq!(memory("2024-01-01").year(), Some(2024));
        assert_eq!(memory("garbage").year(), None);
    }

    #[test]
    fn sanitize_trims_and_applies_placeholder() {
        let raw = Memory {
            id: " mem_1 ".to_string(),
            name: " Ana ".to_string(),
            message: " Te recuerdo ".to_string(),
            photo_url: "  ".to_string(),
            audio_url: Some("   ".to_string()),
            date: "2024-11-01T00:00:00Z".to_string(),
        };
        let clean = raw.sanitized(DEFAULT_PHOTO_URL);
        assert_eq!(clean.id, "mem_1");
        assert_eq!(clean.name, "Ana");
        assert_eq!(clean.message, "Te recuerdo");
        assert_eq!(clean.photo_url, DEFAULT_PHOTO_URL);
        assert_eq!(clean.audio_url, None);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let mut record = memory("2024-11-01T00:00:00Z");
        record.photo_url = "https://example.com/ana.jpg".to_string();
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"photoUrl\""));
        assert!(!json.contains("\"audioUrl\""));

        record.audio_url = Some("https://example.com/ana.mp3".to_string());
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"audioUrl\""));

        let round_tripped: Memory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round_tripped, record);
    }

    #[test]
    fn structural_validation_rejects_bad_shapes() {
        // Missing required field.
        assert!(serde_json::from_str::<Memory>(r#"{"id":"b"}"#).is_err());
        // Wrong field type.
        assert!(
            serde_json::from_str::<Memory>(
                r#"{"id":"a","name":1,"message":"m","photoUrl":"p","date":"2024-01-01"}"#
            )
            .is_err()
        );
        // Extra fields are tolerated, audioUrl may be absent.
        let record: Memory = serde_json::from_str(
            r#"{"id":"a","name":"X","message":"Y","photoUrl":"z","date":"2024-01-01","extra":true}"#,
        )
        .expect("deserialize");
        assert_eq!(record.audio_url, None);
    }

    #[test]
    fn draft_validation_reports_per_field_errors() {
        let limits = LimitsConfig::default();
        let draft = MemoryDraft {
            name: "  ".to_string(),
            message: "x".repeat(limits.max_message_chars + 1),
            photo_url: "not a url".to_string(),
            audio_url: Some("also not a url".to_string()),
        };
        let errors = draft.validate(&limits);
        let fields: Vec<&str> = errors.iter().map(|error| error.field).collect();
        assert_eq!(fields, vec!["name", "message", "photo_url", "audio_url"]);

        let draft = MemoryDraft {
            name: "Ana".to_string(),
            message: "Te recuerdo".to_string(),
            photo_url: String::new(),
            audio_url: None,
        };
        assert!(draft.validate(&limits).is_empty());
    }

    #[test]
    fn promote_assigns_id_and_timestamp() {
        let limits = LimitsConfig::default();
        let memory = MemoryDraft {
            name: "Ana".to_string(),
            message: "Te recuerdo".to_string(),
            photo_url: String::new(),
            audio_url: None,
        }
        .promote(&limits)
        .expect("promote");
        assert!(memory.id.starts_with("mem_"));
        assert_eq!(memory.photo_url, limits.placeholder_photo_url);
        assert!(memory.parsed_date().is_some());
    }

    #[test]
    fn generated_ids_have_the_expected_shape() {
        let id = generate_memory_id();
        let mut parts = id.splitn(3, '_');
        assert_eq!(parts.next(), Some("mem"));
        assert!(parts.next().expect("millis").parse::<i64>().is_ok());
        assert_eq!(parts.next().expect("suffix").len(), 9);
    }

    #[test]
    fn url_validation_requires_absolute_urls() {
        assert!(is_valid_url("https://example.com/a.jpg"));
        assert!(is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("/relative/path"));
    }
}

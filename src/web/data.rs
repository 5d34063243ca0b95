use serde_json::Value;
use strum_macros::AsRefStr;

// ###################################
// ->   STRUCTS
// ###################################

/// Keys every submission must carry. Only presence is checked, never the
/// value: an empty string or a number still counts, it gets forwarded as-is.
pub const REQUIRED_KEYS: [&str; 5] = ["firstname", "email", "zipcode", "birthday", "segment"];

/// Which of the two configured mailing lists a submitter lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Segment {
    #[strum(serialize = "covered")]
    Covered,
    #[strum(serialize = "not-covered")]
    NotCovered,
}

// ###################################
// ->   IMPLS
// ###################################

/// True iff `data` is a JSON object containing every required key.
/// `null`, arrays and scalars never validate.
pub fn has_required_keys(data: &Value, required_keys: &[&str]) -> bool {
    match data.as_object() {
        Some(map) => required_keys.iter().all(|key| map.contains_key(*key)),
        None => false,
    }
}

impl Segment {
    /// Only the exact strings "covered" and "not-covered" parse; anything
    /// else, non-strings included, is rejected.
    pub fn parse(value: &Value) -> Result<Self, DataParsingError> {
        match value.as_str() {
            Some("covered") => Ok(Segment::Covered),
            Some("not-covered") => Ok(Segment::NotCovered),
            _ => Err(DataParsingError::InvalidSegment),
        }
    }
}

// ###################################
// ->   ERROR
// ###################################

#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("request body is missing one or more required keys")]
    MissingRequiredKeys,
    #[error("segment is neither 'covered' nor 'not-covered'")]
    InvalidSegment,
}

// ###################################
// ->   TESTS
// ###################################

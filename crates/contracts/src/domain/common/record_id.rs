use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identificador de registro asignado por el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Anything the list controller can locate by identity (upsert/remove).
pub trait HasRecordId {
    fn record_id(&self) -> RecordId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints() {
        assert_eq!(RecordId::from_string(" 42 "), Ok(RecordId(42)));
        assert_eq!(RecordId(7).to_string(), "7");
        assert!(RecordId::from_string("abc").is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&RecordId(12)).unwrap();
        assert_eq!(json, "12");
        let back: RecordId = serde_json::from_str("12").unwrap();
        assert_eq!(back, RecordId(12));
    }
}

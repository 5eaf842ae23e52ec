//! Key-value records for episode statistics and evaluation results.
use crate::error::StrideError;
use chrono::prelude::{DateTime, Local};
use std::collections::HashMap;

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value, typically a metric.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Merges two records, consuming both.
    ///
    /// On key collision the value of `record` wins.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, StrideError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::Scalar(v) => Ok(*v),
                _ => Err(StrideError::RecordValueTypeError("Scalar".to_string())),
            }
        } else {
            Err(StrideError::RecordKeyError(k.to_string()))
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, StrideError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::String(s) => Ok(s.clone()),
                _ => Err(StrideError::RecordValueTypeError("String".to_string())),
            }
        } else {
            Err(StrideError::RecordKeyError(k.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};
    use crate::error::StrideError;

    #[test]
    fn scalar_roundtrip_and_missing_key() {
        let mut record = Record::from_scalar("r", 1.5);
        record.insert("env", RecordValue::String("BipedalWalker-v3".into()));
        record.insert("at", RecordValue::DateTime(chrono::Local::now()));

        assert_eq!(record.get_scalar("r").unwrap(), 1.5);
        assert_eq!(record.get_string("env").unwrap(), "BipedalWalker-v3");
        assert!(matches!(
            record.get_scalar("missing"),
            Err(StrideError::RecordKeyError(_))
        ));
        assert!(matches!(
            record.get_scalar("env"),
            Err(StrideError::RecordValueTypeError(_))
        ));
    }

    #[test]
    fn merge_prefers_right_hand_side() {
        let a = Record::from_scalar("r", 1.0);
        let b = Record::from_scalar("r", 2.0);
        let merged = a.merge(b);
        assert_eq!(merged.get_scalar("r").unwrap(), 2.0);
    }
}

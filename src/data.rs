//! Row-oriented data model for series input.
//!
//! A series consumes one [`Datum`] per category instance. Each datum is an
//! opaque field-name to [`Value`] mapping; the series only ever looks fields
//! up by name, it never enumerates them.

use std::fmt;

/// A single field value inside a [`Datum`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A text value.
    Str(String),
    /// A numeric value.
    Num(f32),
    /// A missing value.
    Null,
}

impl Value {
    /// Get as a string slice, or `None` if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coerce to a finite number.
    ///
    /// Numbers pass through, numeric text parses, everything else (including
    /// NaN) is `None`.
    #[must_use]
    pub fn as_num(&self) -> Option<f32> {
        let n = match self {
            Value::Num(n) => *n,
            Value::Str(s) => s.trim().parse::<f32>().ok()?,
            Value::Null => return None,
        };
        (!n.is_nan()).then_some(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Num(n) => write!(f, "{n}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Num(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v as f32)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Num(v as f32)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// One row of tabular input: a field-name to value mapping.
///
/// Field order is preserved but not significant; lookups are by name.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Datum {
    fields: Vec<(String, Value)>,
}

impl Datum {
    /// Create an empty datum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert a field, replacing any existing value under the same name.
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Number of fields on this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_coercion() {
        assert_eq!(Value::Num(5.0).as_num(), Some(5.0));
        assert_eq!(Value::Str("5".into()).as_num(), Some(5.0));
        assert_eq!(Value::Str(" -2.5 ".into()).as_num(), Some(-2.5));
        assert_eq!(Value::Str("five".into()).as_num(), None);
        assert_eq!(Value::Num(f32::NAN).as_num(), None);
        assert_eq!(Value::Null.as_num(), None);
    }

    #[test]
    fn test_value_as_str() {
        assert_eq!(Value::Str("Jan".into()).as_str(), Some("Jan"));
        assert_eq!(Value::Num(1.0).as_str(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Str("Jan".into()).to_string(), "\"Jan\"");
        assert_eq!(Value::Num(3.0).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_datum_builder() {
        let row = Datum::new().with("month", "Jan").with("revenue", 5.0);
        assert_eq!(row.get("month"), Some(&Value::Str("Jan".into())));
        assert_eq!(row.get("revenue"), Some(&Value::Num(5.0)));
        assert_eq!(row.get("absent"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_datum_insert_replaces() {
        let mut row = Datum::new().with("a", 1.0);
        row.insert("a", 2.0);
        assert_eq!(row.get("a"), Some(&Value::Num(2.0)));
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_datum_empty() {
        assert!(Datum::new().is_empty());
    }
}

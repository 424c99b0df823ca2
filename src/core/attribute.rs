//! Typed key/value attributes attached to log records
//!
//! This module provides:
//! - `AttrValue`: the value kinds an attribute can carry
//! - `Attr`: an immutable key/value pair, possibly a nested group

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Value type for structured attributes
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<FixedOffset>),
    /// Ordered members of a nested group
    Group(Vec<Attr>),
    /// Arbitrary structured value
    Any(serde_json::Value),
}

impl AttrValue {
    /// Build a value from anything serializable.
    ///
    /// Serialization failures do not fail the log call: the value is kept
    /// as its `Debug` string instead.
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(json) => AttrValue::Any(json),
            Err(_) => AttrValue::String(format!("{:?}", value)),
        }
    }

    /// Build a string value from anything printable
    pub fn display(value: impl fmt::Display) -> Self {
        AttrValue::String(value.to_string())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, AttrValue::Group(_))
    }

    /// Convert a non-group value to `serde_json::Value`.
    ///
    /// Durations encode as integer nanoseconds, times as RFC 3339 and
    /// non-finite floats as strings. Groups are handled by the encoder, which
    /// keeps duplicate keys; here they collapse into an object.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            AttrValue::String(s) => Value::String(s.clone()),
            AttrValue::Int(i) => Value::Number((*i).into()),
            AttrValue::Uint(u) => Value::Number((*u).into()),
            AttrValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(non_finite(*f).to_string())),
            AttrValue::Bool(b) => Value::Bool(*b),
            AttrValue::Duration(d) => {
                Value::Number(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX).into())
            }
            AttrValue::Time(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            AttrValue::Group(members) => Value::Object(
                members
                    .iter()
                    .map(|attr| (attr.key.clone(), attr.value.to_json_value()))
                    .collect(),
            ),
            AttrValue::Any(v) => v.clone(),
        }
    }
}

fn non_finite(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "+Inf"
    } else {
        "-Inf"
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{}", s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Uint(u) => write!(f, "{}", u),
            AttrValue::Float(fl) if fl.is_finite() => write!(f, "{}", fl),
            AttrValue::Float(fl) => write!(f, "{}", non_finite(*fl)),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Duration(d) => write!(f, "{:?}", d),
            AttrValue::Time(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            AttrValue::Group(members) => {
                write!(f, "[")?;
                for (i, attr) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", attr.key, attr.value)?;
                }
                write!(f, "]")
            }
            AttrValue::Any(serde_json::Value::String(s)) => write!(f, "{}", s),
            AttrValue::Any(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::String(s.clone())
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty; $($t:ty),*) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    AttrValue::$variant(v as $wide)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64; u8, u16, u32, u64, usize);

impl From<f32> for AttrValue {
    fn from(f: f32) -> Self {
        AttrValue::Float(f as f64)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Duration> for AttrValue {
    fn from(d: Duration) -> Self {
        AttrValue::Duration(d)
    }
}

impl From<DateTime<FixedOffset>> for AttrValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        AttrValue::Time(t)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(t: DateTime<Utc>) -> Self {
        AttrValue::Time(t.fixed_offset())
    }
}

impl From<DateTime<Local>> for AttrValue {
    fn from(t: DateTime<Local>) -> Self {
        AttrValue::Time(t.fixed_offset())
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(v: serde_json::Value) -> Self {
        AttrValue::Any(v)
    }
}

impl From<Vec<Attr>> for AttrValue {
    fn from(members: Vec<Attr>) -> Self {
        AttrValue::Group(members)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into)
            .unwrap_or(AttrValue::Any(serde_json::Value::Null))
    }
}

/// A single key/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: AttrValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a group attribute holding `members` in order
    pub fn group(name: impl Into<String>, members: impl IntoIterator<Item = Attr>) -> Self {
        Self {
            key: name.into(),
            value: AttrValue::Group(members.into_iter().collect()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Members of a group attribute, `None` for any other kind
    pub fn members(&self) -> Option<&[Attr]> {
        match &self.value {
            AttrValue::Group(members) => Some(members),
            _ => None,
        }
    }

    /// Whether this attribute contributes nothing to rendered output.
    ///
    /// Empty keys on plain values and groups with no visible members are
    /// skipped by both encoders.
    pub fn is_elided(&self) -> bool {
        match &self.value {
            AttrValue::Group(members) => members.iter().all(Attr::is_elided),
            _ => self.key.is_empty(),
        }
    }

    pub(crate) fn members_mut(&mut self) -> Option<&mut Vec<Attr>> {
        match &mut self.value {
            AttrValue::Group(members) => Some(members),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_conversions() {
        assert_eq!(AttrValue::from(5432), AttrValue::Int(5432));
        assert_eq!(AttrValue::from(7u16), AttrValue::Uint(7));
        assert_eq!(AttrValue::from("db1"), AttrValue::String("db1".into()));
        assert_eq!(AttrValue::from(true), AttrValue::Bool(true));
        assert_eq!(
            AttrValue::from(None::<i32>),
            AttrValue::Any(serde_json::Value::Null)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Attr::new("port", 5432).to_string(), "port=5432");
        assert_eq!(
            AttrValue::from(Duration::from_millis(1500)).to_string(),
            "1.5s"
        );
        assert_eq!(AttrValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(AttrValue::from(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(
            Attr::group("req", [Attr::new("id", 7), Attr::new("ok", true)]).to_string(),
            "req=[id=7 ok=true]"
        );
    }

    #[test]
    fn test_json_values() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid datetime");
        assert_eq!(
            AttrValue::from(t).to_json_value(),
            serde_json::json!("2024-03-01T12:00:00Z")
        );
        assert_eq!(
            AttrValue::from(Duration::from_micros(3)).to_json_value(),
            serde_json::json!(3000)
        );
        assert_eq!(
            AttrValue::from(f64::INFINITY).to_json_value(),
            serde_json::json!("+Inf")
        );
    }

    #[test]
    fn test_from_serialize_falls_back_to_debug() {
        use std::collections::HashMap;

        #[derive(Debug, Serialize)]
        struct Endpoint {
            host: &'static str,
            port: u16,
        }

        let value = AttrValue::from_serialize(&Endpoint { host: "db1", port: 5432 });
        assert_eq!(
            value,
            AttrValue::Any(serde_json::json!({"host": "db1", "port": 5432}))
        );

        // Non-string map keys cannot become JSON object keys
        let mut bad = HashMap::new();
        bad.insert((1, 2), "pair");
        let value = AttrValue::from_serialize(&bad);
        assert!(matches!(value, AttrValue::String(ref s) if s.contains("pair")));
    }

    #[test]
    fn test_elided() {
        assert!(Attr::new("", 1).is_elided());
        assert!(Attr::group("empty", Vec::new()).is_elided());
        assert!(!Attr::group("", [Attr::new("a", 1)]).is_elided());
        assert!(!Attr::new("a", "").is_elided());
    }
}

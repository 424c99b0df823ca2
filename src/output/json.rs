//! Structured encoding: one JSON object per record
//!
//! Keys appear in a fixed order, `time`, `level`, `source`, `msg`, followed
//! by the rendered attributes. Groups become nested objects. Keys are written
//! as given, so two sibling groups with the same name produce two entries
//! rather than being merged.

use crate::core::{Attr, AttrValue, Record, Result, TimestampFormat};

#[derive(Debug, Clone)]
pub struct JsonEncoder {
    timestamp_format: TimestampFormat,
    source_root: String,
}

impl JsonEncoder {
    pub fn new(timestamp_format: TimestampFormat, source_root: impl Into<String>) -> Self {
        Self {
            timestamp_format,
            source_root: source_root.into(),
        }
    }

    /// Encode `record` with `attrs` (the handler's rendered attribute list,
    /// record attributes already placed) as a single line without a trailing
    /// newline
    pub fn encode(&self, record: &Record, attrs: &[Attr]) -> Result<String> {
        let mut out = String::with_capacity(128);
        out.push('{');

        push_key(&mut out, "time")?;
        out.push_str(&serde_json::to_string(
            &self.timestamp_format.format_json(&record.timestamp),
        )?);

        out.push(',');
        push_key(&mut out, "level")?;
        out.push_str(&serde_json::to_string(record.level.to_str())?);

        out.push(',');
        push_key(&mut out, "source")?;
        out.push_str(&serde_json::to_string(
            &record.source.relative_to(&self.source_root),
        )?);

        out.push(',');
        push_key(&mut out, "msg")?;
        out.push_str(&serde_json::to_string(&record.message)?);

        let mut first = false;
        push_attrs(&mut out, attrs, &mut first)?;

        out.push('}');
        Ok(out)
    }
}

fn push_key(out: &mut String, key: &str) -> Result<()> {
    out.push_str(&serde_json::to_string(key)?);
    out.push(':');
    Ok(())
}

fn push_attrs(out: &mut String, attrs: &[Attr], first: &mut bool) -> Result<()> {
    for attr in attrs.iter().filter(|a| !a.is_elided()) {
        match attr.value() {
            // An unnamed group contributes its members to the enclosing level
            AttrValue::Group(members) if attr.key().is_empty() => {
                push_attrs(out, members, first)?;
            }
            AttrValue::Group(members) => {
                push_separator(out, first);
                push_key(out, attr.key())?;
                out.push('{');
                let mut nested_first = true;
                push_attrs(out, members, &mut nested_first)?;
                out.push('}');
            }
            value => {
                push_separator(out, first);
                push_key(out, attr.key())?;
                out.push_str(&serde_json::to_string(&value.to_json_value())?);
            }
        }
    }
    Ok(())
}

fn push_separator(out: &mut String, first: &mut bool) {
    if !*first {
        out.push(',');
    }
    *first = false;
}

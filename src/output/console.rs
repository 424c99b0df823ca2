//! Console line rendering
//!
//! Layout: `<timestamp> | <level> | <source> > <message> <attrs>`. Attributes
//! flatten into space-separated `key=value` tokens in insertion order, with
//! group members prefixed by the group path (`req.user.id=7`).

use crate::core::{Attr, AttrValue, Record, TimestampFormat};

#[derive(Debug, Clone)]
pub struct ConsoleFormatter {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    source_root: String,
}

impl ConsoleFormatter {
    pub fn new(
        use_colors: bool,
        timestamp_format: TimestampFormat,
        source_root: impl Into<String>,
    ) -> Self {
        Self {
            use_colors,
            timestamp_format,
            source_root: source_root.into(),
        }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Render one console line, without a trailing newline
    pub fn format(&self, record: &Record, attrs: &[Attr]) -> String {
        let timestamp = self.paint_timestamp(self.timestamp_format.format(&record.timestamp));
        let level = record.level.colorize(self.use_colors);
        let source = record.source.relative_to(&self.source_root);

        let mut line = format!(
            "{} | {} | {} > {}",
            timestamp,
            level,
            source,
            record.single_line_message()
        );

        let tokens = flatten_attrs(attrs);
        if !tokens.is_empty() {
            line.push(' ');
            line.push_str(&self.paint_attrs(tokens.join(" ")));
        }
        line
    }

    #[cfg(feature = "console")]
    fn paint_timestamp(&self, timestamp: String) -> String {
        use colored::Colorize;
        if self.use_colors {
            timestamp.truecolor(0xA9, 0xB7, 0xC6).to_string()
        } else {
            timestamp
        }
    }

    #[cfg(feature = "console")]
    fn paint_attrs(&self, attrs: String) -> String {
        use colored::Colorize;
        if self.use_colors {
            attrs.cyan().to_string()
        } else {
            attrs
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_timestamp(&self, timestamp: String) -> String {
        timestamp
    }

    #[cfg(not(feature = "console"))]
    fn paint_attrs(&self, attrs: String) -> String {
        attrs
    }
}

/// Flatten an attribute list into `key=value` tokens
pub fn flatten_attrs(attrs: &[Attr]) -> Vec<String> {
    let mut tokens = Vec::new();
    push_tokens("", attrs, &mut tokens);
    tokens
}

fn push_tokens(prefix: &str, attrs: &[Attr], tokens: &mut Vec<String>) {
    for attr in attrs.iter().filter(|a| !a.is_elided()) {
        let key = if attr.key().is_empty() {
            prefix.to_string()
        } else if prefix.is_empty() {
            quote_key(attr.key())
        } else {
            format!("{}.{}", prefix, quote_key(attr.key()))
        };

        match attr.value() {
            AttrValue::Group(members) => push_tokens(&key, members, tokens),
            value => tokens.push(format!("{}={}", key, quote_value(&value.to_string()))),
        }
    }
}

/// Quote a key segment that would read as a path separator or split the token
fn quote_key(key: &str) -> String {
    if key.contains(|c: char| c == '.' || c == '=' || c == '"' || c.is_whitespace()) {
        format!("{:?}", key)
    } else {
        key.to_string()
    }
}

/// Quote a value when it would otherwise be ambiguous on the line
fn quote_value(value: &str) -> String {
    if value.is_empty()
        || value.contains(char::is_whitespace)
        || value.contains('"')
        || value.contains('=')
    {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::{Chars, FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A trait for looking up property values during resolution.
///
/// Sources are read concurrently, so implementors must be `Sync`.
pub trait PropertySource: Sync {
    /// Retrieve the value of a property by key.
    fn get_value(&self, key: &str) -> Option<&str>;
}

impl PropertySource for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|s| s.as_str())
    }
}

impl PropertySource for HashMap<&str, &str> {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|s| s.as_str())
    }
}

/// An owned property set, loadable from `key=value` properties text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a property, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse properties text.
    ///
    /// Supports `#`/`!` comment lines, `=`, `:` or whitespace between key and
    /// value, backslash line continuations and the `\t \n \r \f \uXXXX`
    /// escapes. Any other escaped character stands for itself. Later
    /// duplicates win.
    pub fn parse_str(text: &str) -> Result<Self, Error> {
        let mut properties = Self::new();
        let mut lines = text.lines().enumerate();

        while let Some((idx, line)) = lines.next() {
            let line_no = idx + 1;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            // Join continuation lines; their leading whitespace is dropped.
            let mut logical = String::with_capacity(trimmed.len());
            let mut current = trimmed;
            while has_continuation(current) {
                logical.push_str(&current[..current.len() - 1]);
                match lines.next() {
                    Some((_, next)) => current = next.trim_start(),
                    None => {
                        current = "";
                        break;
                    }
                }
            }
            logical.push_str(current);

            let (key, value) = split_entry(&logical);
            properties.insert(unescape(key, line_no)?, unescape(value, line_no)?);
        }

        log::debug!("loaded {} properties", properties.len());
        Ok(properties)
    }

    /// Read and parse a properties file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// Read and parse a properties file without blocking the runtime.
    /// Requires `async` feature.
    #[cfg(feature = "async")]
    pub async fn load_file_async(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse_str(&text)
    }
}

impl FromStr for Properties {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

impl PropertySource for Properties {
    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

/// An odd number of trailing backslashes continues the line.
fn has_continuation(line: &str) -> bool {
    let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
    trailing % 2 == 1
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Split a logical line at the first unescaped `=`, `:` or blank.
fn split_entry(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b':' | b' ' | b'\t' | b'\x0c' => break,
            _ => i += 1,
        }
    }
    let i = i.min(bytes.len());

    let key = &line[..i];
    let mut rest = line[i..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(s: &str, line_no: usize) -> Result<String, Error> {
    if !s.contains('\\') {
        return Ok(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(read_unicode(&mut chars, line_no)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the `XXXX` of a `\uXXXX` escape, joining a UTF-16 surrogate pair
/// when a low surrogate escape follows.
fn read_unicode(chars: &mut Chars<'_>, line_no: usize) -> Result<char, Error> {
    let high = read_hex4(chars, line_no)?;
    let mut code = high;

    if (0xD800..0xDC00).contains(&high) {
        let mut ahead = chars.clone();
        if ahead.next() == Some('\\') && ahead.next() == Some('u') {
            let low = read_hex4(&mut ahead, line_no)?;
            if (0xDC00..0xE000).contains(&low) {
                code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                *chars = ahead;
            }
        }
    }

    char::from_u32(code).ok_or(Error::MalformedUnicodeEscape(line_no))
}

fn read_hex4(chars: &mut Chars<'_>, line_no: usize) -> Result<u32, Error> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedUnicodeEscape(line_no));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| Error::MalformedUnicodeEscape(line_no))
}

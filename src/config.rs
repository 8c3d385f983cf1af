//! Reader configuration

use crate::error::ReadError;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern separating two values of the same line: a single whitespace character.
pub const DEFAULT_SEPARATOR: &str = r"\s";

static DEFAULT_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_SEPARATOR).unwrap_or_else(|e| panic!("invalid default separator: {e}"))
});

/// Configuration that defines the readers' behaviour.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Separator between values within a single line of the input.
    ///
    /// Each match separates two tokens, so consecutive separators produce
    /// empty tokens.
    pub separator: Regex,

    /// Fallback encoding for input files that are not valid UTF-8.
    ///
    /// `None` means Latin-1 (byte-to-char).
    pub encoding: Option<&'static Encoding>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR_REGEX.clone(),
            encoding: None,
        }
    }
}

impl ParserConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given regular expression as separator
    pub fn with_separator(self, pattern: &str) -> Result<Self, ReadError> {
        Ok(self.with_separator_regex(Regex::new(pattern)?))
    }

    /// Use an already compiled separator
    pub fn with_separator_regex(mut self, separator: Regex) -> Self {
        self.separator = separator;
        self
    }

    /// Set the fallback encoding for non UTF-8 input
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the fallback encoding from a WHATWG label such as `"windows-1252"`.
    ///
    /// Unknown labels leave the configuration unchanged.
    pub fn with_encoding_label(self, label: &str) -> Self {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => self.with_encoding(encoding),
            None => {
                log::warn!("unknown encoding label '{}', keeping Latin-1 fallback", label);
                self
            }
        }
    }

    /// Split a line into its tokens.
    ///
    /// An empty line has no tokens. Otherwise empty tokens are preserved,
    /// including leading and trailing ones.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if line.is_empty() {
            return Vec::new();
        }
        self.separator.split(line).collect()
    }

    /// Decode raw input bytes: UTF-8 first, then the fallback encoding
    pub fn decode(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => match self.encoding {
                Some(enc) => {
                    let (decoded, _, _) = enc.decode(bytes);
                    decoded.into_owned()
                }
                // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                None => bytes.iter().map(|&b| b as char).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_empty_tokens() {
        let config = ParserConfig::default();
        assert_eq!(config.split("42 abc  DEF"), vec!["42", "abc", "", "DEF"]);
        assert_eq!(config.split(" "), vec!["", ""]);
        assert_eq!(config.split("42"), vec!["42"]);
        assert!(config.split("").is_empty());
    }

    #[test]
    fn test_custom_separator() {
        let config = ParserConfig::default().with_separator(",").unwrap();
        assert_eq!(config.split("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(config.split("a b"), vec!["a b"]);
    }

    #[test]
    fn test_invalid_separator() {
        let result = ParserConfig::default().with_separator("(");
        assert!(matches!(result, Err(ReadError::InvalidSeparator(_))));
    }

    #[test]
    fn test_decode_falls_back_to_latin1() {
        let config = ParserConfig::default();
        assert_eq!(config.decode(b"caf\xe9"), "café");
        assert_eq!(config.decode("café".as_bytes()), "café");
    }

    #[test]
    fn test_decode_with_configured_encoding() {
        let config = ParserConfig::default().with_encoding_label("windows-1251");
        assert_eq!(config.decode(b"\xcf\xf0\xe8"), "При");
    }
}

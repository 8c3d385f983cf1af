//! Shared reading state of a parse

use crate::config::ParserConfig;
use crate::convert::Scalar;
use crate::error::ReadError;
use ahash::AHashMap;
use std::collections::VecDeque;

/// The reading context of a single parse.
///
/// Owns the remaining input lines, the line cursor and the named variables.
/// Lines are consumed irreversibly. Variables are visible to every reader
/// invoked after they are set, whatever its position in the object tree.
#[derive(Debug)]
pub struct Context {
    lines: VecDeque<String>,
    lines_read: usize,
    current_line: Option<String>,
    /// Tokens of the current line not yet consumed by single-token reads
    pending_tokens: VecDeque<String>,
    variables: AHashMap<String, String>,
    config: ParserConfig,
}

impl Context {
    /// Create a context over the given lines with the default configuration
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            lines_read: 0,
            current_line: None,
            pending_tokens: VecDeque::new(),
            variables: AHashMap::new(),
            config: ParserConfig::default(),
        }
    }

    /// Create a context over the lines of a text
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Set the configuration used by the readers
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Consume and return the next line.
    ///
    /// Tokens left over by single-token reads on the previous line are dropped.
    pub fn read_line(&mut self) -> Result<String, ReadError> {
        self.pending_tokens.clear();
        let line = self.lines.pop_front().ok_or(ReadError::ExhaustedInput {
            lines_read: self.lines_read,
        })?;
        self.lines_read += 1;
        log::trace!("line {}: {:?}", self.lines_read, line);
        self.current_line = Some(line.clone());
        Ok(line)
    }

    /// Number the next call to [`Context::read_line`] will report
    pub fn next_line_number(&self) -> usize {
        self.lines_read + 1
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Raw text of the last consumed line
    pub fn current_line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    /// Number of lines not consumed yet
    pub fn remaining_lines(&self) -> usize {
        self.lines.len()
    }

    /// Number of tokens left on the current line by single-token reads
    pub fn pending_token_count(&self) -> usize {
        self.pending_tokens.len()
    }

    /// Check whether some input remains, lines or pending tokens
    pub fn has_remaining_input(&self) -> bool {
        !self.lines.is_empty() || !self.pending_tokens.is_empty()
    }

    /// Consume the next whitespace-delimited token, reading new lines as needed.
    ///
    /// Blank lines are skipped.
    pub fn read_string(&mut self) -> Result<String, ReadError> {
        loop {
            if let Some(token) = self.pending_tokens.pop_front() {
                return Ok(token);
            }
            let line = self.read_line()?;
            self.pending_tokens = line.split_whitespace().map(str::to_string).collect();
        }
    }

    /// Consume the next token as an integer
    pub fn read_int(&mut self) -> Result<i64, ReadError> {
        self.read_token()
    }

    /// Consume the next token as any scalar
    pub fn read_token<S: Scalar>(&mut self) -> Result<S, ReadError> {
        let token = self.read_string()?;
        S::convert(&token)
    }

    /// Store a variable, replacing any previous value
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        log::trace!("variable {} = {:?}", name, value);
        self.variables.insert(name, value);
    }

    /// Get the raw value of a variable
    pub fn get_variable(&self, name: &str) -> Result<&str, ReadError> {
        self.variables
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ReadError::UndefinedVariable(name.to_string()))
    }

    /// Get a variable converted to an integer
    pub fn get_variable_as_int(&self, name: &str) -> Result<i64, ReadError> {
        self.get_variable_as(name)
    }

    /// Get a variable converted to any scalar
    pub fn get_variable_as<S: Scalar>(&self, name: &str) -> Result<S, ReadError> {
        S::convert(self.get_variable(name)?)
    }

    /// Check whether a variable is set
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_advances_cursor() {
        let mut ctx = Context::new(["first", "second"]);
        assert_eq!(ctx.next_line_number(), 1);
        assert_eq!(ctx.read_line().unwrap(), "first");
        assert_eq!(ctx.next_line_number(), 2);
        assert_eq!(ctx.current_line(), Some("first"));
        assert_eq!(ctx.read_line().unwrap(), "second");
        assert_eq!(ctx.lines_read(), 2);
        assert!(!ctx.has_remaining_input());
    }

    #[test]
    fn test_exhausted_input() {
        let mut ctx = Context::new(["only"]);
        ctx.read_line().unwrap();
        let err = ctx.read_line().unwrap_err();
        assert!(matches!(err, ReadError::ExhaustedInput { lines_read: 1 }));
        assert_eq!(ctx.next_line_number(), 2);
    }

    #[test]
    fn test_variables_are_overwritten() {
        let mut ctx = Context::new(Vec::<String>::new());
        ctx.set_variable("N", "3");
        ctx.set_variable("N", "5");
        assert_eq!(ctx.get_variable("N").unwrap(), "5");
        assert_eq!(ctx.get_variable_as_int("N").unwrap(), 5);
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = Context::new(Vec::<String>::new());
        assert!(matches!(
            ctx.get_variable("missing"),
            Err(ReadError::UndefinedVariable(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_variable_not_an_integer() {
        let mut ctx = Context::new(Vec::<String>::new());
        ctx.set_variable("N", "three");
        assert!(matches!(
            ctx.get_variable_as_int("N"),
            Err(ReadError::TypeConversion { .. })
        ));
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut ctx = Context::from_text("1 2\n\n3\n");
        assert_eq!(ctx.read_int().unwrap(), 1);
        assert_eq!(ctx.read_int().unwrap(), 2);
        assert_eq!(ctx.read_int().unwrap(), 3);
        assert_eq!(ctx.lines_read(), 3);
        assert!(ctx.read_string().is_err());
    }

    #[test]
    fn test_read_line_discards_leftover_tokens() {
        let mut ctx = Context::from_text("1 2 3\nnext line\n4");
        assert_eq!(ctx.read_string().unwrap(), "1");
        assert!(ctx.has_remaining_input());
        assert_eq!(ctx.read_line().unwrap(), "next line");
        assert_eq!(ctx.read_int().unwrap(), 4);
    }

    #[test]
    fn test_leftover_tokens_kept_for_token_reads() {
        let mut ctx = Context::from_text("a b\nc");
        assert_eq!(ctx.read_string().unwrap(), "a");
        assert_eq!(ctx.lines_read(), 1);
        assert_eq!(ctx.read_string().unwrap(), "b");
        assert_eq!(ctx.lines_read(), 1);
        assert_eq!(ctx.read_string().unwrap(), "c");
        assert_eq!(ctx.lines_read(), 2);
    }

    #[test]
    fn test_pending_token_count() {
        let mut ctx = Context::from_text("1 2 3");
        assert_eq!(ctx.pending_token_count(), 0);
        ctx.read_string().unwrap();
        assert_eq!(ctx.pending_token_count(), 2);
        assert_eq!(ctx.remaining_lines(), 0);
        assert!(ctx.has_remaining_input());
    }
}

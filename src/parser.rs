//! Parse entry points: text, lines, streams and files

use crate::config::ParserConfig;
use crate::context::Context;
use crate::error::{LoadError, Result};
use crate::readers::ObjectReader;
use rayon::prelude::*;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Parses whole inputs into a root value of type `T`.
///
/// Every parse gets its own [`Context`], so a single parser can be shared
/// between threads and reused for any number of inputs.
///
/// ```rust,ignore
/// let parser = Parser::new(problem_reader());
/// let problem = parser.parse_file("input.txt")?;
/// ```
pub struct Parser<T> {
    reader: Arc<dyn ObjectReader<T>>,
    config: ParserConfig,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            config: self.config.clone(),
        }
    }
}

impl<T> Parser<T> {
    /// Create a parser with the default configuration
    pub fn new<R>(reader: R) -> Self
    where
        R: ObjectReader<T> + 'static,
    {
        Self {
            reader: Arc::new(reader),
            config: ParserConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a text
    pub fn parse(&self, input: &str) -> Result<T> {
        self.parse_lines(input.lines())
    }

    /// Parse a sequence of lines, without line terminators
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut context = Context::new(lines).with_config(self.config.clone());
        self.parse_context(&mut context)
    }

    /// Read the root value from an existing context.
    ///
    /// Input left over after the root value is not an error, but is logged.
    pub fn parse_context(&self, context: &mut Context) -> Result<T> {
        log::debug!("parsing {} line(s)", context.remaining_lines());
        let value = match self.reader.read(context) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("parse failed after {} line(s): {}", context.lines_read(), e);
                return Err(e);
            }
        };
        if context.has_remaining_input() {
            log::warn!("{}", describe_leftover(context));
        }
        log::debug!("parsed {} line(s)", context.lines_read());
        Ok(value)
    }

    /// Parse everything a byte stream yields
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> std::result::Result<T, LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.parse(&self.config.decode(&bytes))?)
    }

    /// Parse a file.
    ///
    /// UTF-8 content is read as is; anything else is decoded with the
    /// configured fallback encoding.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<T, LoadError> {
        let path = path.as_ref();
        log::debug!("loading {}", path.display());
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse(&self.config.decode(&bytes))?)
    }

    /// Parse several files in parallel, returning results in input order
    pub fn parse_files<P>(&self, paths: &[P]) -> Vec<std::result::Result<T, LoadError>>
    where
        T: Send,
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|path| self.parse_file(path)).collect()
    }
}

fn describe_leftover(context: &Context) -> String {
    format!(
        "{} line(s) and {} token(s) left unread after line {}",
        context.remaining_lines(),
        context.pending_token_count(),
        context.lines_read()
    )
}

//! PII redaction for rendered log lines
//!
//! [`Redactor`] rewrites every `field=value` occurrence of a listed field to
//! `field=<redaction>`, where the value runs up to the next separator.
//! Matching is purely textual and is applied to the fully rendered line.
//!
//! [`RedactingMakeWriter`] installs a redactor in front of any
//! `tracing_subscriber` writer:
//!
//! ```rust
//! use platform::redact::{RedactingMakeWriter, Redactor, PII_FIELDS};
//!
//! let redactor = Redactor::new(PII_FIELDS, "***", " ").unwrap();
//! let subscriber = tracing_subscriber::fmt()
//!     .with_ansi(false)
//!     .with_writer(RedactingMakeWriter::new(redactor, std::io::stderr))
//!     .finish();
//! # drop(subscriber);
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use regex::{Captures, Regex};
use tracing_subscriber::fmt::MakeWriter;

/// Fields treated as personal data by default
pub const PII_FIELDS: [&str; 5] = ["email", "phone", "ssn", "password", "ip"];

pub const DEFAULT_REDACTION: &str = "***";

pub const DEFAULT_SEPARATOR: &str = ";";

/// Replaces the values of sensitive fields in a log line
#[derive(Debug, Clone)]
pub struct Redactor {
    pattern: Option<Regex>,
    redaction: String,
}

impl Redactor {
    /// Build a redactor for `fields`
    ///
    /// Field names and separator characters are matched literally. An empty
    /// separator lets a value run to the end of the line.
    pub fn new<I, S>(fields: I, redaction: &str, separator: &str) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = fields
            .into_iter()
            .map(|f| regex::escape(f.as_ref()))
            .filter(|f| !f.is_empty())
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            let stop: String = separator
                .chars()
                .chain(std::iter::once('\n'))
                .map(|c| regex::escape(&c.to_string()))
                .collect();
            Some(Regex::new(&format!(
                "({})=[^{}]*",
                alternatives.join("|"),
                stop
            ))?)
        };

        Ok(Self {
            pattern,
            redaction: redaction.to_string(),
        })
    }

    /// Redactor over [`PII_FIELDS`] with `***` and `;`
    pub fn pii() -> Result<Self, regex::Error> {
        Self::new(PII_FIELDS, DEFAULT_REDACTION, DEFAULT_SEPARATOR)
    }

    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(message, |caps: &Captures<'_>| {
                format!("{}={}", &caps[1], self.redaction)
            }),
            None => Cow::Borrowed(message),
        }
    }
}

/// `MakeWriter` that redacts each event before handing it to `inner`
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    redactor: Redactor,
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(redactor: Redactor, inner: M) -> Self {
        Self { redactor, inner }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<'a, M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            redactor: &self.redactor,
            inner: self.inner.make_writer(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one rendered event and writes it out redacted on flush or drop
pub struct RedactingWriter<'a, W: Write> {
    redactor: &'a Redactor,
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> RedactingWriter<'_, W> {
    fn emit(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf);
        let redacted = self.redactor.redact(&text);
        self.inner.write_all(redacted.as_bytes())?;
        self.buf.clear();
        Ok(())
    }
}

impl<W: Write> Write for RedactingWriter<'_, W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for RedactingWriter<'_, W> {
    fn drop(&mut self) {
        let _ = self.emit();
    }
}

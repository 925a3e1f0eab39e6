//! Redaction-by-type for log output.
//!
//! Health metrics and feedback text must not reach log files. Wrapping them
//! in [`Redacted`] makes `Debug` and `Display` print a placeholder, so a
//! stray `?value` in a tracing call leaks nothing.

use std::fmt;

const PLACEHOLDER: &str = "[REDACTED]";

/// Wrapper whose formatting never reveals the inner value.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PLACEHOLDER)
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PLACEHOLDER)
    }
}

//! `#line<N>` references to a selected line

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "line";

/// Durable reference to a line, as carried in a URL fragment
///
/// Renders as `#line<N>`; [`LineFragment::parse`] reads it back, so a
/// reference survives restarts and can be shared as a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineFragment {
    line: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    #[error("Fragment '{0}' does not start with '#line'")]
    MissingPrefix(String),

    #[error("Fragment '{0}' has no valid line number")]
    InvalidLine(String),
}

impl LineFragment {
    pub fn new(line: usize) -> Self {
        Self { line }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Parse `#line<N>` (the leading `#` is optional)
    pub fn parse(fragment: impl AsRef<str>) -> Option<Self> {
        fragment.as_ref().parse().ok()
    }

    /// Extract the fragment from a full URL such as
    /// `http://ci/build/42/output#line17`
    ///
    /// Returns `Ok(None)` when the URL carries no fragment at all.
    pub fn from_url(url: &str) -> Result<Option<Self>, FragmentError> {
        match url.split_once('#') {
            Some((_, fragment)) if !fragment.is_empty() => fragment.parse().map(Some),
            _ => Ok(None),
        }
    }
}

impl FromStr for LineFragment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix('#').unwrap_or(s);
        let digits = body
            .strip_prefix(PREFIX)
            .ok_or_else(|| FragmentError::MissingPrefix(s.to_string()))?;

        // usize::from_str would also accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FragmentError::InvalidLine(s.to_string()));
        }

        digits
            .parse()
            .map(Self::new)
            .map_err(|_| FragmentError::InvalidLine(s.to_string()))
    }
}

impl fmt::Display for LineFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}{}", PREFIX, self.line)
    }
}

impl From<usize> for LineFragment {
    fn from(line: usize) -> Self {
        Self::new(line)
    }
}

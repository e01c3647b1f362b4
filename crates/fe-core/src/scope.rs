//! Parser for control scopes (`#/properties/address/properties/street`).
//!
//! Built on `winnow` 0.7. A scope is `#` followed by zero or more
//! `/segment` parts; `~1` and `~0` decode to `/` and `~` as in JSON Pointer.

use crate::error::DocumentError;
use smallvec::SmallVec;
use std::fmt;
use winnow::combinator::{preceded, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

/// A parsed scope: the decoded pointer segments after `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    segments: SmallVec<[String; 4]>,
}

impl Scope {
    /// Parse a scope string.
    ///
    /// # Errors
    /// Returns `DocumentError::InvalidScope` if the string does not start with `#`
    /// or continues with anything other than `/segment` parts.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let mut rest = input;
        let scope = parse_scope
            .parse_next(&mut rest)
            .map_err(|e| DocumentError::InvalidScope {
                scope: input.to_string(),
                reason: format!("{e}"),
            })?;
        if !rest.is_empty() {
            return Err(DocumentError::InvalidScope {
                scope: input.to_string(),
                reason: format!("unexpected trailing input `{rest}`"),
            });
        }
        Ok(scope)
    }

    /// The root scope `#`.
    pub fn root() -> Self {
        Self {
            segments: SmallVec::new(),
        }
    }

    /// Append one decoded segment.
    #[must_use]
    pub fn child(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Name of the property this scope points at, if it ends in
    /// `.../properties/<name>`.
    pub fn last_property(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [.., parent, name] if parent == "properties" => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn parse_scope(input: &mut &str) -> ModalResult<Scope> {
    let _ = '#'.parse_next(input)?;
    let segments: Vec<String> = repeat(0.., preceded('/', parse_segment)).parse_next(input)?;
    Ok(Scope {
        segments: SmallVec::from_vec(segments),
    })
}

fn parse_segment(input: &mut &str) -> ModalResult<String> {
    take_while(0.., |c: char| c != '/')
        .map(unescape_segment)
        .parse_next(input)
}

fn unescape_segment(raw: &str) -> String {
    raw.replace("~1", "/").replace("~0", "~")
}

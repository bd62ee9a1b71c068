//! Route path patterns
//!
//! A route path is split on `/` into segments. Four segment forms exist:
//!
//! - `users` matches the literal text
//! - `:id` matches any single segment and captures it as `id`
//! - `:path(.*)` matches against the given regex; as the final segment it may
//!   span several segments (`/redirect/:path(.*)` accepts `/redirect/users/list`)
//! - `*` matches everything that remains and captures it as `pathMatch`
//!
//! Parent and child paths are combined with [`join_paths`] before parsing, so
//! patterns are always absolute.

use crate::error::PathPatternError;
use regex::Regex;
use std::fmt;

/// Name under which a `*` segment records what it consumed.
pub const WILDCARD_PARAM: &str = "pathMatch";

/// One compiled piece of a [`RoutePath`]
#[derive(Debug, Clone)]
pub enum Segment {
    /// Literal text
    Static(String),
    /// `:name`
    Param(String),
    /// `:name(regex)`; `tail` is set when it is the final segment
    Pattern {
        name: String,
        source: String,
        regex: Regex,
        tail: bool,
    },
    /// `*`
    Wildcard,
}

impl Segment {
    /// Lookup priority within one tree level; lower wins.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Param(_) => 1,
            Segment::Pattern { .. } => 2,
            Segment::Wildcard => 3,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Static(a), Segment::Static(b)) => a == b,
            (Segment::Param(a), Segment::Param(b)) => a == b,
            (
                Segment::Pattern {
                    name: a,
                    source: sa,
                    tail: ta,
                    ..
                },
                Segment::Pattern {
                    name: b,
                    source: sb,
                    tail: tb,
                    ..
                },
            ) => a == b && sa == sb && ta == tb,
            (Segment::Wildcard, Segment::Wildcard) => true,
            _ => false,
        }
    }
}

impl Eq for Segment {}

/// A parsed, absolute route path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePath {
    /// Parse a full path such as `/users/:id` or `/redirect/:path(.*)`.
    pub fn parse(raw: &str) -> Result<Self, PathPatternError> {
        let pieces = split_segments(raw).ok_or_else(|| PathPatternError::UnbalancedPattern {
            path: raw.to_string(),
        })?;
        let count = pieces.len();
        let mut segments = Vec::with_capacity(count);

        for (index, piece) in pieces.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let segment = if piece == "*" {
                if !is_last {
                    return Err(PathPatternError::MisplacedWildcard {
                        path: raw.to_string(),
                    });
                }
                Segment::Wildcard
            } else if let Some(param) = piece.strip_prefix(':') {
                parse_param(raw, param, is_last)?
            } else {
                Segment::Static(piece.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path exactly as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this path ends in the `*` catch-all.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Names of all captured parameters, in declaration order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) | Segment::Pattern { name, .. } => Some(name.as_str()),
                Segment::Wildcard => Some(WILDCARD_PARAM),
                Segment::Static(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_param(raw: &str, param: &str, is_last: bool) -> Result<Segment, PathPatternError> {
    let (name, source) = match param.find('(') {
        Some(open) => {
            let Some(inner) = param[open + 1..].strip_suffix(')') else {
                return Err(PathPatternError::UnbalancedPattern {
                    path: raw.to_string(),
                });
            };
            (&param[..open], Some(inner))
        }
        None => (param, None),
    };

    if name.is_empty() {
        return Err(PathPatternError::EmptyParamName {
            path: raw.to_string(),
        });
    }

    let Some(source) = source else {
        return Ok(Segment::Param(name.to_string()));
    };

    let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
        PathPatternError::InvalidRegex {
            path: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(Segment::Pattern {
        name: name.to_string(),
        source: source.to_string(),
        regex,
        tail: is_last,
    })
}

/// Split on `/`, ignoring slashes inside `(...)`. `None` on unbalanced parens.
fn split_segments(raw: &str) -> Option<Vec<&str>> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in raw.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            '/' if depth == 0 => {
                if i > start {
                    pieces.push(&raw[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    if raw.len() > start {
        pieces.push(&raw[start..]);
    }
    Some(pieces)
}

/// Resolve a child path against its parent.
///
/// Absolute child paths (leading `/`) and the bare `*` stand alone; relative
/// ones are appended to the parent. An empty child path is the parent itself.
#[must_use]
pub fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') || child == "*" {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    let parent = parent.trim_end_matches('/');
    format!("{}/{}", parent, child)
}

/// Split a navigation location into path, query string and hash.
pub(crate) fn split_location(location: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, hash) = match location.split_once('#') {
        Some((rest, hash)) => (rest, Some(hash)),
        None => (location, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    (path, query, hash)
}

//! SnapshotParser - decodes the snapshot document sent by the game server.
//!
//! The document is a flat object with six keys:
//!
//! ```text
//! {"snake": [[10, 7], [9, 7]], "food": [3, 3], "score": 0, "game_over": false, "width": 20, "height": 15}
//! ```
//!
//! Rather than tokenizing, the decoder locates each key with a literal text search
//! and then scans its value:
//!
//! - **Arrays** are isolated with a bracket-depth counter (`[` increments, `]`
//!   decrements, the value ends when the depth returns to zero), so nesting of any
//!   depth is handled without a tokenizer.
//! - **Scalars** run from the `:` after the key up to the next top-level `,` or `}`.
//!
//! Decoding is best-effort per field: a missing or malformed field falls back to
//! zero, `false`, or empty instead of failing the whole document. Only a document
//! with no recoverable structure at all is reported as a [`ParseError`].
//!
//! # Example
//!
//! ```
//! use snake_client_core::parser;
//! use snake_client_core::types::Point;
//!
//! let snap = parser::parse(r#"{"snake":[[5,5]],"score":3,"game_over":TRUE}"#).unwrap();
//! assert_eq!(snap.snake, vec![Point::new(5, 5)]);
//! assert_eq!(snap.food, None);
//! assert_eq!(snap.score, 3);
//! assert!(snap.game_over);
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::snapshot::Snapshot;
use crate::types::Point;

/// Keys understood by the decoder.
pub const SNAPSHOT_KEYS: [&str; 6] = ["snake", "food", "score", "game_over", "width", "height"];

/// Catastrophic decode failure. Carries the original text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("snapshot decode failed ({cause}): {text:?}")]
pub struct ParseError {
    pub text: String,
    #[source]
    pub cause: ParseFailure,
}

impl ParseError {
    fn new(text: &str, cause: ParseFailure) -> Self {
        Self {
            text: text.to_string(),
            cause,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("empty document")]
    Empty,
    #[error("document is not an object")]
    NotAnObject,
    #[error("none of the snapshot keys are present")]
    NoKnownKeys,
}

/// Decode a snapshot document.
pub fn parse(text: &str) -> Result<Snapshot, ParseError> {
    let doc = text.trim();
    if doc.is_empty() {
        return Err(ParseError::new(text, ParseFailure::Empty));
    }
    if !doc.starts_with('{') || !doc.ends_with('}') {
        return Err(ParseError::new(text, ParseFailure::NotAnObject));
    }
    if SNAPSHOT_KEYS.iter().all(|key| find_key(doc, key).is_none()) {
        return Err(ParseError::new(text, ParseFailure::NoKnownKeys));
    }

    // Segments that are not coordinate pairs are dropped rather than rendered
    // at a made-up position.
    let snake = array_value(doc, "snake")
        .map(split_groups)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|group| point_from_list(&parse_int_list(group)))
        .collect();

    let food = array_value(doc, "food").and_then(|span| point_from_list(&parse_int_list(span)));

    Ok(Snapshot {
        snake,
        food,
        score: uint_value(doc, "score"),
        game_over: bool_value(doc, "game_over"),
        width: uint_value(doc, "width"),
        height: uint_value(doc, "height"),
    })
}

impl FromStr for Snapshot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Byte offset just past the quoted `"key"` in `doc`, if present.
pub fn find_key(doc: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{key}\"");
    doc.find(&needle).map(|at| at + needle.len())
}

/// Byte offset just past the `:` that follows `"key"`.
fn value_start(doc: &str, key: &str) -> Option<usize> {
    let after_key = find_key(doc, key)?;
    let colon = after_key + leading_ws(&doc[after_key..]);
    if doc[colon..].starts_with(':') {
        Some(colon + 1)
    } else {
        None
    }
}

fn leading_ws(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Index of the `]` that closes the `[` at `open`.
///
/// Returns `None` if `open` is not a `[` or the span is never closed.
pub fn matching_bracket(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(open) != Some(&b'[') {
        return None;
    }

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// The full bracketed span (`[ ... ]`) of an array-valued key.
///
/// The value must open right after the key's `:` (whitespace aside).
pub fn array_value<'a>(doc: &'a str, key: &str) -> Option<&'a str> {
    let start = value_start(doc, key)?;
    let open = start + leading_ws(&doc[start..]);
    let close = matching_bracket(doc, open)?;
    Some(&doc[open..=close])
}

/// Trimmed text of a scalar-valued key, up to the next top-level `,` or `}`.
pub fn scalar_value<'a>(doc: &'a str, key: &str) -> Option<&'a str> {
    let start = value_start(doc, key)?;

    let mut depth = 0usize;
    let mut end = doc.len();
    for (i, b) in doc.bytes().enumerate().skip(start) {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b',' | b'}' if depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    Some(doc[start..end].trim())
}

/// Split a nested array span into one substring per inner `[...]` group.
///
/// A single enclosing pair of brackets is ignored if present.
pub fn split_groups(span: &str) -> Vec<&str> {
    let mut inner = span.trim();
    if inner.len() >= 2 && matching_bracket(inner, 0) == Some(inner.len() - 1) {
        inner = &inner[1..inner.len() - 1];
    }

    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, b) in inner.bytes().enumerate() {
        match b {
            b'[' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            b']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push(&inner[start..=i]);
                }
            }
            _ => {}
        }
    }
    groups
}

/// Parse a flat `[a, b, ...]` group. Items that are not integers are skipped;
/// `[]` yields an empty list.
pub fn parse_int_list(group: &str) -> Vec<i32> {
    let inner = group.trim().trim_start_matches('[').trim_end_matches(']');
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .filter_map(|part| part.trim().parse::<i32>().ok())
        .collect()
}

fn point_from_list(list: &[i32]) -> Option<Point> {
    match list {
        [x, y, ..] => Some(Point::new(*x, *y)),
        _ => None,
    }
}

fn uint_value(doc: &str, key: &str) -> u32 {
    scalar_value(doc, key)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0)
}

fn bool_value(doc: &str, key: &str) -> bool {
    scalar_value(doc, key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

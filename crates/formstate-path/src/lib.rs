//! Form field path utilities.
//!
//! A field path names a location inside a nested value tree using dotted
//! keys and bracketed indices:
//!
//! ```text
//! path    := (segment | '[' index ']') ('.' segment | '[' index ']')*
//! segment := one or more characters other than '.', '[' and ']'
//! index   := '0' | [1-9][0-9]*
//! ```
//!
//! A dotted segment made only of canonical digits is an index too, so
//! `addresses.0.city` and `addresses[0].city` are the same path.
//!
//! # Example
//!
//! ```
//! use formstate_path::{format_path, get, parse_path, PathStep};
//! use formstate_util::Value;
//!
//! let path = parse_path("addresses[0].city").unwrap();
//! assert_eq!(
//!     path.steps(),
//!     &[PathStep::Key("addresses".into()), PathStep::Index(0), PathStep::Key("city".into())]
//! );
//! assert_eq!(format_path(path.steps()), "addresses[0].city");
//!
//! let doc = Value::from(serde_json::json!({"addresses": [{"city": "Lima"}]}));
//! assert_eq!(get(&doc, path.steps()), Some(&Value::from("Lima")));
//! ```

use thiserror::Error;

pub mod get;
pub mod types;
pub mod validate;

pub use get::{get, resolve};
pub use types::{IntoPath, Path, PathStep};
pub use validate::{validate_path, validate_source, MAX_PATH_DEPTH, MAX_PATH_SOURCE_LENGTH};

/// A path string that violates the path grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("empty segment at offset {offset}")]
    EmptySegment { offset: usize },
    #[error("unterminated index starting at offset {offset}")]
    UnterminatedIndex { offset: usize },
    #[error("invalid array index {index:?}")]
    InvalidIndex { index: String },
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { offset: usize, ch: char },
    #[error("path too long")]
    TooLong,
    #[error("path too deep")]
    TooDeep,
}

/// Check if a string is a canonical non-negative integer array index.
///
/// # Example
///
/// ```
/// use formstate_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("1.5"));
/// assert!(!is_valid_index("abc"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Parse a path string into steps.
///
/// # Errors
///
/// Any [`PathError`]: empty input or segments, unterminated or non-integer
/// indices, stray `]`, or a path over the size limits.
pub fn parse_path(src: &str) -> Result<Path, PathError> {
    validate_source(src)?;
    let bytes = src.as_bytes();
    let mut steps = Vec::new();

    // Separators are ASCII, so byte offsets always land on char boundaries.
    let mut pos = if bytes[0] == b'[' {
        read_index(src, 1, &mut steps)?
    } else {
        read_segment(src, 0, &mut steps)?
    };
    while pos < bytes.len() {
        pos = match bytes[pos] {
            b'.' => read_segment(src, pos + 1, &mut steps)?,
            b'[' => read_index(src, pos + 1, &mut steps)?,
            _ => {
                return Err(PathError::UnexpectedCharacter {
                    offset: pos,
                    ch: src[pos..].chars().next().unwrap_or_default(),
                })
            }
        };
    }

    validate_path(&steps)?;
    Ok(Path::new(steps))
}

fn read_segment(src: &str, start: usize, steps: &mut Vec<PathStep>) -> Result<usize, PathError> {
    let end = src[start..]
        .find(|c: char| matches!(c, '.' | '[' | ']'))
        .map_or(src.len(), |i| start + i);
    if src.as_bytes().get(end) == Some(&b']') {
        return Err(PathError::UnexpectedCharacter {
            offset: end,
            ch: ']',
        });
    }
    if end == start {
        return Err(PathError::EmptySegment { offset: start });
    }
    let segment = &src[start..end];
    let step = if is_valid_index(segment) {
        match segment.parse() {
            Ok(index) => PathStep::Index(index),
            Err(_) => PathStep::Key(segment.to_string()),
        }
    } else {
        PathStep::Key(segment.to_string())
    };
    steps.push(step);
    Ok(end)
}

fn read_index(src: &str, start: usize, steps: &mut Vec<PathStep>) -> Result<usize, PathError> {
    let close = src[start..]
        .find(']')
        .ok_or(PathError::UnterminatedIndex { offset: start - 1 })?;
    let body = &src[start..start + close];
    if !is_valid_index(body) {
        return Err(PathError::InvalidIndex {
            index: body.to_string(),
        });
    }
    let index = body.parse().map_err(|_| PathError::InvalidIndex {
        index: body.to_string(),
    })?;
    steps.push(PathStep::Index(index));
    Ok(start + close + 1)
}

/// Format steps into a path string.
///
/// Indices are always rendered in bracket form. Returns an empty string for
/// the root path.
///
/// The grammar has no escapes. A programmatic [`PathStep::Key`] that is
/// empty or contains `.`, `[` or `]` is written out as is, so the result
/// does not parse back to the same steps.
///
/// # Example
///
/// ```
/// use formstate_path::{format_path, PathStep};
///
/// assert_eq!(format_path(&[]), "");
/// assert_eq!(format_path(&[PathStep::Key("tags".into()), PathStep::Index(1)]), "tags[1]");
/// ```
pub fn format_path(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        match step {
            PathStep::Key(k) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(k);
            }
            PathStep::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathStep {
        PathStep::Key(k.to_string())
    }

    #[test]
    fn test_format_keys_with_separators_do_not_round_trip() {
        let steps = [key("a.b"), key("c")];
        let text = format_path(&steps);
        assert_eq!(text, "a.b.c");
        assert_eq!(parse_path(&text).unwrap().steps(), &[key("a"), key("b"), key("c")]);

        let bracketed = [key("x[0]")];
        assert_eq!(
            parse_path(&format_path(&bracketed)).unwrap().steps(),
            &[key("x"), PathStep::Index(0)]
        );
    }

    #[test]
    fn test_parse_single_segment() {
        assert_eq!(parse_path("email").unwrap().steps(), &[key("email")]);
    }

    #[test]
    fn test_parse_mixed() {
        assert_eq!(
            parse_path("addresses[0].city").unwrap().steps(),
            &[key("addresses"), PathStep::Index(0), key("city")]
        );
        assert_eq!(
            parse_path("matrix[1][2]").unwrap().steps(),
            &[key("matrix"), PathStep::Index(1), PathStep::Index(2)]
        );
    }

    #[test]
    fn test_parse_dotted_digits_is_index() {
        assert_eq!(
            parse_path("addresses.0.city").unwrap(),
            parse_path("addresses[0].city").unwrap()
        );
        // Non-canonical digits stay a key
        assert_eq!(parse_path("a.01").unwrap().steps(), &[key("a"), key("01")]);
    }

    #[test]
    fn test_parse_leading_index() {
        assert_eq!(
            parse_path("[3].name").unwrap().steps(),
            &[PathStep::Index(3), key("name")]
        );
    }

    #[test]
    fn test_parse_unicode_segment() {
        assert_eq!(parse_path("café.prix").unwrap().steps(), &[key("café"), key("prix")]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_path(""), Err(PathError::Empty));
        assert_eq!(parse_path("a..b"), Err(PathError::EmptySegment { offset: 2 }));
        assert_eq!(parse_path(".a"), Err(PathError::EmptySegment { offset: 0 }));
        assert_eq!(parse_path("a."), Err(PathError::EmptySegment { offset: 2 }));
        assert_eq!(parse_path("a[0"), Err(PathError::UnterminatedIndex { offset: 1 }));
        assert_eq!(
            parse_path("a[-1]"),
            Err(PathError::InvalidIndex { index: "-1".into() })
        );
        assert_eq!(
            parse_path("a[x]"),
            Err(PathError::InvalidIndex { index: "x".into() })
        );
        assert_eq!(
            parse_path("a[]"),
            Err(PathError::InvalidIndex { index: "".into() })
        );
        assert_eq!(
            parse_path("a[0]b"),
            Err(PathError::UnexpectedCharacter { offset: 4, ch: 'b' })
        );
        assert_eq!(
            parse_path("a]"),
            Err(PathError::UnexpectedCharacter { offset: 1, ch: ']' })
        );
    }

    #[test]
    fn test_parse_index_overflow() {
        let huge = format!("a[{}0]", usize::MAX);
        assert!(matches!(parse_path(&huge), Err(PathError::InvalidIndex { .. })));
    }

    #[test]
    fn test_parse_too_deep() {
        let deep = vec!["a"; 300].join(".");
        assert_eq!(parse_path(&deep), Err(PathError::TooDeep));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_path(&[]), "");
        assert_eq!(
            format_path(&[key("addresses"), PathStep::Index(0), key("city")]),
            "addresses[0].city"
        );
        assert_eq!(format_path(&[PathStep::Index(0), key("a")]), "[0].a");
    }

    #[test]
    fn test_roundtrip() {
        for src in ["a", "a.b", "a[0]", "a[0].b[12].c", "[1]", "x[0][0]"] {
            assert_eq!(parse_path(src).unwrap().to_string(), src, "roundtrip {src}");
        }
    }
}

//! Type definitions for field paths.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{format_path, is_valid_index, parse_path, PathError};

/// A step in a field path.
///
/// Either an object key (`city` in `addresses[0].city`) or an array index
/// (`0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl PathStep {
    /// The array index this step addresses, if any.
    ///
    /// A `Key` made of canonical digits also addresses an index, so that
    /// programmatically built paths agree with parsed ones.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(k) if is_valid_index(k) => k.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    /// The object key this step addresses. Indices are rendered in decimal.
    pub fn to_key(&self) -> String {
        match self {
            PathStep::Key(k) => k.clone(),
            PathStep::Index(i) => i.to_string(),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// A parsed field path.
///
/// Paths are immutable values; the builder-style helpers return new paths.
/// The root path (no steps) addresses the whole tree and can only be built
/// programmatically: the empty string is not a valid path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn root() -> Self {
        Path { steps: Vec::new() }
    }

    /// Builds a path from steps without checking them. Keys containing
    /// `.`, `[` or `]` address the tree fine but do not survive
    /// [`format_path`](crate::format_path) and re-parsing.
    pub fn new(steps: Vec<PathStep>) -> Self {
        Path { steps }
    }

    pub fn parse(src: &str) -> Result<Self, PathError> {
        parse_path(src)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<PathStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Returns this path extended by one step.
    pub fn push(&self, step: impl Into<PathStep>) -> Path {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step.into());
        Path { steps }
    }

    /// Returns `self[index]`.
    pub fn with_index(&self, index: usize) -> Path {
        self.push(PathStep::Index(index))
    }

    pub fn join(&self, other: &Path) -> Path {
        let mut steps = self.steps.clone();
        steps.extend_from_slice(&other.steps);
        Path { steps }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.steps.split_last()?;
        Some(Path {
            steps: init.to_vec(),
        })
    }

    /// Check if `self` strictly contains `child`.
    pub fn is_child(&self, child: &Path) -> bool {
        self.steps.len() < child.steps.len() && child.steps.starts_with(&self.steps)
    }
}

impl AsRef<[PathStep]> for Path {
    fn as_ref(&self) -> &[PathStep] {
        &self.steps
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path { steps }
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse_path(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_path(&self.steps))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_path(&s).map_err(de::Error::custom)
    }
}

/// Anything that can name a location: a parsed [`Path`] or a path string.
///
/// Strings are parsed once at the API boundary; everything below works on
/// steps.
pub trait IntoPath {
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        parse_path(self)
    }
}

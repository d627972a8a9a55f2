//! Structured validation failures.
//!
//! A [`Failure`] records one mismatch between a document and a schema. A
//! validation run returns every failure it finds, in traversal order; an
//! empty list is the success signal.

use serde::Serialize;
use std::fmt;

/// One step of a path into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Location of a node in a document, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns a copy of this path extended by a key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(PathSegment::Key(key.into()));
        path
    }

    /// Returns a copy of this path extended by an index.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push(PathSegment::Index(index));
        path
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// Category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Required value absent
    MissingField,
    /// Base type check rejected the value
    TypeMismatch,
    /// Value not a member of an enum
    NotInEnum,
    /// A refinement constraint rejected the value
    ConstraintViolation,
    /// Mapping key not declared by a strict map
    UnknownKey,
    /// No alternative of a union accepted the value
    NoMatchingAlternative,
    /// Nesting deeper than the configured limit
    DepthExceeded,
}

/// One mismatch between a document and a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Where in the document the mismatch was found
    pub path: Path,
    /// Tag of the validator that reported it
    pub validator_tag: String,
    /// Human-readable reason
    pub reason: String,
    /// Failure category
    pub kind: FailureKind,
}

impl Failure {
    pub fn new(
        kind: FailureKind,
        path: &Path,
        validator_tag: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path: path.clone(),
            validator_tag: validator_tag.into(),
            reason: reason.into(),
            kind,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            f.write_str(&self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

use std::path::PathBuf;

/// Returned by [`CourseTable::try_insert`](crate::CourseTable::try_insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A record with the same identifier is already stored
    DuplicateKey,
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("course identifier already present"),
        }
    }
}

impl std::error::Error for InsertError {}

/// Why a catalog line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    /// Fewer than two fields
    MissingField,

    /// Identifier or title is empty after trimming
    EmptyField,

    /// Prerequisite token shorter than four characters or without a digit
    InvalidPrerequisite(String),

    /// Identifier already defined earlier in the same source
    DuplicateIdentifier(String),

    /// Prerequisite names a course the source never defines
    UnresolvedPrerequisite {
        course: String,
        prerequisite: String,
    },
}

impl std::fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField => f.write_str("missing course number or name"),
            Self::EmptyField => f.write_str("empty course number or name"),
            Self::InvalidPrerequisite(token) => {
                write!(f, "invalid prerequisite format '{token}'")
            }
            Self::DuplicateIdentifier(id) => write!(f, "duplicate course {id}"),
            Self::UnresolvedPrerequisite {
                course,
                prerequisite,
            } => write!(f, "unknown prerequisite {prerequisite} for course {course}"),
        }
    }
}

/// Represents errors that can occur while loading a course catalog
#[derive(Debug)]
pub enum LoadError {
    /// The source could not be opened; the table was not touched
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading failed part-way through; the table was left empty
    Io(std::io::Error),

    /// A line failed validation; the table was left empty
    MalformedRecord {
        /// 1-based, blank lines included
        line: usize,
        kind: MalformedKind,
    },
}

impl LoadError {
    /// `true` if the failed load emptied the table.
    pub fn cleared_table(&self) -> bool {
        !matches!(self, Self::SourceUnavailable { .. })
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "could not open file {}: {source}", path.display())
            }
            Self::Io(e) => write!(f, "failed to read course catalog: {e}"),
            Self::MalformedRecord { line, kind } => write!(f, "line {line}: {kind}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::MalformedRecord { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Catalog loading result
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_offending_line() {
        let e = LoadError::MalformedRecord {
            line: 3,
            kind: MalformedKind::DuplicateIdentifier("CSCI100".into()),
        };
        assert_eq!(e.to_string(), "line 3: duplicate course CSCI100");
        assert!(e.cleared_table());
        assert!(e.source().is_none());
    }

    #[test]
    fn source_unavailable_keeps_io_cause() {
        let e = LoadError::SourceUnavailable {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert!(e.to_string().starts_with("could not open file missing.csv"));
        assert!(!e.cleared_table());
        assert!(e.source().is_some());
    }
}

use core::fmt;

/// A course entry: identifier, title and the identifiers of its prerequisites.
///
/// The identifier is the table key and is compared byte-wise (case matters).
/// Records reachable from a [`CourseTable`](crate::CourseTable) always carry a
/// non-empty identifier and title; absence is expressed with `Option`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CourseRecord {
    pub identifier: String,
    pub title: String,
    /// In source order.
    pub prerequisites: Vec<String>,
}

impl CourseRecord {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

/// `ID, Title`, the listing format of the planner.
impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.identifier, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::CourseRecord;

    #[test]
    fn builder_keeps_prerequisite_order() {
        let r = CourseRecord::new("CSCI300", "Introduction to Algorithms")
            .with_prerequisites(["CSCI200", "MATH201"]);
        assert_eq!(r.prerequisites, vec!["CSCI200", "MATH201"]);
        assert!(r.has_prerequisites());
        assert!(!CourseRecord::new("CSCI100", "Intro").has_prerequisites());
    }

    #[test]
    fn display_is_listing_line() {
        let r = CourseRecord::new("CS101", "Intro");
        assert_eq!(r.to_string(), "CS101, Intro");
    }
}

//! Course catalog files: one course per line, comma separated.
//!
//! ```text
//! CSCI100,Introduction to Computer Science
//! CSCI101,Introduction to Programming in C++,CSCI100
//! ```
//!
//! Field order is identifier, title, then zero or more prerequisite
//! identifiers. Loads are fail-atomic: a rejected source leaves the table
//! empty, never partially filled.

use crate::course_table::CourseTable;
use crate::error::{LoadError, MalformedKind, Result};
use crate::record::CourseRecord;
use hashbrown::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Catalog the planner falls back to when no path is given.
pub const DEFAULT_CATALOG_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

const FIELD_SEPARATOR: char = ',';
const FIELD_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];
const MIN_PREREQUISITE_LEN: usize = 4;

fn contains_digit(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
}

/// Parses one catalog line.
///
/// Returns `Ok(None)` for a blank line. Empty prerequisite fields (as left
/// by a trailing comma) are skipped.
pub fn parse_line(line: &str) -> std::result::Result<Option<CourseRecord>, MalformedKind> {
    if line.trim_matches(FIELD_WHITESPACE).is_empty() {
        return Ok(None);
    }

    let mut fields = line
        .split(FIELD_SEPARATOR)
        .map(|f| f.trim_matches(FIELD_WHITESPACE));
    let (Some(identifier), Some(title)) = (fields.next(), fields.next()) else {
        return Err(MalformedKind::MissingField);
    };
    if identifier.is_empty() || title.is_empty() {
        return Err(MalformedKind::EmptyField);
    }

    let mut record = CourseRecord::new(identifier, title);
    for token in fields.filter(|t| !t.is_empty()) {
        if token.chars().count() < MIN_PREREQUISITE_LEN || !contains_digit(token) {
            return Err(MalformedKind::InvalidPrerequisite(token.to_owned()));
        }
        record.prerequisites.push(token.to_owned());
    }
    Ok(Some(record))
}

/// Parses and validates a whole catalog without touching any table.
///
/// Rejects the first malformed line, the first repeated identifier, and
/// then the first prerequisite naming a course the catalog never defines.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<Vec<CourseRecord>> {
    let mut records: Vec<(usize, CourseRecord)> = Vec::new();
    let mut identifiers: HashSet<String> = HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let record = match parse_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(kind) => return Err(LoadError::MalformedRecord { line: line_no, kind }),
        };
        if !identifiers.insert(record.identifier.clone()) {
            return Err(LoadError::MalformedRecord {
                line: line_no,
                kind: MalformedKind::DuplicateIdentifier(record.identifier),
            });
        }
        records.push((line_no, record));
    }

    for (line_no, record) in &records {
        if let Some(missing) = record
            .prerequisites
            .iter()
            .find(|p| !identifiers.contains(p.as_str()))
        {
            return Err(LoadError::MalformedRecord {
                line: *line_no,
                kind: MalformedKind::UnresolvedPrerequisite {
                    course: record.identifier.clone(),
                    prerequisite: missing.clone(),
                },
            });
        }
    }

    Ok(records.into_iter().map(|(_, record)| record).collect())
}

/// Replaces the contents of `table` with the catalog read from `reader`.
///
/// The table is cleared first and stays empty if the catalog is rejected.
/// Returns the number of courses loaded.
pub fn load_into<R: BufRead>(table: &mut CourseTable, reader: R) -> Result<usize> {
    table.clear();
    let records = parse_catalog(reader)?;
    let count = records.len();
    table.extend(records);
    debug_assert_eq!(table.len(), count);
    Ok(count)
}

/// Opens `path` and loads it with [`load_into`].
///
/// If the file cannot be opened the table is left as it was.
pub fn load_file<P: AsRef<Path>>(table: &mut CourseTable, path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("loading courses from {}", path.display());
    let result = load_into(table, BufReader::new(file));
    match &result {
        Ok(count) => log::info!(
            "loaded {count} courses from {} into {} buckets",
            path.display(),
            table.capacity()
        ),
        Err(e) => log::warn!("rejected course catalog {}: {e}", path.display()),
    }
    result
}

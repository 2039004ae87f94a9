use crate::badge_file::error::BadgeFileError;
use crate::badge_file::{BadgeHolder, STUDENTS_CSV_HEADLINE, TEACHERS_CSV_HEADLINE};
use csv::ReaderBuilder;
use dto::student::Student;
use dto::teacher::Teacher;
use indexmap::IndexMap;
use log::{error, warn};
use std::collections::HashMap;
use std::fs::File;

const STUDENTS_IDENTIFICATION_COLUMN: usize = 1;
const STUDENTS_BADGE_COLUMN: usize = 4;
const TEACHERS_IDENTIFICATION_COLUMN: usize = 1;
const TEACHERS_BADGE_COLUMN: usize = 3;

/// Read badge assignments back from a scanned students badge file.
pub fn import_students_badge_file(
    file_path: &str,
    students: &IndexMap<u32, Student>,
) -> Result<IndexMap<u32, String>, BadgeFileError> {
    import_badge_file(
        file_path,
        STUDENTS_CSV_HEADLINE,
        STUDENTS_IDENTIFICATION_COLUMN,
        STUDENTS_BADGE_COLUMN,
        students,
    )
}

/// Read badge assignments back from a scanned teachers badge file.
pub fn import_teachers_badge_file(
    file_path: &str,
    teachers: &IndexMap<u32, Teacher>,
) -> Result<IndexMap<u32, String>, BadgeFileError> {
    import_badge_file(
        file_path,
        TEACHERS_CSV_HEADLINE,
        TEACHERS_IDENTIFICATION_COLUMN,
        TEACHERS_BADGE_COLUMN,
        teachers,
    )
}

/// Parse a filled-in badge file into a batch of (entry id, badge code) assignments.
///
/// The headline must match the exported one byte for byte. Lines which can't
/// be matched to a roster entry, or whose entry already carries a badge, are
/// logged and skipped. When the same identification code appears on several
/// lines, the last one wins.
fn import_badge_file<E: BadgeHolder>(
    file_path: &str,
    expected_headline: &str,
    identification_column: usize,
    badge_column: usize,
    entries: &IndexMap<u32, E>,
) -> Result<IndexMap<u32, String>, BadgeFileError> {
    if file_path.is_empty() {
        return Err(BadgeFileError::NoFileSelected);
    }

    let file = File::open(file_path).map_err(BadgeFileError::CantOpenBadgeFile)?;
    let records = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(file)
        .into_records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(BadgeFileError::CantReadBadgeFile)?;

    if records.len() <= 1 {
        return Err(BadgeFileError::NoValidData);
    }

    let headline = records[0].iter().collect::<Vec<_>>().join(",");
    if headline != expected_headline {
        return Err(BadgeFileError::InvalidHeadline);
    }

    let mut index: HashMap<&str, u32> = HashMap::new();
    for (id, entry) in entries {
        index.entry(entry.identification_code()).or_insert(*id);
    }

    let mut batch = IndexMap::new();
    for line in &records[1..] {
        let (Some(identification_code), Some(badge_code)) =
            (line.get(identification_column), line.get(badge_column))
        else {
            error!("Line '{}' is incomplete", line.iter().collect::<Vec<_>>().join(","));
            continue;
        };
        if badge_code.is_empty() {
            continue;
        }

        let Some(id) = index.get(identification_code) else {
            error!("Entry with identification code '{identification_code}' does not exist");
            continue;
        };
        if !entries[id].badge_code().is_empty() {
            warn!("Entry with identification code '{identification_code}' already has a badge");
            continue;
        }

        batch.insert(*id, badge_code.to_owned());
    }

    Ok(batch)
}

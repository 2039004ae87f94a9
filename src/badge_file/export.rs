use crate::badge_file::error::BadgeFileError;
use crate::badge_file::{
    STUDENTS_BADGE_FILE_NAME, STUDENTS_CSV_HEADLINE, TEACHERS_BADGE_FILE_NAME,
    TEACHERS_CSV_HEADLINE,
};
use csv::{QuoteStyle, WriterBuilder};
use dto::student::Student;
use dto::teacher::Teacher;
use indexmap::IndexMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Write the selected students into the badge printing file, one line each,
/// in roster order. Existing files are overwritten.
pub fn export_students(
    folder: &OsStr,
    students: &IndexMap<u32, Student>,
) -> Result<(), BadgeFileError> {
    let rows = students
        .values()
        .map(|student| {
            vec![
                student.name().clone(),
                student.identification_code().clone(),
                student.student_code().clone(),
                student.barcode(),
                student.badge_code().clone(),
            ]
        })
        .collect::<Vec<_>>();

    write_badge_file(folder, STUDENTS_BADGE_FILE_NAME, STUDENTS_CSV_HEADLINE, rows)
}

/// Write the selected teachers into the badge printing file.
pub fn export_teachers(
    folder: &OsStr,
    teachers: &IndexMap<u32, Teacher>,
) -> Result<(), BadgeFileError> {
    let rows = teachers
        .values()
        .map(|teacher| {
            vec![
                teacher.name().clone(),
                teacher.identification_code().clone(),
                teacher.barcode(),
                teacher.badge_code().clone(),
            ]
        })
        .collect::<Vec<_>>();

    write_badge_file(folder, TEACHERS_BADGE_FILE_NAME, TEACHERS_CSV_HEADLINE, rows)
}

/// The badge printer chokes on quoted fields, so quoting stays disabled.
fn write_badge_file(
    folder: &OsStr,
    file_name: &str,
    headline: &str,
    rows: Vec<Vec<String>>,
) -> Result<(), BadgeFileError> {
    fs::create_dir_all(folder).map_err(BadgeFileError::BadgeFileFolderCreationFailed)?;

    let file_path = Path::new(folder).join(file_name);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_path(file_path)
        .map_err(BadgeFileError::CantWriteBadgeFile)?;

    writer
        .write_record(headline.split(','))
        .map_err(BadgeFileError::CantWriteBadgeFile)?;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(BadgeFileError::CantWriteBadgeFile)?;
    }

    writer.flush().map_err(BadgeFileError::CantFlushBadgeFile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test::tests::temp_dir;
    use dto::teacher::Teacher;
    use std::fs;

    #[test]
    fn should_export_students() {
        let folder = temp_dir();
        let students = IndexMap::from([
            (11, Student::new_test(11, "71234567B", "0102030405")),
            (12, Student::new_test(12, "71234567C", "")),
        ]);

        export_students(folder.as_os_str(), &students).unwrap();

        let content = fs::read_to_string(folder.join(STUDENTS_BADGE_FILE_NAME)).unwrap();
        assert_eq!(
            "Nombre,DNI,Código alumno,Barcode,RFID\n\
             Student 11,71234567B,11,000000011,0102030405\n\
             Student 12,71234567C,12,000000012,\n",
            content
        );
    }

    #[test]
    fn should_export_teachers() {
        let folder = temp_dir();
        let teachers = IndexMap::from([(51, Teacher::new_test(51, "71234567B", ""))]);

        export_teachers(folder.as_os_str(), &teachers).unwrap();

        let content = fs::read_to_string(folder.join(TEACHERS_BADGE_FILE_NAME)).unwrap();
        assert_eq!(
            "Nombre,DNI,Barcode,RFID\n\
             Teacher 51,71234567B,71234567B,\n",
            content
        );
    }

    #[test]
    fn should_create_missing_folder() {
        let folder = temp_dir().join("nested");
        let students = IndexMap::new();

        export_students(folder.as_os_str(), &students).unwrap();

        let content = fs::read_to_string(folder.join(STUDENTS_BADGE_FILE_NAME)).unwrap();
        assert_eq!("Nombre,DNI,Código alumno,Barcode,RFID\n", content);
    }
}

use dto::student::Student;
use dto::teacher::Teacher;
use std::ffi::OsStr;

pub mod error;
pub mod export;
pub mod import;

pub const STUDENTS_CSV_HEADLINE: &str = "Nombre,DNI,Código alumno,Barcode,RFID";
pub const TEACHERS_CSV_HEADLINE: &str = "Nombre,DNI,Barcode,RFID";
pub const STUDENTS_BADGE_FILE_NAME: &str = "students.csv";
pub const TEACHERS_BADGE_FILE_NAME: &str = "teacher.csv";

const BADGE_FILE_FOLDER: &str = "data";

pub fn get_badge_file_folder() -> &'static OsStr {
    BADGE_FILE_FOLDER.as_ref()
}

/// Anyone a badge can be assigned to.
/// The identification code is what badge files key their lines on.
pub trait BadgeHolder {
    fn identification_code(&self) -> &str;
    fn badge_code(&self) -> &str;
}

impl BadgeHolder for Student {
    fn identification_code(&self) -> &str {
        Student::identification_code(self)
    }

    fn badge_code(&self) -> &str {
        Student::badge_code(self)
    }
}

impl BadgeHolder for Teacher {
    fn identification_code(&self) -> &str {
        Teacher::identification_code(self)
    }

    fn badge_code(&self) -> &str {
        Teacher::badge_code(self)
    }
}

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const BARCODE_LENGTH: usize = 9; // 8 digits + 1 letter

/// A student as displayed in the roster table.
/// The badge code is the RFID identifier of the linked user;
/// an empty string means no badge has been assigned yet.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Student {
    id: u32,
    user_id: u32,
    name: String,
    identification_code: String,
    student_code: String,
    courses: BTreeSet<String>,
    badge_code: String,
}

impl Student {
    pub fn new(
        id: u32,
        user_id: u32,
        name: String,
        identification_code: String,
        student_code: String,
        courses: BTreeSet<String>,
        badge_code: String,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            identification_code,
            student_code,
            courses,
            badge_code,
        }
    }

    /// The student code padded with zeros up to the fixed barcode width.
    /// Students without a student code fall back to their identification code,
    /// pending the migration to a dedicated code field.
    pub fn barcode(&self) -> String {
        if self.student_code.is_empty() {
            self.identification_code.clone()
        } else {
            let zeros = BARCODE_LENGTH.saturating_sub(self.student_code.len());
            format!("{}{}", "0".repeat(zeros), self.student_code)
        }
    }

    pub fn is_in_course(&self, course_name: &str) -> bool {
        self.courses.contains(course_name)
    }

    pub fn has_badge(&self) -> bool {
        !self.badge_code.is_empty()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.identification_code.clone(),
            self.student_code.clone(),
            self.badge_code.clone(),
        ]
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    impl Student {
        pub fn new_test(id: u32, identification_code: &str, badge_code: &str) -> Self {
            Student {
                id,
                user_id: id + 100,
                name: format!("Student {id}"),
                identification_code: identification_code.to_owned(),
                student_code: id.to_string(),
                courses: BTreeSet::new(),
                badge_code: badge_code.to_owned(),
            }
        }
    }

    #[parameterized(
        student_code = {"123", "12345678A", "1234567890"},
        expected_barcode = {"000000123", "12345678A", "1234567890"}
    )]
    fn should_pad_barcode(student_code: &str, expected_barcode: &str) {
        let student = Student::new(
            1,
            2,
            "Jon Doe".to_owned(),
            "71234567B".to_owned(),
            student_code.to_owned(),
            BTreeSet::new(),
            "".to_owned(),
        );

        assert_eq!(expected_barcode, student.barcode());
    }

    #[test]
    fn should_fall_back_to_identification_code_when_no_student_code() {
        let student = Student::new(
            1,
            2,
            "Jon Doe".to_owned(),
            "71234567B".to_owned(),
            "".to_owned(),
            BTreeSet::new(),
            "".to_owned(),
        );

        assert_eq!("71234567B", student.barcode());
    }

    #[test]
    fn should_match_course() {
        let courses = BTreeSet::from(["Welding".to_owned(), "Robotics".to_owned()]);
        let student = Student::new(
            1,
            2,
            "Jon Doe".to_owned(),
            "71234567B".to_owned(),
            "123".to_owned(),
            courses,
            "".to_owned(),
        );

        assert!(student.is_in_course("Robotics"));
        assert!(!student.is_in_course("Pottery"));
    }

    #[test]
    fn should_project_row() {
        let student = Student::new(
            1,
            2,
            "Jon Doe".to_owned(),
            "71234567B".to_owned(),
            "123".to_owned(),
            BTreeSet::new(),
            "0102030405".to_owned(),
        );

        assert_eq!(
            vec!["Jon Doe", "71234567B", "123", "0102030405"],
            student.to_row()
        );
        assert!(student.has_badge());
    }
}

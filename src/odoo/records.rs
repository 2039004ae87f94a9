use derive_getters::Getters;
use serde::Deserialize;

// Raw records as returned by the records server.
// Odoo answers `false` for empty char fields and for unset many2one
// references, hence the dedicated deserializers below.

#[derive(Debug, Deserialize, Getters, PartialEq, Clone)]
pub struct CourseRecord {
    id: u32,
    display_name: String,
}

#[derive(Debug, Deserialize, Getters, PartialEq, Clone)]
pub struct EnrollmentRecord {
    id: u32,
    #[serde(deserialize_with = "reference_format::deserialize_optional")]
    course_id: Option<Reference>,
}

#[derive(Debug, Deserialize, Getters, PartialEq, Clone)]
pub struct UserRecord {
    id: u32,
    #[serde(
        rename = "kardex_remstar_xp_rfid",
        default,
        deserialize_with = "text_format::deserialize_falsy"
    )]
    badge_code: String,
}

#[derive(Debug, Deserialize, Getters, PartialEq, Clone)]
pub struct StudentRecord {
    id: u32,
    display_name: String,
    #[serde(default, deserialize_with = "text_format::deserialize_falsy")]
    identification_code: String,
    #[serde(
        rename = "gr_no",
        default,
        deserialize_with = "text_format::deserialize_falsy"
    )]
    student_code: String,
    #[serde(default)]
    course_detail_ids: Vec<u32>,
    #[serde(default, deserialize_with = "reference_format::deserialize_optional")]
    user_id: Option<Reference>,
}

#[derive(Debug, Deserialize, Getters, PartialEq, Clone)]
pub struct TeacherRecord {
    id: u32,
    display_name: String,
    #[serde(default, deserialize_with = "text_format::deserialize_falsy")]
    identification_code: String,
    #[serde(default, deserialize_with = "reference_format::deserialize_optional")]
    user_id: Option<Reference>,
}

/// A many2one reference, serialized by Odoo as an `[id, display name]` pair.
#[derive(Debug, Getters, PartialEq, Clone)]
pub struct Reference {
    id: u32,
    name: String,
}

mod reference_format {
    use super::Reference;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawReference {
        Pair(u32, String),
        Absent(bool),
    }

    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Reference>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawReference::deserialize(deserializer)? {
            RawReference::Pair(id, name) => Ok(Some(Reference { id, name })),
            RawReference::Absent(_) => Ok(None),
        }
    }
}

mod text_format {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        // Some legacy code fields hold plain numbers.
        Number(u64),
        Absent(bool),
    }

    pub fn deserialize_falsy<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawText::deserialize(deserializer)? {
            RawText::Text(text) => Ok(text),
            RawText::Number(number) => Ok(number.to_string()),
            RawText::Absent(_) => Ok(String::new()),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    impl CourseRecord {
        pub fn new_test(id: u32, display_name: &str) -> Self {
            CourseRecord {
                id,
                display_name: display_name.to_owned(),
            }
        }
    }

    impl EnrollmentRecord {
        pub fn new_test(id: u32, course: Option<(u32, &str)>) -> Self {
            EnrollmentRecord {
                id,
                course_id: course.map(|(id, name)| Reference {
                    id,
                    name: name.to_owned(),
                }),
            }
        }
    }

    impl UserRecord {
        pub fn new_test(id: u32, badge_code: &str) -> Self {
            UserRecord {
                id,
                badge_code: badge_code.to_owned(),
            }
        }
    }

    impl StudentRecord {
        pub fn new_test(
            id: u32,
            display_name: &str,
            identification_code: &str,
            student_code: &str,
            course_detail_ids: Vec<u32>,
            user_id: Option<u32>,
        ) -> Self {
            StudentRecord {
                id,
                display_name: display_name.to_owned(),
                identification_code: identification_code.to_owned(),
                student_code: student_code.to_owned(),
                course_detail_ids,
                user_id: user_id.map(|id| Reference {
                    id,
                    name: display_name.to_owned(),
                }),
            }
        }
    }

    impl TeacherRecord {
        pub fn new_test(
            id: u32,
            display_name: &str,
            identification_code: &str,
            user_id: Option<u32>,
        ) -> Self {
            TeacherRecord {
                id,
                display_name: display_name.to_owned(),
                identification_code: identification_code.to_owned(),
                user_id: user_id.map(|id| Reference {
                    id,
                    name: display_name.to_owned(),
                }),
            }
        }
    }

    pub fn get_student_record_as_json() -> &'static str {
        r#"{"id":11,"display_name":"Jon Doe","identification_code":"71234567B","gr_no":"123","course_detail_ids":[21,22],"user_id":[31,"Jon Doe"]}"#
    }

    pub fn get_expected_student_record() -> StudentRecord {
        StudentRecord {
            id: 11,
            display_name: "Jon Doe".to_owned(),
            identification_code: "71234567B".to_owned(),
            student_code: "123".to_owned(),
            course_detail_ids: vec![21, 22],
            user_id: Some(Reference {
                id: 31,
                name: "Jon Doe".to_owned(),
            }),
        }
    }

    #[test]
    fn should_deserialize_student_record() {
        let result: StudentRecord = serde_json::from_str(get_student_record_as_json()).unwrap();

        assert_eq!(get_expected_student_record(), result);
    }

    #[test]
    fn should_deserialize_student_record_with_falsy_fields() {
        let json = r#"{"id":11,"display_name":"Jon Doe","identification_code":false,"gr_no":false,"course_detail_ids":[],"user_id":false}"#;

        let result: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!("", result.identification_code());
        assert_eq!("", result.student_code());
        assert_eq!(&None, result.user_id());
    }

    #[test]
    fn should_deserialize_numeric_student_code() {
        let json = r#"{"id":11,"display_name":"Jon Doe","identification_code":"71234567B","gr_no":123,"course_detail_ids":[],"user_id":[31,"Jon Doe"]}"#;

        let result: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!("123", result.student_code());
    }

    #[parameterized(
        json = {
            r#"{"id":31,"kardex_remstar_xp_rfid":"0102030405"}"#,
            r#"{"id":31,"kardex_remstar_xp_rfid":false}"#,
            r#"{"id":31}"#,
        },
        expected_badge_code = {"0102030405", "", ""}
    )]
    fn should_deserialize_user_record(json: &str, expected_badge_code: &str) {
        let result: UserRecord = serde_json::from_str(json).unwrap();

        assert_eq!(expected_badge_code, result.badge_code());
    }

    #[test]
    fn should_deserialize_enrollment_record() {
        let json = r#"{"id":21,"course_id":[41,"Robotics"]}"#;

        let result: EnrollmentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(
            &Some(Reference {
                id: 41,
                name: "Robotics".to_owned()
            }),
            result.course_id()
        );
    }

    #[test]
    fn should_deserialize_teacher_record_without_user() {
        let json = r#"{"id":51,"display_name":"Jane Roe","identification_code":"71234567C","user_id":false}"#;

        let result: TeacherRecord = serde_json::from_str(json).unwrap();

        assert_eq!(&None, result.user_id());
    }
}

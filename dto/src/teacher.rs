use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A teacher as displayed in the roster table.
/// Teachers have no student code, so their barcode is their identification code.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Teacher {
    id: u32,
    user_id: u32,
    name: String,
    identification_code: String,
    badge_code: String,
}

impl Teacher {
    pub fn new(
        id: u32,
        user_id: u32,
        name: String,
        identification_code: String,
        badge_code: String,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            identification_code,
            badge_code,
        }
    }

    pub fn barcode(&self) -> String {
        self.identification_code.clone()
    }

    pub fn has_badge(&self) -> bool {
        !self.badge_code.is_empty()
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.identification_code.clone(),
            self.badge_code.clone(),
        ]
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl Teacher {
        pub fn new_test(id: u32, identification_code: &str, badge_code: &str) -> Self {
            Teacher {
                id,
                user_id: id + 100,
                name: format!("Teacher {id}"),
                identification_code: identification_code.to_owned(),
                badge_code: badge_code.to_owned(),
            }
        }
    }

    #[test]
    fn should_use_identification_code_as_barcode() {
        let teacher = Teacher::new(
            1,
            2,
            "Jane Roe".to_owned(),
            "71234567B".to_owned(),
            "".to_owned(),
        );

        assert_eq!("71234567B", teacher.barcode());
        assert!(!teacher.has_badge());
    }

    #[test]
    fn should_project_row() {
        let teacher = Teacher::new(
            1,
            2,
            "Jane Roe".to_owned(),
            "71234567B".to_owned(),
            "0102030405".to_owned(),
        );

        assert_eq!(vec!["Jane Roe", "71234567B", "0102030405"], teacher.to_row());
    }
}

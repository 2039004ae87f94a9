use crate::error::Result;
use crate::odoo::records::{CourseRecord, EnrollmentRecord, StudentRecord, UserRecord};
use crate::odoo::session::OdooSession;
use crate::roster::index_by;
use derive_getters::Getters;
use dto::student::Student;
use indexmap::IndexMap;
use log::error;
use std::collections::BTreeSet;

/// Everything needed to rebuild the students roster,
/// fetched from the records server in one go
/// so no lock has to be held across the wire calls.
pub struct StudentsSnapshot {
    courses: Vec<CourseRecord>,
    enrollments: Vec<EnrollmentRecord>,
    users: Vec<UserRecord>,
    students: Vec<StudentRecord>,
}

impl StudentsSnapshot {
    pub async fn fetch(session: &OdooSession) -> Result<Self> {
        Ok(Self {
            courses: session.get_all_courses().await?,
            enrollments: session.get_all_enrollments().await?,
            users: session.get_all_users().await?,
            students: session.get_all_students().await?,
        })
    }
}

/// The students working set: the full roster and the currently selected subset.
/// Both are keyed by student identifier and keep the server's return order.
#[derive(Getters, Default)]
pub struct StudentsRoster {
    all_students: IndexMap<u32, Student>,
    selected_students: IndexMap<u32, Student>,
    course_names: Vec<String>,
}

impl StudentsRoster {
    /// Clear the roster and rebuild it wholesale from a snapshot.
    /// A student whose linked user can't be resolved is logged and dropped,
    /// never stored as a partial entry.
    pub fn rebuild(&mut self, snapshot: StudentsSnapshot) {
        self.all_students.clear();
        self.selected_students.clear();

        let enrollments = index_by(snapshot.enrollments, |enrollment| *enrollment.id());
        let users = index_by(snapshot.users, |user| *user.id());

        for record in snapshot.students {
            let Some(user) = record
                .user_id()
                .as_ref()
                .and_then(|reference| users.get(reference.id()))
            else {
                error!("User for student '{}' does not exist", record.display_name());
                continue;
            };

            let courses = record
                .course_detail_ids()
                .iter()
                .filter_map(|enrollment_id| enrollments.get(enrollment_id))
                .filter_map(|enrollment| enrollment.course_id().as_ref())
                .map(|course| course.name().clone())
                .collect::<BTreeSet<_>>();

            let student = Student::new(
                *record.id(),
                *user.id(),
                record.display_name().clone(),
                record.identification_code().clone(),
                record.student_code().clone(),
                courses,
                user.badge_code().clone(),
            );
            self.all_students.insert(*record.id(), student);
        }

        self.selected_students = self.all_students.clone();
        self.course_names = snapshot
            .courses
            .iter()
            .map(|course| course.display_name().clone())
            .collect();
    }

    /// Replace the selected subset by filtering the full roster.
    /// An empty course name means "no course filter".
    /// When `with_badge` is false, only badge-less students are kept.
    pub fn filter(&mut self, course_name: &str, with_badge: bool) {
        let course_filtered: IndexMap<u32, Student> = if course_name.is_empty() {
            self.all_students.clone()
        } else {
            self.all_students
                .iter()
                .filter(|(_, student)| student.is_in_course(course_name))
                .map(|(id, student)| (*id, student.clone()))
                .collect()
        };

        self.selected_students = if with_badge {
            course_filtered
        } else {
            course_filtered
                .into_iter()
                .filter(|(_, student)| !student.has_badge())
                .collect()
        };
    }

    /// The rows of the selected subset, in table display order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.selected_students
            .values()
            .map(|student| student.to_row())
            .collect()
    }

    /// Resolve a badge-assignment batch into (user id, badge code) pairs.
    /// Entries which left the roster since the import are logged and skipped.
    pub fn resolve_badge_writes(&self, batch: IndexMap<u32, String>) -> Vec<(u32, String)> {
        batch
            .into_iter()
            .filter_map(
                |(student_id, badge_code)| match self.all_students.get(&student_id) {
                    Some(student) => Some((*student.user_id(), badge_code)),
                    None => {
                        error!("Student '{student_id}' is not part of the roster");
                        None
                    }
                },
            )
            .collect()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn get_test_snapshot() -> StudentsSnapshot {
        StudentsSnapshot {
            courses: vec![
                CourseRecord::new_test(41, "Robotics"),
                CourseRecord::new_test(42, "Welding"),
            ],
            enrollments: vec![
                EnrollmentRecord::new_test(21, Some((41, "Robotics"))),
                EnrollmentRecord::new_test(22, Some((42, "Welding"))),
            ],
            users: vec![
                UserRecord::new_test(31, "0102030405"),
                UserRecord::new_test(32, ""),
            ],
            students: vec![
                StudentRecord::new_test(11, "Jon Doe", "71234567B", "123", vec![21], Some(31)),
                StudentRecord::new_test(12, "Jane Roe", "71234567C", "124", vec![21, 22], Some(32)),
                StudentRecord::new_test(13, "Jim Poe", "71234567D", "125", vec![], None),
                StudentRecord::new_test(14, "Joe Moe", "71234567E", "126", vec![], Some(99)),
            ],
        }
    }

    pub fn get_test_roster() -> StudentsRoster {
        let mut roster = StudentsRoster::default();
        roster.rebuild(get_test_snapshot());
        roster
    }

    // region rebuild
    #[test]
    fn should_drop_students_without_resolvable_user() {
        let roster = get_test_roster();

        // 13 has no user reference, 14 references an unknown user.
        assert_eq!(
            vec![&11, &12],
            roster.all_students().keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_keep_server_return_order() {
        let mut roster = StudentsRoster::default();
        let mut snapshot = get_test_snapshot();
        snapshot.students.reverse();

        roster.rebuild(snapshot);

        assert_eq!(
            vec![&12, &11],
            roster.all_students().keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_derive_courses_and_badge() {
        let roster = get_test_roster();

        let jon = roster.all_students().get(&11).unwrap();
        assert_eq!(
            &BTreeSet::from(["Robotics".to_owned()]),
            jon.courses()
        );
        assert_eq!("0102030405", jon.badge_code());

        let jane = roster.all_students().get(&12).unwrap();
        assert_eq!(
            &BTreeSet::from(["Robotics".to_owned(), "Welding".to_owned()]),
            jane.courses()
        );
        assert_eq!("", jane.badge_code());
    }

    #[test]
    fn should_select_everyone_after_rebuild() {
        let roster = get_test_roster();

        assert_eq!(roster.all_students(), roster.selected_students());
        assert_eq!(
            vec!["Robotics".to_owned(), "Welding".to_owned()],
            *roster.course_names()
        );
    }
    // endregion

    // region filter
    #[test]
    fn should_filter_by_course() {
        let mut roster = get_test_roster();

        roster.filter("Welding", true);

        assert_eq!(
            vec![&12],
            roster.selected_students().keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_filter_by_badge_absence() {
        let mut roster = get_test_roster();

        roster.filter("", false);

        assert_eq!(
            vec![&12],
            roster.selected_students().keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_filter_by_course_and_badge_absence() {
        let mut roster = get_test_roster();

        roster.filter("Robotics", false);

        assert_eq!(
            vec![&12],
            roster.selected_students().keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_select_everyone_when_no_filter() {
        let mut roster = get_test_roster();
        roster.filter("Welding", false);

        roster.filter("", true);

        assert_eq!(roster.all_students(), roster.selected_students());
    }

    #[test]
    fn should_filter_idempotently() {
        let mut roster = get_test_roster();

        roster.filter("Robotics", false);
        let first_pass = roster.selected_students().clone();
        roster.filter("Robotics", false);

        assert_eq!(&first_pass, roster.selected_students());
    }
    // endregion

    #[test]
    fn should_resolve_badge_writes() {
        let roster = get_test_roster();
        let batch = IndexMap::from([
            (11, "1112131415".to_owned()),
            (99, "2122232425".to_owned()),
        ]);

        let writes = roster.resolve_badge_writes(batch);

        // 99 is unknown and gets skipped; 11 resolves to its linked user.
        assert_eq!(vec![(31, "1112131415".to_owned())], writes);
    }
}

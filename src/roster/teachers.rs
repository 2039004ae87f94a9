use crate::error::Result;
use crate::odoo::records::{TeacherRecord, UserRecord};
use crate::odoo::session::OdooSession;
use crate::roster::index_by;
use derive_getters::Getters;
use dto::teacher::Teacher;
use indexmap::IndexMap;
use log::error;

pub struct TeachersSnapshot {
    users: Vec<UserRecord>,
    teachers: Vec<TeacherRecord>,
}

impl TeachersSnapshot {
    pub async fn fetch(session: &OdooSession) -> Result<Self> {
        Ok(Self {
            users: session.get_all_users().await?,
            teachers: session.get_all_teachers().await?,
        })
    }
}

/// The teachers working set. Same shape as the students one,
/// minus the course dimension, which teachers don't have.
#[derive(Getters, Default)]
pub struct TeachersRoster {
    all_teachers: IndexMap<u32, Teacher>,
    selected_teachers: IndexMap<u32, Teacher>,
}

impl TeachersRoster {
    /// Clear the roster and rebuild it wholesale from a snapshot.
    /// A teacher whose linked user can't be resolved is logged and dropped.
    pub fn rebuild(&mut self, snapshot: TeachersSnapshot) {
        self.all_teachers.clear();
        self.selected_teachers.clear();

        let users = index_by(snapshot.users, |user| *user.id());

        for record in snapshot.teachers {
            let Some(user) = record
                .user_id()
                .as_ref()
                .and_then(|reference| users.get(reference.id()))
            else {
                error!("User for teacher '{}' does not exist", record.display_name());
                continue;
            };

            let teacher = Teacher::new(
                *record.id(),
                *user.id(),
                record.display_name().clone(),
                record.identification_code().clone(),
                user.badge_code().clone(),
            );
            self.all_teachers.insert(*record.id(), teacher);
        }

        self.selected_teachers = self.all_teachers.clone();
    }

    /// Replace the selected subset.
    /// When `with_badge` is false, only badge-less teachers are kept.
    pub fn filter(&mut self, with_badge: bool) {
        self.selected_teachers = if with_badge {
            self.all_teachers.clone()
        } else {
            self.all_teachers
                .iter()
                .filter(|(_, teacher)| !teacher.has_badge())
                .map(|(id, teacher)| (*id, teacher.clone()))
                .collect()
        };
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.selected_teachers
            .values()
            .map(|teacher| teacher.to_row())
            .collect()
    }

    /// Resolve a badge-assignment batch into (user id, badge code) pairs.
    /// Entries which left the roster since the import are logged and skipped.
    pub fn resolve_badge_writes(&self, batch: IndexMap<u32, String>) -> Vec<(u32, String)> {
        batch
            .into_iter()
            .filter_map(
                |(teacher_id, badge_code)| match self.all_teachers.get(&teacher_id) {
                    Some(teacher) => Some((*teacher.user_id(), badge_code)),
                    None => {
                        error!("Teacher '{teacher_id}' is not part of the roster");
                        None
                    }
                },
            )
            .collect()
    }
}

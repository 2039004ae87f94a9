use crate::odoo::credentials::OdooCredentials;
use crate::roster::students::StudentsRoster;
use crate::roster::teachers::TeachersRoster;
use crate::web::api::roster_state::RosterState;
use crate::web::api::{session_controller, students_controller, teachers_controller};
use crate::web::credentials_storage::CredentialsStorage;
use crate::web::server::Server;
use rocket::{Build, Rocket};
use std::sync::Mutex;

pub struct ApiServer {}

impl ApiServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for ApiServer {
    fn initialize_managed_states(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .manage(Mutex::new(CredentialsStorage::<OdooCredentials>::default()))
            .manage(Mutex::new(RosterState::<StudentsRoster>::default()))
            .manage(Mutex::new(RosterState::<TeachersRoster>::default()))
    }

    fn mount_routes(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build.mount(
            "/api/",
            routes![
                session_controller::login,
                students_controller::list_students,
                students_controller::refresh_students,
                students_controller::list_courses,
                students_controller::filter_students,
                students_controller::export_students_file,
                students_controller::import_students_file,
                students_controller::write_students_badges,
                teachers_controller::list_teachers,
                teachers_controller::refresh_teachers,
                teachers_controller::filter_teachers,
                teachers_controller::export_teachers_file,
                teachers_controller::import_teachers_file,
                teachers_controller::write_teachers_badges,
            ],
        )
    }
}

use crate::web::server::build_server;
use rocket::{Build, Rocket};

pub mod api;
pub mod authentication;
pub mod credentials_storage;
pub mod error;
mod server;

pub fn start_server() -> Rocket<Build> {
    build_server()
}

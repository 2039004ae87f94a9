mod badge_file;
mod error;
mod odoo;
mod roster;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::web::start_server;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    start_server()
}

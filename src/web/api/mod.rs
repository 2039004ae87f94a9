use crate::badge_file::error::BadgeFileError;
use crate::error::ApplicationError;
use crate::odoo::error::OdooError;
use log::error;
use rocket::http::Status;

pub mod roster_state;
pub mod server;
pub mod session_controller;
pub mod students_controller;
pub mod teachers_controller;

/// Login and remote-call failures are shown to the user verbatim,
/// hence a status per failure cause rather than a blanket 500.
fn error_response(error: ApplicationError) -> (Status, String) {
    let status = match &error {
        ApplicationError::Odoo(OdooError::MissingLoginParameters) => Status::UnprocessableEntity,
        ApplicationError::Odoo(OdooError::WrongCredentials(_)) => Status::Unauthorized,
        ApplicationError::Odoo(OdooError::UnreachableDatabase(_))
        | ApplicationError::Odoo(OdooError::UnreachableHost(_))
        | ApplicationError::Odoo(OdooError::ServerFault(_))
        | ApplicationError::Odoo(OdooError::MalformedResponse) => Status::BadGateway,
        _ => Status::InternalServerError,
    };

    (status, error.to_string())
}

fn badge_file_error_response(error: BadgeFileError) -> (Status, String) {
    error!("{error:#?}");
    let status = match &error {
        BadgeFileError::NoFileSelected
        | BadgeFileError::CantOpenBadgeFile(_)
        | BadgeFileError::CantReadBadgeFile(_)
        | BadgeFileError::NoValidData
        | BadgeFileError::InvalidHeadline => Status::UnprocessableEntity,
        _ => Status::InternalServerError,
    };

    (status, error.to_string())
}

fn internal_error() -> (Status, String) {
    (
        Status::InternalServerError,
        "Something went wrong on our side.".to_owned(),
    )
}

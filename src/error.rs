use crate::odoo::error::OdooError;
use crate::web::error::WebError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Error while talking to the records server.")]
    Odoo(#[from] OdooError),
    #[error("An error has been encountered while preparing requests to another server.")]
    Web(#[from] WebError),
}

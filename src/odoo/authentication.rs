use crate::odoo::credentials::OdooCredentials;
use crate::web::authentication;
use rocket::request::FromRequest;
use rocket::{Request, request};

pub const AUTHENTICATION_COOKIE: &str = "Records-Authentication";

/// If an endpoint requires a logged-in records-server session to be called,
/// then its implementation should require an [OdooCredentials] parameter.
/// Rocket will summon this guard to ensure such credentials exist.
/// If they don't, then the caller receives an Unauthorized status.
///
/// The credentials are resolved from a `Records-Authentication` private cookie.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for OdooCredentials {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        authentication::from_request(req, AUTHENTICATION_COOKIE).await
    }
}

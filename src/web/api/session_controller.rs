use crate::odoo::authentication::AUTHENTICATION_COOKIE;
use crate::odoo::credentials::OdooCredentials;
use crate::odoo::session::OdooSession;
use crate::tools::log_error_and_return;
use crate::web::api::{error_response, internal_error};
use crate::web::credentials_storage::CredentialsStorage;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::serde::json::Json;
use rocket::time::Duration;
use rocket::State;
use std::sync::Mutex;
use uuid::Uuid;

/// Try and log a user onto the records server.
/// If the login operation succeeds,
/// then a new UUID is created and credentials are stored with this UUID.
/// The UUID is returned to the caller through a private cookie, so that it is their new access token.
#[post("/login", format = "application/json", data = "<credentials>")]
pub async fn login(
    credentials_storage: &State<Mutex<CredentialsStorage<OdooCredentials>>>,
    cookie_jar: &CookieJar<'_>,
    credentials: Json<OdooCredentials>,
) -> Result<Status, (Status, String)> {
    let credentials = credentials.into_inner();
    match OdooSession::connect(&credentials).await {
        Ok(_) => {
            let mut mutex = credentials_storage
                .lock()
                .map_err(log_error_and_return(internal_error()))?;
            let uuid = Uuid::new_v4().to_string();
            let cookie = Cookie::build((AUTHENTICATION_COOKIE.to_owned(), uuid.clone()))
                .max_age(Duration::days(365))
                .build();
            cookie_jar.add_private(cookie);
            (*mutex).store(uuid, credentials);
            Ok(Status::Ok)
        }
        Err(error) => Err(error_response(error)),
    }
}

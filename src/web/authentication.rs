use crate::tools::log_error_and_return;
use crate::web::credentials_storage::CredentialsStorage;
use rocket::State;
use rocket::http::{Cookie, Status};
use rocket::outcome::{Outcome, try_outcome};
use rocket::request::{self, Request};
use std::sync::Mutex;

/// Resolve the session token carried by an authentication cookie
/// into the credentials stored at login time.
/// Kept generic so each remote account kind can plug its own cookie name.
pub async fn from_request<'r, C: Clone + Send + Sync + 'static>(
    req: &'r Request<'_>,
    cookie_name: &str,
) -> request::Outcome<C, ()> {
    if let Some(cookie) = get_authentication_cookie(req, cookie_name) {
        let credentials_storage =
            try_outcome!(req.guard::<&State<Mutex<CredentialsStorage<C>>>>().await);
        match credentials_storage.lock() {
            Ok(mut credentials_storage) => match credentials_storage.get(cookie.value()) {
                None => Outcome::Forward(Status::Unauthorized),
                Some(credentials) => Outcome::Success(credentials.clone()),
            },
            Err(error) => {
                log_error_and_return(Outcome::Error((Status::InternalServerError, ())))(error)
            }
        }
    } else {
        Outcome::Forward(Status::Unauthorized)
    }
}

#[cfg(not(test))]
fn get_authentication_cookie<'a>(req: &'a Request, cookie_name: &str) -> Option<Cookie<'a>> {
    req.cookies().get_private(cookie_name)
}

/// For tests, we have to ensure the cookie is there, pending or not. Otherwise, it doesn't work.
/// Thus, the need to hijack the normal method.
#[cfg(test)]
fn get_authentication_cookie<'a>(req: &'a Request, cookie_name: &str) -> Option<Cookie<'a>> {
    req.cookies().get_pending(cookie_name)
}

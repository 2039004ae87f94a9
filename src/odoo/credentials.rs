use derive_getters::Getters;
use rocket::serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Everything the login form asks for.
/// The whole set is kept for the session lifetime,
/// as every later action reconnects with it.
#[derive(Serialize, Deserialize, Getters, PartialEq, Clone, Default)]
pub struct OdooCredentials {
    url: String,
    database: String,
    username: String,
    password: String,
    #[serde(default)]
    self_signed: bool,
}

impl OdooCredentials {
    /// The login form rejects a partial set of parameters before any request goes out.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty()
            && !self.database.is_empty()
            && !self.username.is_empty()
            && !self.password.is_empty()
    }
}

impl Debug for OdooCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Odoo Credentials {{url={}, database={}, username={}, password=MASKED, self_signed={}}}",
            self.url, self.database, self.username, self.self_signed
        )
    }
}

#[cfg(test)]
impl OdooCredentials {
    pub fn new(
        url: String,
        database: String,
        username: String,
        password: String,
        self_signed: bool,
    ) -> Self {
        Self {
            url,
            database,
            username,
            password,
            self_signed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        url = {"http://localhost", "", "http://localhost", "http://localhost", "http://localhost"},
        database = {"school", "school", "", "school", "school"},
        username = {"jon", "jon", "jon", "", "jon"},
        password = {"secret", "secret", "secret", "secret", ""},
        expected_result = {true, false, false, false, false}
    )]
    fn should_check_completeness(
        url: &str,
        database: &str,
        username: &str,
        password: &str,
        expected_result: bool,
    ) {
        let credentials = OdooCredentials::new(
            url.to_owned(),
            database.to_owned(),
            username.to_owned(),
            password.to_owned(),
            false,
        );

        assert_eq!(expected_result, credentials.is_complete());
    }

    #[test]
    fn should_mask_password_in_debug() {
        let credentials = OdooCredentials::new(
            "http://localhost".to_owned(),
            "school".to_owned(),
            "jon".to_owned(),
            "secret".to_owned(),
            true,
        );

        let debug = format!("{credentials:?}");
        assert!(debug.contains("MASKED"));
        assert!(!debug.contains("secret"));
    }
}

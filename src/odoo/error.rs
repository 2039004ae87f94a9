use thiserror::Error;

/// Failures while talking to the records server.
/// The login variants each carry their own user-facing message,
/// as the login form displays them verbatim.
#[derive(Debug, Error, PartialEq)]
pub enum OdooError {
    #[error("All login parameters must be set.")]
    MissingLoginParameters,
    #[error("Connection with the user '{0}' could not be authenticated.")]
    WrongCredentials(String),
    #[error("Connection to the database '{0}' could not be established.")]
    UnreachableDatabase(String),
    #[error("Connection to the server '{0}' could not be established.")]
    UnreachableHost(String),
    #[error("The records server reported a fault: {0}")]
    ServerFault(String),
    #[error("The records server answered with something unexpected.")]
    MalformedResponse,
    #[error("Couldn't write the badge code of user '{0}'.")]
    BadgeWriteFailed(u32),
}

use crate::tools::log_message_and_return;
use crate::web::error::WebError;
use crate::web::error::WebError::CantCreateClient;
use reqwest::Client;

/// Build the HTTP client used to talk to the records server.
/// The server may expose a self-signed certificate, in which case
/// certificate verification has to be turned off explicitly.
pub fn build_client(accept_invalid_certificates: bool) -> Result<Client, WebError> {
    reqwest::ClientBuilder::new()
        .danger_accept_invalid_certs(accept_invalid_certificates)
        .build()
        .map_err(log_message_and_return(
            "Can't build HTTP client.",
            CantCreateClient,
        ))
}

use crate::error::{ApplicationError, Result};
use crate::odoo::credentials::OdooCredentials;
use crate::odoo::error::OdooError::{
    BadgeWriteFailed, MalformedResponse, MissingLoginParameters, ServerFault, UnreachableDatabase,
    UnreachableHost, WrongCredentials,
};
use crate::tools::log_message_and_return;
use crate::tools::web::build_client;
use log::{debug, error};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const JSONRPC_ENDPOINT: &str = "/jsonrpc";
const BADGE_FIELD: &str = "kardex_remstar_xp_rfid";

/// An authenticated session against the records server.
/// Odoo's JSON-RPC endpoint is stateless:
/// the resolved user id and the password travel with every call.
#[cfg_attr(test, derive(Debug))]
pub struct OdooSession {
    client: Client,
    url: String,
    database: String,
    uid: u32,
    password: String,
}

impl OdooSession {
    /// Authenticate against the records server and return a session.
    /// Refuse to send anything when a login parameter is missing.
    pub async fn connect(credentials: &OdooCredentials) -> Result<Self> {
        if !credentials.is_complete() {
            return Err(ApplicationError::from(MissingLoginParameters));
        }

        let client = build_client(*credentials.self_signed())?;
        let uid = authenticate(&client, credentials).await?;
        debug!("Authenticated on '{}' with uid {uid}.", credentials.url());

        Ok(Self {
            client,
            url: credentials.url().clone(),
            database: credentials.database().clone(),
            uid,
            password: credentials.password().clone(),
        })
    }

    // region Record retrieval
    pub async fn get_all_courses(&self) -> Result<Vec<super::records::CourseRecord>> {
        self.search_read("op.course", &["id", "display_name"]).await
    }

    pub async fn get_all_enrollments(&self) -> Result<Vec<super::records::EnrollmentRecord>> {
        self.search_read("op.student.course", &["id", "course_id"])
            .await
    }

    pub async fn get_all_users(&self) -> Result<Vec<super::records::UserRecord>> {
        self.search_read("res.users", &["id", BADGE_FIELD]).await
    }

    pub async fn get_all_students(&self) -> Result<Vec<super::records::StudentRecord>> {
        self.search_read(
            "op.student",
            &[
                "id",
                "display_name",
                "identification_code",
                "gr_no",
                "course_detail_ids",
                "user_id",
            ],
        )
        .await
    }

    pub async fn get_all_teachers(&self) -> Result<Vec<super::records::TeacherRecord>> {
        self.search_read(
            "op.faculty",
            &["id", "display_name", "identification_code", "user_id"],
        )
        .await
    }
    // endregion

    /// Assign a badge code to the user behind a roster entry.
    /// One remote write per call; the caller decides what a partial failure means.
    pub async fn write_user_badge(&self, user_id: u32, badge_code: &str) -> Result<()> {
        let result = self
            .execute_kw(
                "res.users",
                "write",
                json!([[user_id], { BADGE_FIELD: badge_code }]),
                json!({}),
            )
            .await?;

        match result {
            Value::Bool(true) => Ok(()),
            other => {
                error!("Badge write for user '{user_id}' was refused: {other}");
                Err(ApplicationError::from(BadgeWriteFailed(user_id)))
            }
        }
    }

    async fn search_read<R: DeserializeOwned>(&self, model: &str, fields: &[&str]) -> Result<Vec<R>> {
        let result = self
            .execute_kw(model, "search_read", json!([[]]), json!({ "fields": fields }))
            .await?;
        let records = serde_json::from_value(result).map_err(log_message_and_return(
            "The records server answered with unexpected records.",
            MalformedResponse,
        ))?;

        Ok(records)
    }

    async fn execute_kw(&self, model: &str, method: &str, args: Value, kwargs: Value) -> Result<Value> {
        let request = prepare_request_for_execute_kw(self, model, method, args, kwargs);
        let response = request.send().await.map_err(log_message_and_return(
            "Request to the records server failed...",
            UnreachableHost(self.url.clone()),
        ))?;

        let status = response.status();
        if !status.is_success() {
            error!("Records server answered with status {status}...");
            return Err(ApplicationError::from(ServerFault(status.to_string())));
        }

        let payload: JsonRpcResponse = response.json().await.map_err(log_message_and_return(
            "Couldn't read the records server response.",
            MalformedResponse,
        ))?;
        if let Some(fault) = payload.error {
            error!("Records server fault on {model}.{method}: {}", fault.message);
            return Err(ApplicationError::from(ServerFault(fault.message)));
        }

        payload.result.ok_or(ApplicationError::from(MalformedResponse))
    }
}

async fn authenticate(client: &Client, credentials: &OdooCredentials) -> Result<u32> {
    let request = prepare_request_for_authentication(client, credentials);
    let response = request.send().await.map_err(log_message_and_return(
        "Connection failed...",
        UnreachableHost(credentials.url().clone()),
    ))?;

    let status = response.status();
    if !status.is_success() {
        error!("Authentication failed because of status {status}...");
        return Err(ApplicationError::from(ServerFault(status.to_string())));
    }

    let payload: JsonRpcResponse = response.json().await.map_err(log_message_and_return(
        "Couldn't read the authentication response.",
        MalformedResponse,
    ))?;
    if payload.error.is_some() {
        // The server answers a fault when the database doesn't exist.
        return Err(ApplicationError::from(UnreachableDatabase(
            credentials.database().clone(),
        )));
    }

    match payload.result {
        Some(Value::Number(uid)) => uid
            .as_u64()
            .map(|uid| uid as u32)
            .ok_or(ApplicationError::from(MalformedResponse)),
        Some(Value::Bool(false)) | None => Err(ApplicationError::from(WrongCredentials(
            credentials.username().clone(),
        ))),
        Some(_) => Err(ApplicationError::from(MalformedResponse)),
    }
}

// region Requests preparation
fn prepare_request_for_authentication(
    client: &Client,
    credentials: &OdooCredentials,
) -> RequestBuilder {
    let url = format!("{}{JSONRPC_ENDPOINT}", credentials.url());
    let body = json!({
        "jsonrpc": "2.0",
        "method": "call",
        "id": 1,
        "params": {
            "service": "common",
            "method": "authenticate",
            "args": [credentials.database(), credentials.username(), credentials.password(), {}],
        },
    });
    client.post(url).json(&body)
}

fn prepare_request_for_execute_kw(
    session: &OdooSession,
    model: &str,
    method: &str,
    args: Value,
    kwargs: Value,
) -> RequestBuilder {
    let url = format!("{}{JSONRPC_ENDPOINT}", session.url);
    let body = json!({
        "jsonrpc": "2.0",
        "method": "call",
        "id": 1,
        "params": {
            "service": "object",
            "method": "execute_kw",
            "args": [session.database, session.uid, session.password, model, method, args, kwargs],
        },
    });
    session.client.post(url).json(&body)
}
// endregion

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    message: String,
}

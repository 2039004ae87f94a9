use crate::badge_file::export::export_teachers;
use crate::badge_file::import::import_teachers_badge_file;
use crate::badge_file::{TEACHERS_BADGE_FILE_NAME, get_badge_file_folder};
use crate::odoo::credentials::OdooCredentials;
use crate::odoo::session::OdooSession;
use crate::roster::teachers::{TeachersRoster, TeachersSnapshot};
use crate::tools::log_error_and_return;
use crate::web::api::roster_state::RosterState;
use crate::web::api::{badge_file_error_response, error_response, internal_error};
use log::info;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;

#[derive(Deserialize)]
pub struct TeachersFilter {
    with_badge: bool,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    file_path: String,
}

/// The rows of the current teachers selection, loaded lazily like the students one.
#[get("/teachers")]
pub async fn list_teachers(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    let loaded = {
        let state = roster_state
            .lock()
            .map_err(log_error_and_return(internal_error()))?;
        state.loaded()
    };
    if !loaded {
        refresh_roster(&credentials, roster_state).await?;
    }

    let state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    Ok(Json(state.roster().rows()))
}

#[post("/teachers/refresh")]
pub async fn refresh_teachers(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    refresh_roster(&credentials, roster_state).await?;

    let state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    Ok(Json(state.roster().rows()))
}

#[post("/teachers/filter", format = "application/json", data = "<filter>")]
pub async fn filter_teachers(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
    filter: Json<TeachersFilter>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    state.roster_mut().filter(filter.with_badge);
    Ok(Json(state.roster().rows()))
}

#[post("/teachers/export")]
pub async fn export_teachers_file(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
) -> Result<String, (Status, String)> {
    let state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    export_teachers(get_badge_file_folder(), state.roster().selected_teachers())
        .map_err(badge_file_error_response)?;

    let file_path = Path::new(get_badge_file_folder()).join(TEACHERS_BADGE_FILE_NAME);
    Ok(file_path.display().to_string())
}

#[post("/teachers/import", format = "application/json", data = "<request>")]
pub async fn import_teachers_file(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
    request: Json<ImportRequest>,
) -> Result<Json<usize>, (Status, String)> {
    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    let batch = import_teachers_badge_file(&request.file_path, state.roster().all_teachers())
        .map_err(badge_file_error_response)?;

    let count = batch.len();
    state.set_pending_batch(batch);
    Ok(Json(count))
}

/// Same contract as the students write endpoint:
/// the pending batch is consumed whatever the outcome.
#[post("/teachers/write-badges")]
pub async fn write_teachers_badges(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    let writes = {
        let mut state = roster_state
            .lock()
            .map_err(log_error_and_return(internal_error()))?;
        let Some(batch) = state.take_pending_batch() else {
            return Err((
                Status::UnprocessableEntity,
                "No badge codes to write.".to_owned(),
            ));
        };
        state.roster().resolve_badge_writes(batch)
    };

    let session = OdooSession::connect(&credentials)
        .await
        .map_err(error_response)?;
    for (user_id, badge_code) in &writes {
        session
            .write_user_badge(*user_id, badge_code)
            .await
            .map_err(error_response)?;
    }
    info!("{} badge codes written.", writes.len());

    let snapshot = TeachersSnapshot::fetch(&session)
        .await
        .map_err(error_response)?;
    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    state.roster_mut().rebuild(snapshot);
    state.mark_loaded();
    Ok(Json(state.roster().rows()))
}

async fn refresh_roster(
    credentials: &OdooCredentials,
    roster_state: &State<Mutex<RosterState<TeachersRoster>>>,
) -> Result<(), (Status, String)> {
    let session = OdooSession::connect(credentials)
        .await
        .map_err(error_response)?;
    let snapshot = TeachersSnapshot::fetch(&session)
        .await
        .map_err(error_response)?;

    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    state.roster_mut().rebuild(snapshot);
    state.mark_loaded();
    Ok(())
}

use crate::badge_file::export::export_students;
use crate::badge_file::import::import_students_badge_file;
use crate::badge_file::{STUDENTS_BADGE_FILE_NAME, get_badge_file_folder};
use crate::odoo::credentials::OdooCredentials;
use crate::odoo::session::OdooSession;
use crate::roster::students::{StudentsRoster, StudentsSnapshot};
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

pub const DEFAULT_COURSE_FILTER: &str = "All";

#[derive(Deserialize)]
pub struct StudentsFilter {
    course_name: String,
    with_badge: bool,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    file_path: String,
}

/// The rows of the current students selection.
/// The roster is pulled from the records server on the first call,
/// then only on explicit refreshes.
#[get("/students")]
pub async fn list_students(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
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

/// Pull the whole roster from the records server again.
/// Any current filter is reset.
#[post("/students/refresh")]
pub async fn refresh_students(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    refresh_roster(&credentials, roster_state).await?;

    let state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    Ok(Json(state.roster().rows()))
}

/// The course names to offer as filters, with the catch-all first.
#[get("/students/courses")]
pub async fn list_courses(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
) -> Result<Json<Vec<String>>, (Status, String)> {
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
    let mut courses = vec![DEFAULT_COURSE_FILTER.to_owned()];
    courses.extend(state.roster().course_names().iter().cloned());
    Ok(Json(courses))
}

#[post("/students/filter", format = "application/json", data = "<filter>")]
pub async fn filter_students(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
    filter: Json<StudentsFilter>,
) -> Result<Json<Vec<Vec<String>>>, (Status, String)> {
    let filter = filter.into_inner();
    let course_name = if filter.course_name == DEFAULT_COURSE_FILTER {
        String::new()
    } else {
        filter.course_name
    };

    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    state.roster_mut().filter(&course_name, filter.with_badge);
    Ok(Json(state.roster().rows()))
}

/// Write the current selection into the badge printing file
/// and answer with its path.
#[post("/students/export")]
pub async fn export_students_file(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
) -> Result<String, (Status, String)> {
    let state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    export_students(get_badge_file_folder(), state.roster().selected_students())
        .map_err(badge_file_error_response)?;

    let file_path = Path::new(get_badge_file_folder()).join(STUDENTS_BADGE_FILE_NAME);
    Ok(file_path.display().to_string())
}

/// Read a filled-in badge file and keep the assignments as the pending batch.
/// Nothing is written to the records server yet; the caller reviews the count
/// and confirms through the write endpoint.
#[post("/students/import", format = "application/json", data = "<request>")]
pub async fn import_students_file(
    _credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
    request: Json<ImportRequest>,
) -> Result<Json<usize>, (Status, String)> {
    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    let batch = import_students_badge_file(&request.file_path, state.roster().all_students())
        .map_err(badge_file_error_response)?;

    let count = batch.len();
    state.set_pending_batch(batch);
    Ok(Json(count))
}

/// Write the pending batch to the records server, then pull a fresh roster.
/// The batch is consumed even when a write fails partway,
/// so a retry can't apply stale assignments.
#[post("/students/write-badges")]
pub async fn write_students_badges(
    credentials: OdooCredentials,
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
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

    let snapshot = StudentsSnapshot::fetch(&session)
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
    roster_state: &State<Mutex<RosterState<StudentsRoster>>>,
) -> Result<(), (Status, String)> {
    let session = OdooSession::connect(credentials)
        .await
        .map_err(error_response)?;
    let snapshot = StudentsSnapshot::fetch(&session)
        .await
        .map_err(error_response)?;

    let mut state = roster_state
        .lock()
        .map_err(log_error_and_return(internal_error()))?;
    state.roster_mut().rebuild(snapshot);
    state.mark_loaded();
    Ok(())
}

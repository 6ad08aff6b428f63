//! Venue pages and submissions

use axum::{
    extract::{Path, State},
    response::{Html, Response},
    routing::{get, post},
    Form, Router,
};
use sqlx::SqlitePool;
use tracing::debug;

use super::home::home_with;
use super::{edit_response, submitted_name};
use crate::db::venues;
use crate::error::{parse_id, CommandError, PageResult};
use crate::forms::{FormFields, SearchForm, VenueInput};
use crate::notify::{self, Flash};
use crate::{views, AppState};
use gigboard_common::{time, Error};

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let areas = venues::list_venues_grouped_by_location(&mut conn, time::now()).await?;

    Ok(Html(views::venues::venues_page(&areas)))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let results = venues::search_venues(&mut conn, &form.search_term, time::now()).await?;

    Ok(Html(views::search_results_page(
        "Venues",
        "/venues",
        &form.search_term,
        &results,
    )))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> PageResult<Response> {
    let id = parse_id(&raw_id)?;

    let mut tx = state.db.begin().await?;
    let detail = venues::get_venue_detail(&mut tx, id, time::now()).await?;
    tx.commit().await?;

    Ok(flash.consume(Html(views::venues::venue_detail_page(
        &detail,
        flash.notification(),
    ))))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(views::forms::venue_form_page(None))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let fields = FormFields::from(pairs);
    let name = submitted_name(&fields);

    let outcome = create_venue(&state.db, &fields).await;
    let notification = notify::report(
        &outcome,
        || format!("Venue {} was successfully listed!", name),
        || format!("Error: Venue {} could not be listed!", name),
    );

    home_with(&notification)
}

async fn create_venue(db: &SqlitePool, fields: &FormFields) -> Result<i64, CommandError> {
    let input = VenueInput::from_form(fields)?;

    let mut tx = db.begin().await?;
    let id = venues::insert_venue(&mut tx, &input).await?;
    tx.commit().await?;

    debug!("Inserted venue {}", id);
    Ok(id)
}

/// DELETE /venues/:id
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_id(&raw_id)?;

    let outcome = remove_venue(&state.db, id).await;
    let name = outcome.as_deref().unwrap_or_default();
    let notification = notify::report(
        &outcome,
        || format!("Venue {} was successfully deleted!", name),
        || format!("Error: Venue {} could not be deleted!", id),
    );

    Ok(home_with(&notification))
}

/// Delete a venue and its shows, returning the deleted venue's name
async fn remove_venue(db: &SqlitePool, id: i64) -> Result<String, CommandError> {
    let mut tx = db.begin().await?;

    let deleted = venues::delete_venue(&mut tx, id).await?;
    let Some(name) = deleted.name else {
        return Err(Error::NotFound(format!("venue {}", id)).into());
    };

    tx.commit().await?;
    debug!("Deleted venue {} ({} rows)", id, deleted.rows_affected);
    Ok(name)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_id(&raw_id)?;

    let mut conn = state.db.acquire().await?;
    let venue = venues::get_venue(&mut conn, id).await?;

    Ok(Html(views::forms::venue_form_page(Some(&venue))))
}

/// POST /venues/:id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    let id = parse_id(&raw_id)?;
    let fields = FormFields::from(pairs);
    let name = submitted_name(&fields);

    let outcome = edit_venue(&state.db, id, &fields).await;
    let notification = notify::report(
        &outcome,
        || format!("Venue {} was successfully edited!", name),
        || format!("Error: Venue {} could not be edited!", name),
    );

    Ok(edit_response(&outcome, &format!("/venues/{}", id), &notification))
}

async fn edit_venue(db: &SqlitePool, id: i64, fields: &FormFields) -> Result<(), CommandError> {
    let input = VenueInput::from_form(fields)?;

    let mut tx = db.begin().await?;
    venues::update_venue(&mut tx, id, &input).await?;
    tx.commit().await?;

    Ok(())
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route(
            "/venues/:id/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}

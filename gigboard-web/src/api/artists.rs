//! Artist pages and submissions

use axum::{
    extract::{Path, State},
    response::{Html, Response},
    routing::{get, post},
    Form, Router,
};
use gigboard_common::time;
use sqlx::SqlitePool;
use tracing::debug;

use super::home::home_with;
use super::{edit_response, submitted_name};
use crate::db::artists;
use crate::error::{parse_id, CommandError, PageResult};
use crate::forms::{ArtistInput, FormFields, SearchForm};
use crate::notify::{self, Flash};
use crate::{views, AppState};

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let listing = artists::list_artists(&mut conn).await?;

    Ok(Html(views::artists::artists_page(&listing)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let results = artists::search_artists(&mut conn, &form.search_term, time::now()).await?;

    Ok(Html(views::search_results_page(
        "Artists",
        "/artists",
        &form.search_term,
        &results,
    )))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    flash: Flash,
) -> PageResult<Response> {
    let id = parse_id(&raw_id)?;

    let mut tx = state.db.begin().await?;
    let detail = artists::get_artist_detail(&mut tx, id, time::now()).await?;
    tx.commit().await?;

    Ok(flash.consume(Html(views::artists::artist_detail_page(
        &detail,
        flash.notification(),
    ))))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(views::forms::artist_form_page(None))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let fields = FormFields::from(pairs);
    let name = submitted_name(&fields);

    let outcome = create_artist(&state.db, &fields).await;
    let notification = notify::report(
        &outcome,
        || format!("Artist {} was successfully listed!", name),
        || format!("Error: Artist {} could not be listed!", name),
    );

    home_with(&notification)
}

async fn create_artist(db: &SqlitePool, fields: &FormFields) -> Result<i64, CommandError> {
    let input = ArtistInput::from_form(fields)?;

    let mut tx = db.begin().await?;
    let id = artists::insert_artist(&mut tx, &input).await?;
    tx.commit().await?;

    debug!("Inserted artist {}", id);
    Ok(id)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_id(&raw_id)?;

    let mut conn = state.db.acquire().await?;
    let artist = artists::get_artist(&mut conn, id).await?;

    Ok(Html(views::forms::artist_form_page(Some(&artist))))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    let id = parse_id(&raw_id)?;
    let fields = FormFields::from(pairs);
    let name = submitted_name(&fields);

    let outcome = edit_artist(&state.db, id, &fields).await;
    let notification = notify::report(
        &outcome,
        || format!("Artist {} was successfully edited!", name),
        || format!("Error: Artist {} could not be edited!", name),
    );

    Ok(edit_response(&outcome, &format!("/artists/{}", id), &notification))
}

async fn edit_artist(db: &SqlitePool, id: i64, fields: &FormFields) -> Result<(), CommandError> {
    let input = ArtistInput::from_form(fields)?;

    let mut tx = db.begin().await?;
    artists::update_artist(&mut tx, id, &input).await?;
    tx.commit().await?;

    Ok(())
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:id", get(show_artist))
        .route(
            "/artists/:id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}

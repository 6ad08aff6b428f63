//! Show listing and submission

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Router,
};
use sqlx::SqlitePool;
use tracing::debug;

use super::home::home_with;
use crate::db::{artists, shows, venues};
use crate::error::{CommandError, PageResult};
use crate::forms::{FormFields, ShowInput};
use crate::notify;
use crate::{views, AppState};

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let listing = shows::list_shows(&mut conn).await?;

    Ok(Html(views::shows::shows_page(&listing)))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artist_choices = artists::list_artist_choices(&mut conn).await?;
    let venue_choices = venues::list_venue_choices(&mut conn).await?;

    Ok(Html(views::forms::show_form_page(&artist_choices, &venue_choices)))
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let fields = FormFields::from(pairs);

    let outcome = create_show(&state.db, &fields).await;
    let notification = notify::report(
        &outcome,
        || "Show was successfully listed!".to_string(),
        || "Error: Show could not be listed!".to_string(),
    );

    home_with(&notification)
}

async fn create_show(db: &SqlitePool, fields: &FormFields) -> Result<i64, CommandError> {
    let input = ShowInput::from_form(fields)?;

    let mut tx = db.begin().await?;
    let id = shows::insert_show(&mut tx, &input).await?;
    tx.commit().await?;

    debug!("Inserted show {} at {}", id, input.start_time);
    Ok(id)
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
}

//! Venue queries and commands

use chrono::{DateTime, Utc};
use gigboard_common::db::Venue;
use gigboard_common::time::format_start_time;
use gigboard_common::{Error, Result};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{EntityChoice, SearchMatch, SearchResults, ShowPartition};
use crate::forms::VenueInput;

/// One venue inside a location group
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing one (city, state) pair
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show on a venue's page, described by its artist
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowWithArtist {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
    /// `%m/%d/%Y, %H:%M`
    pub start_time_display: String,
}

/// Venue detail page model
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ShowWithArtist>,
    pub upcoming_shows: Vec<ShowWithArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// List every venue grouped by (city, state)
///
/// Groups are ordered by city then state; venues within a group by name.
pub async fn list_venues_grouped_by_location(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<Vec<VenueArea>> {
    let rows: Vec<(i64, String, String, String, i64)> = sqlx::query_as(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS num_upcoming_shows
        FROM venue v
        LEFT JOIN show s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.city, v.state, v.name, v.id
        "#,
    )
    .bind(now)
    .fetch_all(&mut *conn)
    .await?;

    let mut areas: Vec<VenueArea> = Vec::new();
    for (id, name, city, state, num_upcoming_shows) in rows {
        let summary = VenueSummary {
            id,
            name,
            num_upcoming_shows,
        };

        match areas.last_mut() {
            Some(area) if area.city == city && area.state == state => area.venues.push(summary),
            _ => areas.push(VenueArea {
                city,
                state,
                venues: vec![summary],
            }),
        }
    }

    Ok(areas)
}

/// Case-insensitive substring search on venue name
///
/// The term is matched literally; an empty term matches every venue.
pub async fn search_venues(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let data: Vec<SearchMatch> = sqlx::query_as(
        r#"
        SELECT v.id, v.name, COUNT(s.id) AS num_upcoming_shows
        FROM venue v
        LEFT JOIN show s ON s.venue_id = v.id AND s.start_time > ?1
        WHERE ?2 = '' OR instr(lower(v.name), lower(?2)) > 0
        GROUP BY v.id
        ORDER BY v.name, v.id
        "#,
    )
    .bind(now)
    .bind(term)
    .fetch_all(&mut *conn)
    .await?;

    debug!("Venue search {:?} matched {} rows", term, data.len());
    Ok(SearchResults::new(data))
}

/// Load one venue; `Error::NotFound` when the id has no row
pub async fn get_venue(conn: &mut SqliteConnection, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        SELECT id, name, city, state, address, phone, image_link, website,
               facebook_link, genres, seeking_talent, seeking_description
        FROM venue
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("venue {}", id)))
}

/// Venue with its shows split into past and upcoming
pub async fn get_venue_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: DateTime<Utc>,
) -> Result<VenueDetail> {
    let venue = get_venue(conn, id).await?;
    let past_shows = venue_shows(conn, id, ShowPartition::Past, now).await?;
    let upcoming_shows = venue_shows(conn, id, ShowPartition::Upcoming, now).await?;

    Ok(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

async fn venue_shows(
    conn: &mut SqliteConnection,
    venue_id: i64,
    partition: ShowPartition,
    now: DateTime<Utc>,
) -> Result<Vec<ShowWithArtist>> {
    let sql = format!(
        r#"
        SELECT s.artist_id, a.name, a.image_link, s.start_time
        FROM show s
        JOIN artist a ON a.id = s.artist_id
        WHERE s.venue_id = ? AND s.start_time {} ?
        ORDER BY s.start_time, s.id
        "#,
        partition.comparison()
    );

    let rows: Vec<(i64, String, String, DateTime<Utc>)> = sqlx::query_as(&sql)
        .bind(venue_id)
        .bind(now)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(artist_id, artist_name, artist_image_link, start_time)| ShowWithArtist {
            artist_id,
            artist_name,
            artist_image_link,
            start_time_display: format_start_time(&start_time),
            start_time,
        })
        .collect())
}

/// Insert a venue, returning its new id
pub async fn insert_venue(conn: &mut SqliteConnection, input: &VenueInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venue (
            name, city, state, address, phone, image_link, website,
            facebook_link, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(Json(&input.genres))
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every editable field of a venue
pub async fn update_venue(conn: &mut SqliteConnection, id: i64, input: &VenueInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venue SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, website = ?, facebook_link = ?, genres = ?,
            seeking_talent = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.address)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(Json(&input.genres))
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    Ok(())
}

/// Outcome of `delete_venue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDeletion {
    pub rows_affected: u64,
    /// Name of the deleted venue, `None` when nothing matched
    pub name: Option<String>,
}

/// Delete a venue (and, by cascade, its shows)
///
/// A missing id is not an error: it simply affects zero rows. The name comes
/// back from the same statement, so the caller never holds a read lock that
/// must later be upgraded to a write lock.
pub async fn delete_venue(conn: &mut SqliteConnection, id: i64) -> Result<VenueDeletion> {
    let names: Vec<String> = sqlx::query_scalar("DELETE FROM venue WHERE id = ? RETURNING name")
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(VenueDeletion {
        rows_affected: names.len() as u64,
        name: names.into_iter().next(),
    })
}

/// Every venue as an id/name pair, for the show form
pub async fn list_venue_choices(conn: &mut SqliteConnection) -> Result<Vec<EntityChoice>> {
    let choices = sqlx::query_as("SELECT id, name FROM venue ORDER BY name, id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(choices)
}

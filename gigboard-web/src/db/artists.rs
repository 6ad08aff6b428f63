//! Artist queries and commands

use chrono::{DateTime, Utc};
use gigboard_common::db::Artist;
use gigboard_common::time::format_start_time;
use gigboard_common::{Error, Result};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::SqliteConnection;
use tracing::debug;

use super::{EntityChoice, SearchMatch, SearchResults, ShowPartition};
use crate::forms::ArtistInput;

/// Artist row on the listing page
#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

/// A show on an artist's page, described by its venue
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowWithVenue {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

/// Artist detail page model
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ShowWithVenue>,
    pub upcoming_shows: Vec<ShowWithVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Every artist, unfiltered and unpaginated
pub async fn list_artists(conn: &mut SqliteConnection) -> Result<Vec<ArtistSummary>> {
    let artists = sqlx::query_as("SELECT id, name FROM artist ORDER BY name, id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(artists)
}

/// Case-insensitive substring search on artist name
pub async fn search_artists(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let data: Vec<SearchMatch> = sqlx::query_as(
        r#"
        SELECT a.id, a.name, COUNT(s.id) AS num_upcoming_shows
        FROM artist a
        LEFT JOIN show s ON s.artist_id = a.id AND s.start_time > ?1
        WHERE ?2 = '' OR instr(lower(a.name), lower(?2)) > 0
        GROUP BY a.id
        ORDER BY a.name, a.id
        "#,
    )
    .bind(now)
    .bind(term)
    .fetch_all(&mut *conn)
    .await?;

    debug!("Artist search {:?} matched {} rows", term, data.len());
    Ok(SearchResults::new(data))
}

/// Load one artist; `Error::NotFound` when the id has no row
pub async fn get_artist(conn: &mut SqliteConnection, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT id, name, city, state, phone, image_link, website,
               facebook_link, genres, seeking_venue, seeking_description
        FROM artist
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("artist {}", id)))
}

/// Artist with its shows split into past and upcoming
pub async fn get_artist_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let artist = get_artist(conn, id).await?;
    let past_shows = artist_shows(conn, id, ShowPartition::Past, now).await?;
    let upcoming_shows = artist_shows(conn, id, ShowPartition::Upcoming, now).await?;

    Ok(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

async fn artist_shows(
    conn: &mut SqliteConnection,
    artist_id: i64,
    partition: ShowPartition,
    now: DateTime<Utc>,
) -> Result<Vec<ShowWithVenue>> {
    let sql = format!(
        r#"
        SELECT s.venue_id, v.name, v.image_link, s.start_time
        FROM show s
        JOIN venue v ON v.id = s.venue_id
        WHERE s.artist_id = ? AND s.start_time {} ?
        ORDER BY s.start_time, s.id
        "#,
        partition.comparison()
    );

    let rows: Vec<(i64, String, String, DateTime<Utc>)> = sqlx::query_as(&sql)
        .bind(artist_id)
        .bind(now)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(venue_id, venue_name, venue_image_link, start_time)| ShowWithVenue {
            venue_id,
            venue_name,
            venue_image_link,
            start_time_display: format_start_time(&start_time),
            start_time,
        })
        .collect())
}

/// Insert an artist, returning its new id
pub async fn insert_artist(conn: &mut SqliteConnection, input: &ArtistInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artist (
            name, city, state, phone, image_link, website,
            facebook_link, genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(Json(&input.genres))
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every editable field of an artist
pub async fn update_artist(conn: &mut SqliteConnection, id: i64, input: &ArtistInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artist SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            website = ?, facebook_link = ?, genres = ?,
            seeking_venue = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.image_link)
    .bind(&input.website)
    .bind(&input.facebook_link)
    .bind(Json(&input.genres))
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    Ok(())
}

/// Every artist as an id/name pair, for the show form
pub async fn list_artist_choices(conn: &mut SqliteConnection) -> Result<Vec<EntityChoice>> {
    let choices = sqlx::query_as("SELECT id, name FROM artist ORDER BY name, id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::shows::insert_show;
    use crate::db::test_support::{artist_input, venue_input};
    use crate::db::venues::insert_venue;
    use crate::forms::ShowInput;
    use chrono::{Duration, TimeZone};
    use gigboard_common::db::init_memory_database;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_list_artists_ordered_by_name() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        insert_artist(&mut conn, &artist_input("The Wild Sax Band")).await.unwrap();
        insert_artist(&mut conn, &artist_input("Guns N Petals")).await.unwrap();
        insert_artist(&mut conn, &artist_input("Matt Quevedo")).await.unwrap();

        let names: Vec<String> = list_artists(&mut conn)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn test_search_artists_counts_upcoming_only() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let venue_id = insert_venue(&mut conn, &venue_input("The Musical Hop", "San Francisco", "CA")).await.unwrap();
        let artist_id = insert_artist(&mut conn, &artist_input("Guns N Petals")).await.unwrap();
        insert_artist(&mut conn, &artist_input("Matt Quevedo")).await.unwrap();

        for offset in [-2, 1, 5] {
            insert_show(
                &mut conn,
                &ShowInput {
                    artist_id,
                    venue_id,
                    start_time: fixed_now() + Duration::days(offset),
                },
            )
            .await
            .unwrap();
        }

        let results = search_artists(&mut conn, "a", fixed_now()).await.unwrap();
        assert_eq!(results.count, 2);

        let petals = search_artists(&mut conn, "PETALS", fixed_now()).await.unwrap();
        assert_eq!(petals.count, 1);
        assert_eq!(petals.data[0].id, artist_id);
        assert_eq!(petals.data[0].num_upcoming_shows, 2);
    }

    #[tokio::test]
    async fn test_artist_detail_joins_venue() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let venue_id = insert_venue(&mut conn, &venue_input("The Dueling Pianos Bar", "New York", "NY")).await.unwrap();
        let artist_id = insert_artist(&mut conn, &artist_input("Guns N Petals")).await.unwrap();
        insert_show(
            &mut conn,
            &ShowInput {
                artist_id,
                venue_id,
                start_time: fixed_now() + Duration::days(1),
            },
        )
        .await
        .unwrap();

        let detail = get_artist_detail(&mut conn, artist_id, fixed_now()).await.unwrap();
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 1);

        let show = &detail.upcoming_shows[0];
        assert_eq!(show.venue_id, venue_id);
        assert_eq!(show.venue_name, "The Dueling Pianos Bar");
        assert_eq!(show.start_time_display, "06/02/2030, 12:00");
        assert!(detail.artist.seeking_venue);
    }

    #[tokio::test]
    async fn test_update_missing_artist_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let err = update_artist(&mut conn, 7, &artist_input("Nobody")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_artist_clears_seeking() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let id = insert_artist(&mut conn, &artist_input("Guns N Petals")).await.unwrap();

        let mut edited = artist_input("Guns N Petals");
        edited.seeking_venue = false;
        edited.seeking_description = None;
        edited.genres = vec!["Classical".to_string(), "Jazz".to_string()];
        update_artist(&mut conn, id, &edited).await.unwrap();

        let artist = get_artist(&mut conn, id).await.unwrap();
        assert!(!artist.seeking_venue);
        assert_eq!(artist.seeking_description, None);
        assert_eq!(artist.genres, vec!["Classical", "Jazz"]);
    }
}

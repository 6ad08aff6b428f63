//! Show queries and commands

use chrono::{DateTime, Utc};
use gigboard_common::time::format_start_time;
use gigboard_common::Result;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::forms::ShowInput;

/// Denormalized show row for the listing page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

/// Every show joined with its venue and artist
pub async fn list_shows(conn: &mut SqliteConnection) -> Result<Vec<ShowListing>> {
    let rows: Vec<(i64, String, i64, String, String, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
        FROM show s
        JOIN venue v ON v.id = s.venue_id
        JOIN artist a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(venue_id, venue_name, artist_id, artist_name, artist_image_link, start_time)| {
                ShowListing {
                    venue_id,
                    venue_name,
                    artist_id,
                    artist_name,
                    artist_image_link,
                    start_time_display: format_start_time(&start_time),
                    start_time,
                }
            },
        )
        .collect())
}

/// Insert a show, returning its new id
///
/// Fails with a foreign key violation unless both the venue and the artist exist.
pub async fn insert_show(conn: &mut SqliteConnection, input: &ShowInput) -> Result<i64> {
    let result = sqlx::query("INSERT INTO show (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(input.venue_id)
        .bind(input.artist_id)
        .bind(input.start_time)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::artists::insert_artist;
    use crate::db::test_support::{artist_input, venue_input};
    use crate::db::venues::insert_venue;
    use chrono::TimeZone;
    use gigboard_common::db::init_memory_database;

    #[tokio::test]
    async fn test_list_shows_denormalizes_and_orders() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let hop = insert_venue(&mut conn, &venue_input("The Musical Hop", "San Francisco", "CA")).await.unwrap();
        let park = insert_venue(&mut conn, &venue_input("Park Square Live Music & Coffee", "San Francisco", "CA")).await.unwrap();
        let petals = insert_artist(&mut conn, &artist_input("Guns N Petals")).await.unwrap();
        let sax = insert_artist(&mut conn, &artist_input("The Wild Sax Band")).await.unwrap();

        let later = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();

        insert_show(&mut conn, &ShowInput { artist_id: sax, venue_id: park, start_time: later }).await.unwrap();
        insert_show(&mut conn, &ShowInput { artist_id: petals, venue_id: hop, start_time: earlier }).await.unwrap();

        let shows = list_shows(&mut conn).await.unwrap();
        assert_eq!(shows.len(), 2);

        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[0].start_time_display, "05/21/2019, 21:30");
        assert_eq!(shows[1].venue_id, park);
        assert_eq!(shows[1].artist_id, sax);
        assert_eq!(shows[1].artist_image_link, artist_input("The Wild Sax Band").image_link);
    }

    #[tokio::test]
    async fn test_insert_show_with_unknown_artist_fails() {
        let pool = init_memory_database().await.unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let venue_id = insert_venue(&mut conn, &venue_input("The Musical Hop", "San Francisco", "CA")).await.unwrap();
        let result = insert_show(
            &mut conn,
            &ShowInput {
                artist_id: 404,
                venue_id,
                start_time: Utc.with_ymd_and_hms(2035, 1, 1, 20, 0, 0).unwrap(),
            },
        )
        .await;

        assert!(result.is_err());
        assert!(list_shows(&mut conn).await.unwrap().is_empty());
    }
}

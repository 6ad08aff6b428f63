//! Show listing page

use gigboard_common::time::{format_datetime, DateFormat};

use super::{escape, layout};
use crate::db::shows::ShowListing;

pub fn shows_page(shows: &[ShowListing]) -> String {
    let rows: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"            <li>
                <img src="{image}" alt="" width="60">
                <a href="/artists/{artist_id}">{artist}</a> playing at
                <a href="/venues/{venue_id}">{venue}</a>
                <time datetime="{iso}">{when}</time>
            </li>
"#,
                image = escape(&show.artist_image_link),
                artist_id = show.artist_id,
                artist = escape(&show.artist_name),
                venue_id = show.venue_id,
                venue = escape(&show.venue_name),
                iso = show.start_time.to_rfc3339(),
                when = format_datetime(&show.start_time, DateFormat::Full),
            )
        })
        .collect();

    let body = format!(
        "        <h1>Shows</h1>\n        <p><a href=\"/shows/create\">List a new show</a></p>\n        <ul class=\"shows\">\n{}        </ul>",
        rows
    );

    layout("Shows", None, &body)
}

//! Artist listing and detail pages

use super::{escape, external_link, genre_tags, layout, search_box};
use crate::db::artists::{ArtistDetail, ArtistSummary, ShowWithVenue};
use crate::notify::Notification;

pub fn artists_page(artists: &[ArtistSummary]) -> String {
    let items: String = artists
        .iter()
        .map(|artist| {
            format!(
                "            <li><a href=\"/artists/{}\">{}</a></li>\n",
                artist.id,
                escape(&artist.name)
            )
        })
        .collect();

    let body = format!(
        "        <h1>Artists</h1>\n        {}\n        <p><a href=\"/artists/create\">List a new artist</a></p>\n        <ul class=\"artists\">\n{}        </ul>",
        search_box("/artists/search", "Find an artist"),
        items
    );

    layout("Artists", None, &body)
}

pub fn artist_detail_page(detail: &ArtistDetail, notification: Option<&Notification>) -> String {
    let artist = &detail.artist;

    let seeking = if artist.seeking_venue {
        format!(
            "<p class=\"seeking\">Currently seeking performance venues: {}</p>",
            escape(artist.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        "<p class=\"not-seeking\">Not currently seeking performance venues</p>".to_string()
    };

    let body = format!(
        r#"        <h1>{name}</h1>
        <p class="subtitle">ID: {id}</p>
        <div class="genres">{genres}</div>
        <img src="{image}" alt="{name}" width="300">
        <p>{city}, {state}</p>
        <p>Phone: {phone}</p>
        {website}
        {facebook}
        {seeking}
        <p><a href="/artists/{id}/edit">Edit</a></p>
        <h2>{past_count} Past Shows</h2>
{past}
        <h2>{upcoming_count} Upcoming Shows</h2>
{upcoming}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        image = escape(&artist.image_link),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(&artist.phone),
        website = external_link("Website", &artist.website),
        facebook = external_link("Facebook", &artist.facebook_link),
        seeking = seeking,
        past_count = detail.past_shows_count,
        past = show_list(&detail.past_shows),
        upcoming_count = detail.upcoming_shows_count,
        upcoming = show_list(&detail.upcoming_shows),
    );

    layout(&artist.name, notification, &body)
}

fn show_list(shows: &[ShowWithVenue]) -> String {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                "            <li><img src=\"{}\" alt=\"\" width=\"60\"> <a href=\"/venues/{}\">{}</a> {}</li>\n",
                escape(&show.venue_image_link),
                show.venue_id,
                escape(&show.venue_name),
                escape(&show.start_time_display)
            )
        })
        .collect();

    format!("        <ul class=\"shows\">\n{}        </ul>", items)
}

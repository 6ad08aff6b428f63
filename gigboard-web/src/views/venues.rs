//! Venue listing and detail pages

use super::{escape, external_link, genre_tags, layout, search_box};
use crate::db::venues::{ShowWithArtist, VenueArea, VenueDetail};
use crate::notify::Notification;

pub fn venues_page(areas: &[VenueArea]) -> String {
    let mut body = format!(
        "        <h1>Venues</h1>\n        {}\n        <p><a href=\"/venues/create\">List a new venue</a></p>\n",
        search_box("/venues/search", "Find a venue")
    );

    for area in areas {
        body.push_str(&format!(
            "        <h3>{}, {}</h3>\n        <ul class=\"venues\">\n",
            escape(&area.city),
            escape(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&format!(
                "            <li><a href=\"/venues/{}\">{}</a> <small>{} upcoming</small></li>\n",
                venue.id,
                escape(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        body.push_str("        </ul>\n");
    }

    layout("Venues", None, &body)
}

pub fn venue_detail_page(detail: &VenueDetail, notification: Option<&Notification>) -> String {
    let venue = &detail.venue;

    let seeking = if venue.seeking_talent {
        format!(
            "<p class=\"seeking\">Currently seeking talent: {}</p>",
            escape(venue.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        "<p class=\"not-seeking\">Not currently seeking talent</p>".to_string()
    };

    let body = format!(
        r#"        <h1>{name}</h1>
        <p class="subtitle">ID: {id}</p>
        <div class="genres">{genres}</div>
        <img src="{image}" alt="{name}" width="300">
        <p>{address}, {city}, {state}</p>
        <p>Phone: {phone}</p>
        {website}
        {facebook}
        {seeking}
        <p>
            <a href="/venues/{id}/edit">Edit</a>
            <button type="button" id="delete-venue" data-id="{id}">Delete</button>
        </p>
        <h2>{past_count} Past Shows</h2>
{past}
        <h2>{upcoming_count} Upcoming Shows</h2>
{upcoming}
        <script>
            document.getElementById('delete-venue').addEventListener('click', async (e) => {{
                const response = await fetch('/venues/' + e.target.dataset.id, {{ method: 'DELETE' }});
                document.open();
                document.write(await response.text());
                document.close();
            }});
        </script>"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        image = escape(&venue.image_link),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
        website = external_link("Website", &venue.website),
        facebook = external_link("Facebook", &venue.facebook_link),
        seeking = seeking,
        past_count = detail.past_shows_count,
        past = show_list(&detail.past_shows),
        upcoming_count = detail.upcoming_shows_count,
        upcoming = show_list(&detail.upcoming_shows),
    );

    layout(&venue.name, notification, &body)
}

fn show_list(shows: &[ShowWithArtist]) -> String {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                "            <li><img src=\"{}\" alt=\"\" width=\"60\"> <a href=\"/artists/{}\">{}</a> {}</li>\n",
                escape(&show.artist_image_link),
                show.artist_id,
                escape(&show.artist_name),
                escape(&show.start_time_display)
            )
        })
        .collect();

    format!("        <ul class=\"shows\">\n{}        </ul>", items)
}

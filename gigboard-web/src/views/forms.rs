//! Create and edit forms
//!
//! Field names match what `crate::forms` parses. Edit forms are prefilled
//! from the stored record.

use gigboard_common::db::{Artist, Venue};

use super::{escape, layout};
use crate::db::EntityChoice;

/// Genre choices offered by the venue and artist forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "        <p><label>{label} <input type=\"text\" name=\"{name}\" value=\"{value}\"></label></p>\n",
        label = label,
        name = name,
        value = escape(value)
    )
}

fn prefill<'a, T>(existing: Option<&'a T>, get: impl Fn(&'a T) -> &'a str) -> &'a str {
    existing.map(get).unwrap_or("")
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        "        <p><label><input type=\"checkbox\" name=\"{}\" value=\"y\"{}> {}</label></p>\n",
        name,
        if checked { " checked" } else { "" },
        label
    )
}

/// Multi-select over the fixed choices, plus any stored genre not among them
fn genre_select(selected: &[String]) -> String {
    let mut choices: Vec<&str> = GENRE_CHOICES.to_vec();
    for genre in selected {
        if !choices.contains(&genre.as_str()) {
            choices.push(genre);
        }
    }

    let options: String = choices
        .iter()
        .map(|choice| {
            let is_selected = selected.iter().any(|g| g.as_str() == *choice);
            format!(
                "            <option value=\"{0}\"{1}>{0}</option>\n",
                escape(choice),
                if is_selected { " selected" } else { "" }
            )
        })
        .collect();

    format!(
        "        <p><label>Genres <select name=\"genres\" multiple>\n{}        </select></label></p>\n",
        options
    )
}

fn entity_select(name: &str, label: &str, choices: &[EntityChoice]) -> String {
    let options: String = choices
        .iter()
        .map(|c| format!("            <option value=\"{}\">{}</option>\n", c.id, escape(&c.name)))
        .collect();

    format!(
        "        <p><label>{} <select name=\"{}\" required>\n{}        </select></label></p>\n",
        label, name, options
    )
}

fn form_page(title: &str, action: &str, fields: &str) -> String {
    let body = format!(
        "        <h1>{}</h1>\n        <form method=\"post\" action=\"{}\">\n{}        <p><button type=\"submit\">Submit</button></p>\n        </form>",
        escape(title),
        action,
        fields
    );
    layout(title, None, &body)
}

/// New venue form, or the edit form for `existing`
pub fn venue_form_page(existing: Option<&Venue>) -> String {
    let (title, action) = match existing {
        Some(venue) => (format!("Edit venue {}", venue.name), format!("/venues/{}/edit", venue.id)),
        None => ("List a new venue".to_string(), "/venues/create".to_string()),
    };

    let mut fields = String::new();
    fields.push_str(&text_input("name", "Name", prefill(existing, |v| v.name.as_str())));
    fields.push_str(&text_input("city", "City", prefill(existing, |v| v.city.as_str())));
    fields.push_str(&text_input("state", "State", prefill(existing, |v| v.state.as_str())));
    fields.push_str(&text_input("address", "Address", prefill(existing, |v| v.address.as_str())));
    fields.push_str(&text_input("phone", "Phone", prefill(existing, |v| v.phone.as_str())));
    fields.push_str(&text_input("image_link", "Image link", prefill(existing, |v| v.image_link.as_str())));
    fields.push_str(&genre_select(existing.map(|v| v.genres.as_slice()).unwrap_or(&[])));
    fields.push_str(&text_input("website", "Website", prefill(existing, |v| v.website.as_str())));
    fields.push_str(&text_input("facebook_link", "Facebook link", prefill(existing, |v| v.facebook_link.as_str())));
    fields.push_str(&checkbox(
        "seeking_talent",
        "Seeking talent",
        existing.is_some_and(|v| v.seeking_talent),
    ));
    fields.push_str(&text_input(
        "seeking_description",
        "Seeking description",
        existing.and_then(|v| v.seeking_description.as_deref()).unwrap_or(""),
    ));

    form_page(&title, &action, &fields)
}

/// New artist form, or the edit form for `existing`
pub fn artist_form_page(existing: Option<&Artist>) -> String {
    let (title, action) = match existing {
        Some(artist) => (format!("Edit artist {}", artist.name), format!("/artists/{}/edit", artist.id)),
        None => ("List a new artist".to_string(), "/artists/create".to_string()),
    };

    let mut fields = String::new();
    fields.push_str(&text_input("name", "Name", prefill(existing, |a| a.name.as_str())));
    fields.push_str(&text_input("city", "City", prefill(existing, |a| a.city.as_str())));
    fields.push_str(&text_input("state", "State", prefill(existing, |a| a.state.as_str())));
    fields.push_str(&text_input("phone", "Phone", prefill(existing, |a| a.phone.as_str())));
    fields.push_str(&text_input("image_link", "Image link", prefill(existing, |a| a.image_link.as_str())));
    fields.push_str(&genre_select(existing.map(|a| a.genres.as_slice()).unwrap_or(&[])));
    fields.push_str(&text_input("website", "Website", prefill(existing, |a| a.website.as_str())));
    fields.push_str(&text_input("facebook_link", "Facebook link", prefill(existing, |a| a.facebook_link.as_str())));
    fields.push_str(&checkbox(
        "seeking_venue",
        "Seeking venues",
        existing.is_some_and(|a| a.seeking_venue),
    ));
    fields.push_str(&text_input(
        "seeking_description",
        "Seeking description",
        existing.and_then(|a| a.seeking_description.as_deref()).unwrap_or(""),
    ));

    form_page(&title, &action, &fields)
}

pub fn show_form_page(artists: &[EntityChoice], venues: &[EntityChoice]) -> String {
    let mut fields = String::new();
    fields.push_str(&entity_select("artist_id", "Artist", artists));
    fields.push_str(&entity_select("venue_id", "Venue", venues));
    fields.push_str(
        "        <p><label>Start time (UTC) <input type=\"datetime-local\" name=\"start_time\" required></label></p>\n",
    );

    form_page("List a new show", "/shows/create", &fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_artist() -> Artist {
        Artist {
            id: 4,
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            image_link: String::new(),
            website: "https://www.gunsnpetalsband.com".to_string(),
            facebook_link: String::new(),
            genres: vec!["Rock n Roll".to_string(), "Sea Shanty".to_string()],
            seeking_venue: true,
            seeking_description: Some("Looking for shows \"downtown\"".to_string()),
        }
    }

    #[test]
    fn test_blank_venue_form_posts_to_create() {
        let page = venue_form_page(None);
        assert!(page.contains(r#"action="/venues/create""#));
        assert!(page.contains(r#"name="seeking_talent" value="y">"#));
        assert!(page.contains(r#"<option value="Jazz">Jazz</option>"#));
    }

    #[test]
    fn test_artist_edit_form_is_prefilled() {
        let page = artist_form_page(Some(&stored_artist()));
        assert!(page.contains(r#"action="/artists/4/edit""#));
        assert!(page.contains(r#"name="name" value="Guns N Petals""#));
        assert!(page.contains(r#"name="seeking_venue" value="y" checked>"#));
        assert!(page.contains(r#"value="Looking for shows &quot;downtown&quot;""#));
        assert!(page.contains(r#"<option value="Rock n Roll" selected>"#));
        assert!(page.contains(r#"<option value="Sea Shanty" selected>"#));
        assert!(page.contains(r#"<option value="Jazz">"#));
    }

    #[test]
    fn test_show_form_lists_choices() {
        let artists = vec![EntityChoice { id: 4, name: "Guns N Petals".to_string() }];
        let venues = vec![EntityChoice { id: 1, name: "The Musical Hop".to_string() }];
        let page = show_form_page(&artists, &venues);
        assert!(page.contains(r#"<option value="4">Guns N Petals</option>"#));
        assert!(page.contains(r#"<option value="1">The Musical Hop</option>"#));
        assert!(page.contains(r#"name="start_time""#));
    }
}

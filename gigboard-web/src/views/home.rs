//! Home page

use super::layout;
use crate::notify::Notification;

pub fn home_page(notification: Option<&Notification>) -> String {
    let body = r#"        <h1>Gigboard</h1>
        <p>Find venues and artists, and book shows between them.</p>
        <ul>
            <li><a href="/venues">Browse venues</a> or <a href="/venues/create">list a venue</a></li>
            <li><a href="/artists">Browse artists</a> or <a href="/artists/create">list an artist</a></li>
            <li><a href="/shows">Browse shows</a> or <a href="/shows/create">list a show</a></li>
        </ul>"#;

    layout("Home", notification, body)
}

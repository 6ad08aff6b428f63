//! Server-side HTML rendering
//!
//! Pages are plain `format!` strings. Every interpolated user value goes
//! through [`escape`].

use std::borrow::Cow;

use crate::db::SearchResults;
use crate::notify::Notification;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Wrap `body` in the shared page chrome
pub fn layout(title: &str, notification: Option<&Notification>, body: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Gigboard</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 0 20px;
        }}
        nav a {{ margin-right: 15px; }}
        .notification {{ padding: 10px; margin: 15px 0; border-radius: 4px; }}
        .notification.success {{ background: #e3f6e5; }}
        .notification.error {{ background: #fbe4e4; }}
        .genre {{ display: inline-block; padding: 2px 8px; margin-right: 4px; border: 1px solid #ccc; border-radius: 10px; }}
        footer {{ margin-top: 40px; color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Gigboard</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
    </nav>
    {notification}
    <main>
{body}
    </main>
    <footer>gigboard-web v{version} ({git_hash})</footer>
</body>
</html>
"#,
        title = escape(title),
        notification = notification.map(notification_banner).unwrap_or_default(),
        body = body,
        version = version,
        git_hash = git_hash,
    )
}

fn notification_banner(notification: &Notification) -> String {
    let class = if notification.is_error() { "error" } else { "success" };
    format!(
        r#"<div class="notification {}" role="alert">{}</div>"#,
        class,
        escape(&notification.message)
    )
}

/// Genre tags as inline badges
pub fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| format!(r#"<span class="genre">{}</span>"#, escape(genre)))
        .collect::<Vec<_>>()
        .join("")
}

/// Search box posting `search_term` to `action`
pub fn search_box(action: &str, placeholder: &str) -> String {
    format!(
        r#"<form method="post" action="{}">
    <input type="search" name="search_term" placeholder="{}">
    <button type="submit">Search</button>
</form>"#,
        action,
        escape(placeholder)
    )
}

/// Search results page shared by venues and artists
///
/// `base_path` is the listing path, e.g. `/venues`.
pub fn search_results_page(title: &str, base_path: &str, term: &str, results: &SearchResults) -> String {
    let rows: String = results
        .data
        .iter()
        .map(|m| {
            format!(
                r#"            <li><a href="{}/{}">{}</a> <small>{} upcoming</small></li>
"#,
                base_path,
                m.id,
                escape(&m.name),
                m.num_upcoming_shows
            )
        })
        .collect();

    let body = format!(
        r#"        <h1>{title}</h1>
        {search}
        <h3>Number of search results for "{term}": {count}</h3>
        <ul class="search-results">
{rows}        </ul>"#,
        title = escape(title),
        search = search_box(&format!("{}/search", base_path), title),
        term = escape(term),
        count = results.count,
        rows = rows,
    );

    layout(title, None, &body)
}

/// Optional external link, empty when the stored value is blank
pub fn external_link(label: &str, href: &str) -> String {
    if href.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p>{}: <a href="{}">{}</a></p>"#,
            label,
            escape(href),
            escape(href)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        let escaped = escape(r#"<b>"Rock & Roll"</b> 'live'"#);
        assert!(escaped.starts_with("&lt;b&gt;&quot;Rock &amp; Roll&quot;&lt;/b&gt; "));
        assert!(!escaped.contains('\''));
        assert!(!escaped.contains('<'));
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("https://x.test/a?b=1"), "https://x.test/a?b=1");
    }

    #[test]
    fn test_layout_embeds_notification() {
        let page = layout(
            "Home",
            Some(&Notification::error("Error: Venue <x> could not be listed!")),
            "<p>hi</p>",
        );
        assert!(page.contains(r#"class="notification error""#));
        assert!(page.contains("Error: Venue &lt;x&gt; could not be listed!"));
        assert!(page.contains("<p>hi</p>"));
    }

    #[test]
    fn test_layout_without_notification() {
        let page = layout("Home", None, "");
        assert!(!page.contains("role=\"alert\""));
    }

    #[test]
    fn test_external_link_blank() {
        assert_eq!(external_link("Website", ""), "");
        assert!(external_link("Website", "https://x.test").contains("href=\"https://x.test\""));
    }
}

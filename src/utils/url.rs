// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Build an absolute detail page URL from a listing href.
///
/// The href is split on `/`, its first `strip` segments (navigation only,
/// e.g. `..` and `game`) are dropped, and the rest is appended to `base`.
/// Returns `None` when nothing remains or the result is not a valid URL.
///
/// # Examples
/// ```
/// use gol_crawler::utils::url::detail_url;
///
/// assert_eq!(
///     detail_url("https://gol.gg/game/", "../game/stats/65719/page-summary/", 2),
///     Some("https://gol.gg/game/stats/65719/page-summary/".to_string())
/// );
/// ```
pub fn detail_url(base: &str, href: &str, strip: usize) -> Option<String> {
    let segments: Vec<&str> = href.trim().split('/').collect();
    if segments.len() <= strip {
        return None;
    }

    let rest = segments[strip..].join("/");
    if rest.is_empty() {
        return None;
    }

    let absolute = format!("{base}{rest}");
    Url::parse(&absolute).ok().map(|u| u.to_string())
}

/// Resolve a potentially relative href against a base URL.
pub fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|u| u.to_string())
}

/// Extract the numeric game id from a detail URL (`.../stats/65719/...`).
pub fn game_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .find(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

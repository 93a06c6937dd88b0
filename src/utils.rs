use std::{path::Path, sync::LazyLock};

use regex::Regex;
use url::Url;

use crate::config::SPOTIFY_WEB_PREFIX;

/// Extension MusicBee uses for auto playlists.
pub const PLAYLIST_EXTENSION: &str = "xautopf";

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid regex"));
static YEAR_REMASTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) - \d{4} remaster.*$").expect("valid regex"));
static TRAILING_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - [^\-]*$").expect("valid regex"));

/// Strips version annotations from a track title so it can be used in a `Contains` match.
///
/// Removes `(...)` and `[...]` groups, a trailing ` - 2011 Remaster...` and finally any
/// other trailing ` - suffix` without a hyphen in it (`- Live`, `- Radio Edit`), then trims.
///
/// The last rule also removes genuine title parts such as the `- Intro` in
/// `Part 1 - Intro`.
pub fn clean_track_name(title: &str) -> String {
    let title = PARENTHESIZED.replace_all(title, "");
    let title = BRACKETED.replace_all(&title, "");
    let title = YEAR_REMASTER.replace(&title, "");
    let title = TRAILING_SUFFIX.replace(&title, "");
    title.trim().to_string()
}

/// Title-cases a string the way Python's `str.title` does: a character is upper-cased when
/// it does not follow a cased letter and lower-cased otherwise. Letters without case (CJK,
/// for instance) start a new word like punctuation does.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_cased = false;

    for c in s.chars() {
        if previous_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_cased = c.is_lowercase() || c.is_uppercase();
    }

    out
}

/// Name of the playlist file generated for an input CSV: `my_playlist.csv` becomes
/// `My Playlist.xautopf`.
pub fn playlist_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{}.{}",
        title_case(&stem.replace('_', " ")),
        PLAYLIST_EXTENSION
    )
}

/// File stem of the intermediate CSV written for a remote playlist.
pub fn csv_file_stem(playlist_name: &str) -> String {
    strip_path_separators(&playlist_name.replace(' ', "_"))
}

/// File stem of a downloaded playlist cover.
pub fn cover_file_stem(playlist_name: &str) -> String {
    strip_path_separators(&playlist_name.replace('_', " "))
}

fn strip_path_separators(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

pub fn is_spotify_url(input: &str) -> bool {
    input.starts_with(SPOTIFY_WEB_PREFIX)
}

/// Playlist id from a share URL: the last path segment, without the query string.
///
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc` yields
/// `37i9dQZF1DXcBWIGoYBM5M`.
pub fn playlist_id_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

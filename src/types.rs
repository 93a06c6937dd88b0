use serde::{Deserialize, Serialize};

/// One playlist entry, as read from or written to the CSV files.
///
/// Only `Track Name` and `Artist Name(s)` are required when reading; exports from other
/// tools usually carry more columns, which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRow {
    #[serde(rename = "Playlist Name", default)]
    pub playlist_name: String,
    #[serde(rename = "Track Name")]
    pub title: String,
    #[serde(rename = "Artist Name(s)")]
    pub artist: String,
    #[serde(rename = "Album", default)]
    pub album: String,
}

/// Release types a track can be excluded by, in the order the exclusion
/// conditions are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    Compilation,
    Live,
    Broadcast,
    Single,
    Soundtrack,
    Demo,
    Ep,
}

impl ReleaseKind {
    pub const ALL: [ReleaseKind; 7] = [
        ReleaseKind::Compilation,
        ReleaseKind::Live,
        ReleaseKind::Broadcast,
        ReleaseKind::Single,
        ReleaseKind::Soundtrack,
        ReleaseKind::Demo,
        ReleaseKind::Ep,
    ];

    /// Value stored in the release type tag.
    pub fn value(&self) -> &'static str {
        match self {
            ReleaseKind::Compilation => "compilation",
            ReleaseKind::Live => "live",
            ReleaseKind::Broadcast => "broadcast",
            ReleaseKind::Single => "single",
            ReleaseKind::Soundtrack => "soundtrack",
            ReleaseKind::Demo => "demo",
            ReleaseKind::Ep => "ep",
        }
    }

    /// Title fragments that mark this release type when the tag itself is missing.
    pub fn title_markers(&self) -> &'static [&'static str] {
        match self {
            ReleaseKind::Live => &["(live", "live)"],
            ReleaseKind::Demo => &["(demo", "demo)"],
            _ => &[],
        }
    }
}

/// A fetched remote playlist, flattened into CSV rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<TrackRow>,
}

/// Token response of the client credentials flow. Only the token itself is used; it is
/// requested again for every playlist, so the expiry is never consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistDetails {
    pub name: String,
}

/// Page of the playlist tracks endpoint before the items are mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTracksPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

/// A playlist entry. `track` is `None` for removed tracks and for entries that could
/// not be read as a music track (podcast episodes, broken local files).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

impl PlaylistTrack {
    pub fn into_row(self, playlist_name: &str) -> TrackRow {
        TrackRow {
            playlist_name: playlist_name.to_string(),
            title: self.name,
            artist: self
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: self.album.name.unwrap_or_default(),
        }
    }
}

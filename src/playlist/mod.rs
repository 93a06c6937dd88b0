//! # Smart playlist documents
//!
//! In-memory model of a MusicBee auto playlist (`.xautopf`) and the rules that turn CSV
//! rows into it. A document looks like this:
//!
//! ```text
//! SmartPlaylist (MusicLibraryPath + fixed layout options)
//!   Source Type="1"
//!     Conditions CombineMethod="Any"          one entry per input row
//!       Condition Title Contains <clean title>
//!         And CombineMethod="All"
//!           Condition ArtistPeople Is <artist>
//!           Condition <release tag> IsNot <type>      one per excluded type
//!           Condition Title DoesNotContain (live ...  live and demo only
//!     Limit (disabled, 25 random items, no duplicates)
//!     SortBy Field="30" Ascending
//! ```
//!
//! A track ends up in the playlist when it matches any of the row conditions. Building,
//! serializing ([`SmartPlaylist::to_xml`]) and parsing ([`SmartPlaylist::from_xml`]) are
//! kept apart so that the generated document can be checked after a round trip.

mod rows;
mod xml;

pub use rows::{parse_track_rows, read_track_rows, write_track_rows};

use std::{fmt, str::FromStr};

use crate::{
    config::Settings,
    types::{ReleaseKind, TrackRow},
    utils,
};

pub const TITLE_FIELD: &str = "Title";
pub const ARTIST_FIELD: &str = "ArtistPeople";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Is,
    IsNot,
    Contains,
    DoesNotContain,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Is => "Is",
            Comparison::IsNot => "IsNot",
            Comparison::Contains => "Contains",
            Comparison::DoesNotContain => "DoesNotContain",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Is" => Ok(Comparison::Is),
            "IsNot" => Ok(Comparison::IsNot),
            "Contains" => Ok(Comparison::Contains),
            "DoesNotContain" => Ok(Comparison::DoesNotContain),
            other => Err(format!("unknown comparison '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub comparison: Comparison,
    pub value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, comparison: Comparison, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            comparison,
            value: value.into(),
        }
    }
}

/// Condition for a single input row: the title match plus everything that must hold
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCondition {
    pub title: Condition,
    pub all_of: Vec<Condition>,
}

impl TrackCondition {
    /// Builds the condition for one row. `title` is cleaned, `artist` is used as is.
    pub fn new(title: &str, artist: &str, excluded: &[ReleaseKind], release_field: &str) -> Self {
        let mut all_of = vec![Condition::new(ARTIST_FIELD, Comparison::Is, artist)];

        for kind in excluded {
            all_of.push(Condition::new(
                release_field,
                Comparison::IsNot,
                kind.value(),
            ));
        }
        // the tag is often missing, so live/demo versions are also caught by their title
        for kind in excluded {
            for marker in kind.title_markers() {
                all_of.push(Condition::new(
                    TITLE_FIELD,
                    Comparison::DoesNotContain,
                    *marker,
                ));
            }
        }

        Self {
            title: Condition::new(
                TITLE_FIELD,
                Comparison::Contains,
                utils::clean_track_name(title),
            ),
            all_of,
        }
    }

    pub fn artist(&self) -> Option<&Condition> {
        self.all_of.first()
    }

    /// Conditions after the artist match.
    pub fn exclusions(&self) -> &[Condition] {
        self.all_of.get(1..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub filter_duplicates: bool,
    pub enabled: bool,
    pub count: u32,
    pub kind: String,
    pub selected_by: String,
}

impl Default for Limit {
    fn default() -> Self {
        Self {
            filter_duplicates: true,
            enabled: false,
            count: 25,
            kind: "Items".to_string(),
            selected_by: "Random".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub field: String,
    pub order: String,
}

impl Default for SortBy {
    fn default() -> Self {
        Self {
            field: "30".to_string(),
            order: "Ascending".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartPlaylist {
    pub music_library_path: String,
    pub conditions: Vec<TrackCondition>,
    pub limit: Limit,
    pub sort_by: SortBy,
}

impl SmartPlaylist {
    pub fn new(music_library_path: impl Into<String>) -> Self {
        Self {
            music_library_path: music_library_path.into(),
            conditions: Vec::new(),
            limit: Limit::default(),
            sort_by: SortBy::default(),
        }
    }

    /// Builds the document for `rows`, one top-level condition per row in input order.
    pub fn build<'a, I>(rows: I, settings: &Settings) -> Self
    where
        I: IntoIterator<Item = &'a TrackRow>,
    {
        let excluded = settings.exclusions.excluded();
        let mut playlist = Self::new(settings.music_library.path.clone());

        for row in rows {
            playlist.conditions.push(TrackCondition::new(
                &row.title,
                &row.artist,
                &excluded,
                &settings.release_type.field,
            ));
        }

        playlist
    }
}

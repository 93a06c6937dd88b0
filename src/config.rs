//! Configuration management for SpotToBee.
//!
//! Settings live in an INI file (`config.ini` unless `--config` says otherwise) with
//! the sections `ExclusionOptions`, `OutputOptions`, `ReleaseType`, `MusicLibrary` and
//! `SpotifyAPI`. The file is read once at startup into a [`Settings`] value that is then
//! passed by reference to everything that needs it; it is only ever rewritten as a whole.
//!
//! Every key is optional. Missing keys fall back to [`Settings::default`], which includes
//! every release type, keeps intermediate CSVs and uses `Custom1` as the release type tag.
//! A newly created file is written from [`Settings::default_file`] instead.
//! Section and key names are matched case-insensitively, so files written by INI writers
//! that lowercase keys load the same way.

use ::config::Source;
use std::{
    collections::HashMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

use crate::{types::ReleaseKind, warning};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Release type tag used when the configuration does not name one.
pub const DEFAULT_RELEASE_FIELD: &str = "Custom1";

/// Base URL of the Spotify Web API.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Token endpoint for the client credentials flow.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Inputs starting with this prefix are treated as playlist URLs.
pub const SPOTIFY_WEB_PREFIX: &str = "https://open.spotify.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] ::config::ConfigError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub exclusions: ExclusionOptions,
    pub output: OutputOptions,
    pub release_type: ReleaseType,
    pub music_library: MusicLibrary,
    pub spotify: SpotifyApi,
}

/// `true` means the release type stays in the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionOptions {
    pub include_compilation: bool,
    pub include_live: bool,
    pub include_broadcast: bool,
    pub include_single: bool,
    pub include_soundtrack: bool,
    pub include_demo: bool,
    pub include_ep: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub output_directory: String,
    pub delete_spotify_csvs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseType {
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicLibrary {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotifyApi {
    pub client_id: String,
    pub client_secret: String,
}

impl Default for ExclusionOptions {
    fn default() -> Self {
        Self::including(true)
    }
}

impl Default for ReleaseType {
    fn default() -> Self {
        Self {
            field: DEFAULT_RELEASE_FIELD.to_string(),
        }
    }
}

impl ExclusionOptions {
    /// All flags set to `include`.
    pub fn including(include: bool) -> Self {
        Self {
            include_compilation: include,
            include_live: include,
            include_broadcast: include,
            include_single: include,
            include_soundtrack: include,
            include_demo: include,
            include_ep: include,
        }
    }

    pub fn includes(&self, kind: ReleaseKind) -> bool {
        match kind {
            ReleaseKind::Compilation => self.include_compilation,
            ReleaseKind::Live => self.include_live,
            ReleaseKind::Broadcast => self.include_broadcast,
            ReleaseKind::Single => self.include_single,
            ReleaseKind::Soundtrack => self.include_soundtrack,
            ReleaseKind::Demo => self.include_demo,
            ReleaseKind::Ep => self.include_ep,
        }
    }

    pub fn set(&mut self, kind: ReleaseKind, include: bool) {
        let flag = match kind {
            ReleaseKind::Compilation => &mut self.include_compilation,
            ReleaseKind::Live => &mut self.include_live,
            ReleaseKind::Broadcast => &mut self.include_broadcast,
            ReleaseKind::Single => &mut self.include_single,
            ReleaseKind::Soundtrack => &mut self.include_soundtrack,
            ReleaseKind::Demo => &mut self.include_demo,
            ReleaseKind::Ep => &mut self.include_ep,
        };
        *flag = include;
    }

    /// Release types that are filtered out, in declaration order.
    pub fn excluded(&self) -> Vec<ReleaseKind> {
        ReleaseKind::ALL
            .into_iter()
            .filter(|kind| !self.includes(*kind))
            .collect()
    }
}

impl SpotifyApi {
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// INI key name of each exclusion flag.
fn exclusion_key(kind: ReleaseKind) -> &'static str {
    match kind {
        ReleaseKind::Compilation => "IncludeCompilation",
        ReleaseKind::Live => "IncludeLive",
        ReleaseKind::Broadcast => "IncludeBroadcast",
        ReleaseKind::Single => "IncludeSingle",
        ReleaseKind::Soundtrack => "IncludeSoundtrack",
        ReleaseKind::Demo => "IncludeDemo",
        ReleaseKind::Ep => "IncludeEP",
    }
}

impl Settings {
    /// Content of a freshly created configuration file: every release type flag off and
    /// no release type tag.
    ///
    /// This differs from [`Settings::default`], which only supplies values for keys a
    /// file does not contain.
    pub fn default_file() -> Self {
        Settings {
            exclusions: ExclusionOptions::including(false),
            release_type: ReleaseType {
                field: String::new(),
            },
            ..Settings::default()
        }
    }

    /// Loads settings from an INI file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid INI. Individual bad values are not
    /// errors: they are reported with a warning and replaced by their default.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = async_fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_ini_str(&text)
    }

    /// Parses settings from INI text.
    ///
    /// Backslashes and quotes are taken literally (library paths on Windows are full of
    /// backslashes, and a quoted value keeps its quotes). The underlying parser would treat
    /// both specially, so they are escaped first.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let escaped = text
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\'', "\\'");
        let cfg = ::config::Config::builder()
            .add_source(::config::File::from_str(
                &escaped,
                ::config::FileFormat::Ini,
            ))
            .build()?;
        let table = IniTable::from_config(cfg)?;
        Ok(Self::from_table(&table))
    }

    fn from_table(table: &IniTable) -> Self {
        let defaults = Settings::default();

        let mut exclusions = defaults.exclusions;
        for kind in ReleaseKind::ALL {
            let include = table.get_bool(
                "ExclusionOptions",
                exclusion_key(kind),
                defaults.exclusions.includes(kind),
            );
            exclusions.set(kind, include);
        }

        // only a missing key falls back; an empty tag name is kept as written
        let field = table
            .get("ReleaseType", "Field")
            .map(|field| field.trim().to_string())
            .unwrap_or(defaults.release_type.field);

        Settings {
            exclusions,
            output: OutputOptions {
                output_directory: table.get_string("OutputOptions", "OutputDirectory"),
                delete_spotify_csvs: table.get_bool(
                    "OutputOptions",
                    "DeleteSpotifyCSVs",
                    defaults.output.delete_spotify_csvs,
                ),
            },
            release_type: ReleaseType { field },
            music_library: MusicLibrary {
                path: table.get_string("MusicLibrary", "Path"),
            },
            spotify: SpotifyApi {
                client_id: table.get_string("SpotifyAPI", "ClientID"),
                client_secret: table.get_string("SpotifyAPI", "ClientSecret"),
            },
        }
    }

    /// Renders the settings as INI text, one section per settings group.
    pub fn to_ini(&self) -> String {
        let mut out = String::new();

        out.push_str("[ExclusionOptions]\n");
        for kind in ReleaseKind::ALL {
            let _ = writeln!(
                out,
                "{} = {}",
                exclusion_key(kind),
                ini_bool(self.exclusions.includes(kind))
            );
        }

        out.push_str("\n[OutputOptions]\n");
        let _ = writeln!(out, "OutputDirectory = {}", self.output.output_directory);
        let _ = writeln!(
            out,
            "DeleteSpotifyCSVs = {}",
            ini_bool(self.output.delete_spotify_csvs)
        );

        out.push_str("\n[ReleaseType]\n");
        let _ = writeln!(out, "Field = {}", self.release_type.field);

        out.push_str("\n[MusicLibrary]\n");
        let _ = writeln!(out, "Path = {}", self.music_library.path);

        out.push_str("\n[SpotifyAPI]\n");
        let _ = writeln!(out, "ClientID = {}", self.spotify.client_id);
        let _ = writeln!(out, "ClientSecret = {}", self.spotify.client_secret);

        out
    }

    /// Writes the settings to `path`, replacing the file if it exists.
    pub async fn persist(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        async_fs::write(path, self.to_ini())
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn ini_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Parses an INI boolean the way Python's configparser does.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Sections and keys of an INI file, both lowercased for lookup.
struct IniTable {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniTable {
    fn from_config(cfg: ::config::Config) -> Result<Self, ::config::ConfigError> {
        let mut sections = HashMap::new();

        for (section, value) in cfg.collect()? {
            // keys outside of any section are not part of the format
            let Ok(entries) = value.into_table() else {
                continue;
            };

            let mut keys = HashMap::new();
            for (key, value) in entries {
                let value = value.into_string().unwrap_or_default();
                keys.insert(key.to_lowercase(), value);
            }
            sections
                .entry(section.to_lowercase())
                .or_insert_with(HashMap::new)
                .extend(keys);
        }

        Ok(Self { sections })
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_lowercase())
            .and_then(|keys| keys.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    fn get_string(&self, section: &str, key: &str) -> String {
        self.get(section, key)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.get(section, key) {
            None => default,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                warning!(
                    "Invalid value '{}' for {}.{}, using {}",
                    raw,
                    section,
                    key,
                    ini_bool(default)
                );
                default
            }),
        }
    }
}

//! SpotToBee library
//!
//! Turns playlist data into MusicBee auto playlists (`.xautopf`). Input is either a CSV
//! export with `Track Name` and `Artist Name(s)` columns or a Spotify playlist URL, which is
//! fetched through the Spotify Web API and materialized as such a CSV first.
//!
//! # Modules
//!
//! - `cli` - Command implementations: conversion and (re)configuration
//! - `config` - INI settings file: loading, defaults and persisting
//! - `playlist` - Smart playlist document model, XML codec and CSV row I/O
//! - `spotify` - Spotify Web API client for playlist tracks and cover art
//! - `types` - Data structures shared between the modules
//! - `utils` - Track name normalization and file naming helpers
//!
//! # Example
//!
//! ```
//! use spottobee::{cli, config::Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let settings = Settings::default();
//!     cli::convert(&["my_playlist.csv".to_string()], &settings).await;
//! }
//! ```

pub mod cli;
pub mod config;
pub mod playlist;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the glue code (file conversion, document codec) where the caller only
/// reports the failure. The Spotify boundary returns the typed
/// [`spotify::FetchError`] instead so callers can decide between skipping and aborting.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spottobee::Res;
///
/// fn playlist_name(row: &str) -> Res<String> {
///     Ok(row.trim().to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a blue "o" indicator followed by the
/// message. Used for progress that needs no action, such as the number of tracks
/// fetched or a configuration file that is about to be created.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Configuration file '{}' not found.", path.display());
/// info!("Fetched {} tracks from playlist '{}'", count, name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator. Every file the
/// tool writes (playlist, cover, configuration) and every intermediate CSV it
/// deletes is reported this way.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Playlist '{}' created successfully.", file_name);
/// success!("CSV file '{}' deleted.", csv_path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and terminates the
/// program with exit code 1.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// The program exits right after printing. Only for failures that end the run,
/// such as an input CSV without the expected columns or a configuration file that
/// cannot be written during `--reconfigure`. Recoverable problems go through
/// [`warning!`].
///
/// # Example
///
/// ```
/// error!("Failed to convert '{}': {}", input, e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator for problems the
/// run continues past.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// Execution continues after the message. Used for a playlist that could not be
/// fetched, a cover image that could not be downloaded, playlist entries without
/// track data and unreadable configuration values.
///
/// # Example
///
/// ```
/// warning!("Skipping '{}': {}", input, e);
/// warning!("Failed to download playlist cover: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{
    config::{ExclusionOptions, Settings, SpotifyApi},
    error, info, success,
    types::ReleaseKind,
    warning,
};

/// Line based question/answer helper over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `question` and returns the trimmed answer. End of input reads as an empty
    /// answer.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// `true` for `yes` or `y`, in any case.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(answer == "yes" || answer == "y")
    }
}

fn exclusion_question(kind: ReleaseKind) -> &'static str {
    match kind {
        ReleaseKind::Compilation => "Exclude compilations? (yes/no): ",
        ReleaseKind::Live => "Exclude live recordings? (yes/no): ",
        ReleaseKind::Broadcast => "Exclude broadcasts? (yes/no): ",
        ReleaseKind::Single => "Exclude singles? (yes/no): ",
        ReleaseKind::Soundtrack => "Exclude soundtracks? (yes/no): ",
        ReleaseKind::Demo => "Exclude demo versions? (yes/no): ",
        ReleaseKind::Ep => "Exclude EPs? (yes/no): ",
    }
}

/// Asks for every setting and returns the resulting configuration.
///
/// Questions that are skipped (release type filtering declined, no Spotify use) leave the
/// defaults in place.
pub fn prompt_settings<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<Settings> {
    let mut settings = Settings::default();

    settings.output.output_directory = prompter.ask("Enter playlist output directory: ")?;
    settings.music_library.path = prompter.ask("Enter your MusicBee library path: ")?;
    settings.output.delete_spotify_csvs =
        prompter.confirm("Delete the CSVs created for Spotify playlists after conversion? (yes/no): ")?;

    if prompter.confirm("Do you want to filter by release type? (yes/no): ")? {
        let field = prompter
            .ask("Enter the tag in which the Release Type is located (e.g., Custom1): ")?;
        if !field.is_empty() {
            settings.release_type.field = field;
        }

        let mut exclusions = ExclusionOptions::including(true);
        for kind in ReleaseKind::ALL {
            let exclude = prompter.confirm(exclusion_question(kind))?;
            exclusions.set(kind, !exclude);
        }
        settings.exclusions = exclusions;
    }

    if prompter.confirm("Do you want to fetch data from Spotify URLs? (yes/no): ")? {
        settings.spotify = SpotifyApi {
            client_id: prompter.ask("Enter Spotify Client ID: ")?,
            client_secret: prompter.ask("Enter Spotify Client Secret: ")?,
        };
    }

    Ok(settings)
}

fn prompt_from_terminal() -> Settings {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    match prompt_settings(&mut prompter) {
        Ok(settings) => settings,
        Err(e) => {
            warning!("Cannot read answers: {}. Using default settings.", e);
            Settings::default()
        }
    }
}

/// Rewrites the configuration file from interactive answers.
pub async fn reconfigure(path: &Path) {
    let settings = prompt_from_terminal();

    match settings.persist(path).await {
        Ok(()) => success!("Configuration file '{}' reconfigured.", path.display()),
        Err(e) => error!("Failed to save configuration: {}", e),
    }
}

/// Loads the configuration at `path`.
///
/// When the file does not exist the user may create one with default settings or answer
/// the configuration questions; either way the result is saved to `path`. A file that
/// exists but cannot be read is reported and replaced by defaults for this run only.
pub async fn load_or_create(path: &Path) -> Settings {
    if path.exists() {
        return match Settings::load(path).await {
            Ok(settings) => settings,
            Err(e) => {
                warning!("{}. Continuing with default settings.", e);
                Settings::default()
            }
        };
    }

    info!("Configuration file '{}' not found.", path.display());

    let create_default = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompter
            .confirm("Do you want to create a default configuration file? (yes/no): ")
            .unwrap_or(false)
    };

    let settings = if create_default {
        Settings::default_file()
    } else {
        prompt_from_terminal()
    };

    match settings.persist(path).await {
        Ok(()) if create_default => {
            success!("Default configuration file '{}' created.", path.display())
        }
        Ok(()) => success!("Configuration file '{}' created.", path.display()),
        Err(e) => warning!("Failed to save configuration: {}", e),
    }

    settings
}

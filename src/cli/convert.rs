use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    config::Settings,
    error, info,
    playlist::{self, SmartPlaylist},
    spotify::{self, Endpoints, SpotifyClient},
    success, utils, warning,
};

/// Converts every input in order. URLs go through the Spotify API, everything else is read
/// as a CSV file. Intermediate CSVs for URLs are written to the working directory.
pub async fn convert(inputs: &[String], settings: &Settings) {
    if inputs.is_empty() {
        warning!("Please provide input files or use the --reconfigure flag.");
        return;
    }

    for input in inputs {
        if utils::is_spotify_url(input) {
            if !settings.spotify.has_credentials() {
                warning!(
                    "Spotify Client ID and Client Secret are required. Run with --reconfigure to set them."
                );
                return;
            }

            if let Err(e) =
                convert_remote(input, settings, Endpoints::default(), Path::new(".")).await
            {
                warning!("Skipping '{}': {}", input, e);
            }
        } else if let Err(e) = convert_csv(Path::new(input), settings) {
            error!("Failed to convert '{}': {}", input, e);
        }
    }
}

/// Builds the smart playlist for a CSV file and writes it to the output directory.
///
/// Returns the path of the written `.xautopf` file.
pub fn convert_csv(input: &Path, settings: &Settings) -> Res<PathBuf> {
    let rows = playlist::read_track_rows(input)?;
    let document = SmartPlaylist::build(&rows, settings);

    let file_name = utils::playlist_file_name(input);
    let output_path = Path::new(&settings.output.output_directory).join(&file_name);
    document.write_to(&output_path)?;

    success!("Playlist '{}' created successfully.", file_name);
    Ok(output_path)
}

/// Fetches a Spotify playlist, downloads its cover, stores its tracks as
/// `<csv_dir>/<Playlist_Name>.csv` and converts that file.
///
/// Returns the written playlist file, or `None` when the playlist has no tracks. A failed
/// cover download is only reported.
pub async fn convert_remote(
    url: &str,
    settings: &Settings,
    endpoints: Endpoints,
    csv_dir: &Path,
) -> Res<Option<PathBuf>> {
    let playlist_id = utils::playlist_id_from_url(url)
        .ok_or_else(|| format!("no playlist id in '{}'", url))?;

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching playlist {}...", playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let fetched = match SpotifyClient::connect(&settings.spotify, endpoints).await {
        Ok(client) => spotify::fetch_playlist(&client, &playlist_id)
            .await
            .map(|playlist| (client, playlist)),
        Err(e) => Err(e),
    };
    pb.finish_and_clear();
    let (client, remote) = fetched?;

    if remote.tracks.is_empty() {
        info!("Playlist '{}' has no tracks, nothing to convert.", remote.name);
        return Ok(None);
    }
    info!(
        "Fetched {} tracks from playlist '{}'",
        remote.tracks.len(),
        remote.name
    );

    let output_dir = Path::new(&settings.output.output_directory);
    match client
        .download_cover(&remote.id, &remote.name, output_dir)
        .await
    {
        Ok(_) => success!("Playlist cover for '{}' downloaded successfully.", remote.name),
        Err(e) => warning!("Failed to download playlist cover: {}", e),
    }

    let csv_path = csv_dir.join(format!("{}.csv", utils::csv_file_stem(&remote.name)));
    playlist::write_track_rows(&csv_path, &remote.tracks)?;

    let output = convert_csv(&csv_path, settings)?;

    if settings.output.delete_spotify_csvs {
        async_fs::remove_file(&csv_path)
            .await
            .map_err(|e| format!("cannot delete {}: {}", csv_path.display(), e))?;
        success!("CSV file '{}' deleted.", csv_path.display());
    }

    Ok(Some(output))
}

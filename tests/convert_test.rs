use std::path::Path;

use mockito::{Matcher, Server, ServerGuard};
use spottobee::cli::{convert, convert_csv, convert_remote};
use spottobee::config::Settings;
use spottobee::playlist::{ARTIST_FIELD, Comparison, SmartPlaylist, TITLE_FIELD};
use spottobee::spotify::Endpoints;
use spottobee::types::ReleaseKind;

fn settings_for(output_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.output.output_directory = output_dir.to_string_lossy().to_string();
    settings.music_library.path = "/music".to_string();
    settings.spotify.client_id = "id".to_string();
    settings.spotify.client_secret = "secret".to_string();
    settings
}

fn read_playlist(path: &Path) -> SmartPlaylist {
    let xml = std::fs::read_to_string(path).unwrap();
    SmartPlaylist::from_xml(&xml).unwrap()
}

#[test]
fn test_convert_csv_end_to_end() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("road_trip.csv");
    std::fs::write(
        &input,
        "Track Name,Artist Name(s)\nSong A (Live),Artist X\nSong B,Artist Y\n",
    )
    .unwrap();

    let output = convert_csv(&input, &settings_for(output_dir.path())).unwrap();

    assert_eq!(output, output_dir.path().join("Road Trip.xautopf"));
    let playlist = read_playlist(&output);
    assert_eq!(playlist.music_library_path, "/music");
    assert_eq!(playlist.conditions.len(), 2);

    let expected = [("Song A", "Artist X"), ("Song B", "Artist Y")];
    for (condition, (title, artist)) in playlist.conditions.iter().zip(expected) {
        assert_eq!(condition.title.field, TITLE_FIELD);
        assert_eq!(condition.title.comparison, Comparison::Contains);
        assert_eq!(condition.title.value, title);
        assert_eq!(condition.all_of.len(), 1);
        assert_eq!(condition.all_of[0].field, ARTIST_FIELD);
        assert_eq!(condition.all_of[0].comparison, Comparison::Is);
        assert_eq!(condition.all_of[0].value, artist);
    }
}

#[test]
fn test_convert_csv_with_exclusions() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("demos.csv");
    std::fs::write(&input, "Track Name,Artist Name(s)\nTape,Band\n").unwrap();

    let mut settings = settings_for(output_dir.path());
    settings.exclusions.set(ReleaseKind::Demo, false);
    settings.release_type.field = "Custom2".to_string();

    let playlist = read_playlist(&convert_csv(&input, &settings).unwrap());
    let exclusions = playlist.conditions[0].exclusions();

    assert_eq!(exclusions.len(), 3);
    assert_eq!(exclusions[0].field, "Custom2");
    assert_eq!(exclusions[0].value, "demo");
    assert_eq!(exclusions[1].value, "(demo");
    assert_eq!(exclusions[2].value, "demo)");
}

#[test]
fn test_convert_csv_missing_file_fails() {
    let output_dir = tempfile::tempdir().unwrap();
    let result = convert_csv(
        &output_dir.path().join("absent.csv"),
        &settings_for(output_dir.path()),
    );

    assert!(result.is_err());
}

#[test]
fn test_convert_csv_missing_output_directory_fails() {
    let input_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("list.csv");
    std::fs::write(&input, "Track Name,Artist Name(s)\nSong,Artist\n").unwrap();

    let settings = settings_for(&input_dir.path().join("does").join("not").join("exist"));
    assert!(convert_csv(&input, &settings).is_err());
}

fn write_input_csv(dir: &Path, name: &str) -> String {
    let input = dir.join(name);
    std::fs::write(&input, "Track Name,Artist Name(s)\nSong,Artist\n").unwrap();
    input.to_string_lossy().to_string()
}

fn written_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_convert_without_inputs_writes_nothing() {
    let output_dir = tempfile::tempdir().unwrap();

    convert(&[], &settings_for(output_dir.path())).await;

    assert!(written_files(output_dir.path()).is_empty());
}

#[tokio::test]
async fn test_convert_routes_csv_inputs_in_order() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        write_input_csv(input_dir.path(), "first_list.csv"),
        write_input_csv(input_dir.path(), "second_list.csv"),
    ];

    convert(&inputs, &settings_for(output_dir.path())).await;

    assert_eq!(
        written_files(output_dir.path()),
        vec!["First List.xautopf", "Second List.xautopf"]
    );
}

#[tokio::test]
async fn test_convert_missing_credentials_stops_remaining_inputs() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(output_dir.path());
    settings.spotify = Default::default();

    let inputs = vec![
        write_input_csv(input_dir.path(), "before.csv"),
        "https://open.spotify.com/playlist/abc".to_string(),
        write_input_csv(input_dir.path(), "after.csv"),
    ];

    convert(&inputs, &settings).await;

    // inputs before the URL are converted, nothing after it
    assert_eq!(written_files(output_dir.path()), vec!["Before.xautopf"]);
}

#[tokio::test]
async fn test_convert_url_first_without_credentials_converts_nothing() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(output_dir.path());
    settings.spotify.client_secret = String::new();

    let inputs = vec![
        "https://open.spotify.com/playlist/abc".to_string(),
        write_input_csv(input_dir.path(), "road_trip.csv"),
    ];

    convert(&inputs, &settings).await;

    assert!(!output_dir.path().join("Road Trip.xautopf").exists());
    assert!(written_files(output_dir.path()).is_empty());
}

async fn mock_playlist(server: &mut ServerGuard, tracks_body: &str) -> Vec<mockito::Mock> {
    let token = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_body(r#"{"access_token":"test-token"}"#)
        .create_async()
        .await;
    let name = server
        .mock("GET", "/playlists/abc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"name":"Road Trip"}"#)
        .create_async()
        .await;
    let tracks = server
        .mock("GET", "/playlists/abc/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(tracks_body)
        .create_async()
        .await;
    let images = server
        .mock("GET", "/playlists/abc/images")
        .with_status(404)
        .create_async()
        .await;

    vec![token, name, tracks, images]
}

const TWO_TRACKS: &str = r#"{"items":[
    {"track":{"name":"Song A - 2011 Remaster","artists":[{"name":"Artist X"}],"album":{"name":"One"}}},
    {"track":{"name":"Song B","artists":[{"name":"Artist Y"},{"name":"Artist Z"}],"album":{"name":"Two"}}}
],"next":null}"#;

#[tokio::test]
async fn test_convert_remote_keeps_csv() {
    let mut server = Server::new_async().await;
    let _mocks = mock_playlist(&mut server, TWO_TRACKS).await;

    let csv_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let settings = settings_for(output_dir.path());

    let output = convert_remote(
        "https://open.spotify.com/playlist/abc?si=share",
        &settings,
        Endpoints::with_base(&server.url()),
        csv_dir.path(),
    )
    .await
    .unwrap()
    .unwrap();

    let csv_path = csv_dir.path().join("Road_Trip.csv");
    assert!(csv_path.exists());
    let rows = spottobee::playlist::read_track_rows(&csv_path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].artist, "Artist Y, Artist Z");
    assert_eq!(rows[0].playlist_name, "Road Trip");

    assert_eq!(output, output_dir.path().join("Road Trip.xautopf"));
    let playlist = read_playlist(&output);
    let titles: Vec<&str> = playlist
        .conditions
        .iter()
        .map(|c| c.title.value.as_str())
        .collect();
    assert_eq!(titles, vec!["Song A", "Song B"]);

    // the cover request failed, which does not stop the conversion
    assert!(!output_dir.path().join("Road Trip.jpg").exists());
}

#[tokio::test]
async fn test_convert_remote_deletes_csv() {
    let mut server = Server::new_async().await;
    let _mocks = mock_playlist(&mut server, TWO_TRACKS).await;

    let csv_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(output_dir.path());
    settings.output.delete_spotify_csvs = true;

    let output = convert_remote(
        "https://open.spotify.com/playlist/abc",
        &settings,
        Endpoints::with_base(&server.url()),
        csv_dir.path(),
    )
    .await
    .unwrap();

    assert!(output.is_some_and(|path| path.exists()));
    assert!(!csv_dir.path().join("Road_Trip.csv").exists());
}

#[tokio::test]
async fn test_convert_remote_empty_playlist_writes_nothing() {
    let mut server = Server::new_async().await;
    let _mocks = mock_playlist(&mut server, r#"{"items":[],"next":null}"#).await;

    let csv_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let output = convert_remote(
        "https://open.spotify.com/playlist/abc",
        &settings_for(output_dir.path()),
        Endpoints::with_base(&server.url()),
        csv_dir.path(),
    )
    .await
    .unwrap();

    assert!(output.is_none());
    assert!(!csv_dir.path().join("Road_Trip.csv").exists());
    assert!(!output_dir.path().join("Road Trip.xautopf").exists());
}

#[tokio::test]
async fn test_convert_remote_failed_authentication() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create_async()
        .await;

    let csv_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let result = convert_remote(
        "https://open.spotify.com/playlist/abc",
        &settings_for(output_dir.path()),
        Endpoints::with_base(&server.url()),
        csv_dir.path(),
    )
    .await;

    assert!(result.is_err());
}

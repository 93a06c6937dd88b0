use std::path::{Path, PathBuf};

use crate::{
    spotify::{FetchError, SpotifyClient},
    types::{
        Image, PlaylistDetails, PlaylistItem, RawTracksPage, RemotePlaylist, TrackRow, TracksPage,
    },
    utils, warning,
};

/// Number of entries requested per page; the API maximum.
pub const PAGE_SIZE: usize = 100;

/// Where playlist data comes from.
///
/// [`SpotifyClient`] implements it over HTTP; anything else implementing it (a fixture in
/// tests, for instance) can drive [`fetch_playlist`].
#[allow(async_fn_in_trait)]
pub trait PlaylistSource {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String, FetchError>;

    /// Entries starting at `offset`. `next` is `None` on the last page.
    async fn tracks_page(&self, playlist_id: &str, offset: usize)
    -> Result<TracksPage, FetchError>;
}

/// Fetches a playlist's name and all of its tracks, in playlist order.
///
/// Pages are requested until the source reports no next page. Entries without a track
/// are skipped; the playlist itself only fails when a request fails.
pub async fn fetch_playlist<S: PlaylistSource>(
    source: &S,
    playlist_id: &str,
) -> Result<RemotePlaylist, FetchError> {
    let name = source.playlist_name(playlist_id).await?;

    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut offset = 0;
    loop {
        let page = source.tracks_page(playlist_id, offset).await?;
        let received = page.items.len();
        offset += received;
        items.extend(page.items);

        // an empty page with a next link would never advance
        if page.next.is_none() || received == 0 {
            break;
        }
    }

    let total = items.len();
    let tracks: Vec<TrackRow> = items
        .into_iter()
        .filter_map(|item| item.track)
        .map(|track| track.into_row(&name))
        .collect();

    if tracks.len() < total {
        warning!(
            "Skipped {} entries of playlist '{}' without track data",
            total - tracks.len(),
            name
        );
    }

    Ok(RemotePlaylist {
        id: playlist_id.to_string(),
        name,
        tracks,
    })
}

impl PlaylistSource for SpotifyClient {
    async fn playlist_name(&self, playlist_id: &str) -> Result<String, FetchError> {
        let url = format!(
            "{uri}/playlists/{id}?fields=name",
            uri = self.endpoints().api_url,
            id = playlist_id
        );
        let details: PlaylistDetails = self.get_json(&url).await?;
        Ok(details.name)
    }

    async fn tracks_page(
        &self,
        playlist_id: &str,
        offset: usize,
    ) -> Result<TracksPage, FetchError> {
        let url = format!(
            "{uri}/playlists/{id}/tracks?offset={offset}&limit={limit}",
            uri = self.endpoints().api_url,
            id = playlist_id,
            offset = offset,
            limit = PAGE_SIZE
        );
        let raw: RawTracksPage = self.get_json(&url).await?;

        // Entries are mapped one by one so that a single odd entry (a podcast episode, a
        // broken local file) only loses that entry. It stays in the page as an empty item
        // to keep the offset arithmetic right.
        let items = raw
            .items
            .into_iter()
            .map(|value| {
                serde_json::from_value::<PlaylistItem>(value).unwrap_or_else(|e| {
                    warning!("Error processing track details: {}", e);
                    PlaylistItem::default()
                })
            })
            .collect();

        Ok(TracksPage {
            items,
            next: raw.next,
        })
    }
}

impl SpotifyClient {
    /// Downloads the first cover image of a playlist to `<output_dir>/<name>.jpg`.
    ///
    /// Underscores in the playlist name become spaces in the file name. Any existing file
    /// is replaced.
    ///
    /// # Errors
    ///
    /// [`FetchError::NoCoverImage`] when the playlist has no image,
    /// [`FetchError::Status`] for a non-2xx image response, [`FetchError::Io`] when the
    /// file cannot be written, and the usual request errors.
    pub async fn download_cover(
        &self,
        playlist_id: &str,
        playlist_name: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let url = format!(
            "{uri}/playlists/{id}/images",
            uri = self.endpoints().api_url,
            id = playlist_id
        );
        let images: Vec<Image> = self.get_json(&url).await?;
        let image = images.first().ok_or(FetchError::NoCoverImage)?;

        let response = self.http.get(&image.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: image.url.clone(),
                status,
            });
        }
        let bytes = response.bytes().await?;

        let path = output_dir.join(format!("{}.jpg", utils::cover_file_stem(playlist_name)));
        async_fs::write(&path, &bytes)
            .await
            .map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

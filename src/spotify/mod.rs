//! # Spotify Integration Module
//!
//! Read-only access to public playlists through the Spotify Web API. SpotToBee never acts
//! on behalf of a user, so authentication is the client credentials flow: the client id and
//! secret from the `SpotifyAPI` configuration section are exchanged for a bearer token once
//! per playlist.
//!
//! ## Endpoints
//!
//! - `POST /api/token` - client credentials token ([`auth`])
//! - `GET /playlists/{id}` - playlist name
//! - `GET /playlists/{id}/tracks` - paginated playlist entries
//! - `GET /playlists/{id}/images` - cover art, downloaded from the first image URL
//!
//! ## Error Handling
//!
//! Every call returns a [`FetchError`] instead of printing and carrying on. The CLI treats
//! all of them as "skip this input": a playlist that cannot be fetched does not stop the
//! remaining inputs, and a cover that cannot be downloaded does not stop the conversion.
//! Nothing is retried.
//!
//! ## Pagination
//!
//! [`playlist::fetch_playlist`] is written against the [`playlist::PlaylistSource`] trait and
//! keeps requesting pages until the API reports no further page. [`SpotifyClient`] is the
//! HTTP implementation of that trait.
//!
//! # Example
//!
//! ```
//! use spottobee::spotify::{self, Endpoints, SpotifyClient};
//!
//! async fn tracks(settings: &spottobee::config::Settings) -> Result<usize, spotify::FetchError> {
//!     let client = SpotifyClient::connect(&settings.spotify, Endpoints::default()).await?;
//!     let playlist = spotify::fetch_playlist(&client, "37i9dQZF1DXcBWIGoYBM5M").await?;
//!     Ok(playlist.tracks.len())
//! }
//! ```

pub mod auth;
pub mod playlist;

pub use playlist::{PlaylistSource, fetch_playlist};

use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::{self, SpotifyApi},
    types::AccessToken,
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Spotify Client ID and Client Secret are required")]
    MissingCredentials,
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("playlist has no cover image")]
    NoCoverImage,
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Base URLs of the Web API and the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub token_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: config::SPOTIFY_API_URL.to_string(),
            token_url: config::SPOTIFY_TOKEN_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// API and token endpoint served from the same host, as a local mock server does.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host of the server; a trailing slash is ignored
    ///
    /// # Returns
    ///
    /// Endpoints with the API at `base_url` and the token endpoint at
    /// `<base_url>/api/token`.
    pub fn with_base(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            api_url: base_url.to_string(),
            token_url: format!("{}/api/token", base_url),
        }
    }
}

/// Authenticated client for the playlist endpoints.
pub struct SpotifyClient {
    http: Client,
    endpoints: Endpoints,
    token: AccessToken,
}

impl SpotifyClient {
    /// Requests an access token and returns a client using it.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Client id and secret from the `SpotifyAPI` section
    /// * `endpoints` - Where the API and the token endpoint live
    ///
    /// # Errors
    ///
    /// [`FetchError::MissingCredentials`] when the id or secret is empty, otherwise whatever
    /// [`auth::request_token`] reports.
    pub async fn connect(credentials: &SpotifyApi, endpoints: Endpoints) -> Result<Self, FetchError> {
        if !credentials.has_credentials() {
            return Err(FetchError::MissingCredentials);
        }

        let http = Client::new();
        let token = auth::request_token(&http, &endpoints.token_url, credentials).await?;

        Ok(Self {
            http,
            endpoints,
            token,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

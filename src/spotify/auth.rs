use reqwest::Client;

use crate::{config::SpotifyApi, spotify::FetchError, types::AccessToken};

/// Exchanges the application credentials for an access token.
///
/// Uses the client credentials grant: the id and secret go into HTTP basic auth and the
/// form body only carries `grant_type=client_credentials`. The token grants access to
/// public data only, which is all that reading a shared playlist needs.
///
/// # Errors
///
/// - [`FetchError::Authentication`] when Spotify rejects the credentials; the message
///   contains the status and the response body
/// - [`FetchError::Transport`] on network failures
/// - [`FetchError::Malformed`] when the token response cannot be read
pub async fn request_token(
    http: &Client,
    token_url: &str,
    credentials: &SpotifyApi,
) -> Result<AccessToken, FetchError> {
    let response = http
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Authentication(format!("{}: {}", status, body)));
    }

    Ok(serde_json::from_str::<AccessToken>(&body)?)
}

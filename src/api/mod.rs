pub mod api_structs;

use crate::{
    config::ProcessorConfig,
    error::ProcessorError,
    model::{constants::TOP_PLAY_LIMIT, structures::ruleset::Ruleset}
};
use api_structs::{PlayRecord, TokenResponse, UserResponse};
use reqwest::{header::{HeaderMap, HeaderValue, ACCEPT}, Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

/// Authenticated client for the osu! web API.
///
/// Holds the bearer token obtained from the client-credentials grant; all
/// resource fetches are plain authenticated GETs for JSON documents.
pub struct OsuApiClient {
    client: Client,
    api_base: String,
    token: String
}

fn client() -> Result<Client, ProcessorError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .default_headers(headers)
        .build()
        .map_err(|e| ProcessorError::Fetch(format!("building http client: {e}")))
}

impl OsuApiClient {
    /// Exchanges client credentials for a bearer token and returns a ready
    /// client. Fails with [`ProcessorError::Auth`] if the grant is rejected.
    pub async fn authenticate(
        config: &ProcessorConfig,
        client_id: u64,
        client_secret: &str
    ) -> Result<Self, ProcessorError> {
        let client = client()?;

        let response = client
            .post(format!("{}/oauth/token", config.api_base))
            .json(&json!({
                "client_id": client_id,
                "client_secret": client_secret,
                "grant_type": "client_credentials",
                "scope": "public"
            }))
            .send()
            .await
            .map_err(|e| ProcessorError::Auth(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProcessorError::Auth(e.to_string()))?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProcessorError::Auth(format!("malformed token response: {e}")))?;

        info!("Authenticated ({} token, expires in {}s)", token.token_type, token.expires_in);

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            token: token.access_token
        })
    }

    /// Issues an authenticated GET for a JSON resource at `path`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProcessorError> {
        let response = self
            .client
            .get(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ProcessorError::Fetch(format!("GET {path}: {e}")))?
            .error_for_status()
            .map_err(|e| ProcessorError::Fetch(format!("GET {path}: {e}")))?;

        response
            .json()
            .await
            .map_err(|e| ProcessorError::Parse(format!("GET {path}: {e}")))
    }

    /// Fetches the profile for `identifier` (numeric id or username) on the
    /// given ruleset.
    pub async fn get_user(&self, identifier: &str, ruleset: Ruleset) -> Result<UserResponse, ProcessorError> {
        self.get_json(&format!("/api/v2/users/{identifier}/{}", ruleset.api_name()))
            .await
    }

    /// Fetches the profile's top plays, best first, up to the service's
    /// top-play limit.
    pub async fn get_top_plays(&self, user_id: u32, ruleset: Ruleset) -> Result<Vec<PlayRecord>, ProcessorError> {
        self.get_json(&format!(
            "/api/v2/users/{user_id}/scores/best?mode={}&limit={TOP_PLAY_LIMIT}",
            ruleset.api_name()
        ))
        .await
    }
}

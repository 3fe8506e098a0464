pub(crate) mod auth;
pub(crate) mod matches;

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::CredentialProvider;
use crate::error::{LeagueError, Result};

/// Join the backend base URL and an endpoint path with exactly one `/`.
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Attach the provider's `Authorization` header, if it has one.
pub(crate) fn authorize(
    request: RequestBuilder,
    credentials: &dyn CredentialProvider,
) -> RequestBuilder {
    match credentials.authorization() {
        Some(value) => request.header(AUTHORIZATION, value.expose_secret()),
        None => request,
    }
}

/// Send a request and fail on transport errors or non-success statuses.
pub(crate) async fn send(request: RequestBuilder, url: &str) -> Result<reqwest::Response> {
    debug!(url, "sending request");

    let response = request.send().await.map_err(|e| LeagueError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LeagueError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    Ok(response)
}

/// [`send`] and decode the JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> Result<T> {
    send(request, url)
        .await?
        .json()
        .await
        .map_err(|e| LeagueError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
}

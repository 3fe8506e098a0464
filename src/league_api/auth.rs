use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::league_api::{self, api_url};
use crate::model::LoginResponse;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[instrument(skip(client, password))]
pub(crate) async fn login(
    client: &reqwest::Client,
    base: &str,
    email: &str,
    password: &str,
) -> Result<LoginResponse> {
    let url = api_url(base, "/auth/login");
    let request = client.post(&url).json(&LoginRequest { email, password });
    let response: LoginResponse = league_api::send_json(request, &url).await?;
    debug!(has_user = response.user.is_some(), "logged in");
    Ok(response)
}

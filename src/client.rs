use std::sync::Arc;

use tracing::instrument;

use crate::auth::{CredentialProvider, Credentials, Session};
use crate::config::ClientSettings;
use crate::error::{LeagueError, Result};
use crate::league_api;
use crate::model::{LoginResponse, MatchRecord, MatchScore, NewMatch, UserClaims, ValidatedScore};
use crate::validation::validate;

/// The main entry point for talking to the league backend.
///
/// `LeagueClient` wraps a [`reqwest::Client`] and a [`CredentialProvider`]
/// that decorates every authenticated request. A client built with
/// [`LeagueClient::with_session`] also owns the [`Session`] that
/// [`LeagueClient::sign_in`] fills, so the credentials it stores are the
/// ones sent afterwards.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> league_scores::Result<()> {
/// use std::sync::Arc;
/// use league_scores::{ClientSettings, LeagueClient, MatchScore, Session};
///
/// let settings = ClientSettings::from_env()?;
/// let session = Arc::new(Session::new(settings.auth_mode));
/// let client = LeagueClient::with_session(&settings, session)?;
///
/// client.sign_in("ana@example.com", "s3cret").await?;
/// let score = client
///     .update_score("match-1", &MatchScore::with_tiebreak(7, 6, 7, 4))
///     .await?;
/// println!("saved {}", score.label());
/// # Ok(())
/// # }
/// ```
pub struct LeagueClient {
    http: reqwest::Client,
    api_base: String,
    credentials: Arc<dyn CredentialProvider>,
    session: Option<Arc<Session>>,
}

impl LeagueClient {
    /// Create a client with the timeout from `settings` and fixed credentials.
    pub fn new(
        settings: &ClientSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        Ok(Self::with_client(http_client(settings)?, settings, credentials))
    }

    /// Create a client whose requests are authorized by `session`.
    ///
    /// [`LeagueClient::sign_in`] stores its result in this same session.
    pub fn with_session(settings: &ClientSettings, session: Arc<Session>) -> Result<Self> {
        Ok(Self::from_parts(
            http_client(settings)?,
            settings,
            session.clone(),
            Some(session),
        ))
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(
        client: reqwest::Client,
        settings: &ClientSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self::from_parts(client, settings, credentials, None)
    }

    fn from_parts(
        client: reqwest::Client,
        settings: &ClientSettings,
        credentials: Arc<dyn CredentialProvider>,
        session: Option<Arc<Session>>,
    ) -> Self {
        Self {
            http: client,
            api_base: settings.api_base.clone(),
            credentials,
            session,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// The session this client signs in to, if it was built with one.
    pub fn session(&self) -> Option<&Arc<Session>> {
        self.session.as_ref()
    }

    /// Exchange email and password for a session token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        league_api::auth::login(&self.http, &self.api_base, email, password).await
    }

    /// Log in and store the result in the client's session, returning the
    /// signed-in user.
    ///
    /// In BASIC mode the email and password are kept in the session for later
    /// requests. Fails with [`LeagueError::NoSession`] before any request when
    /// the client was not built with [`LeagueClient::with_session`].
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Option<UserClaims>> {
        let session = self.session.as_ref().ok_or(LeagueError::NoSession)?;
        let response = self.login(email, password).await?;
        Ok(session.login(response, Some(Credentials::basic(email, password))))
    }

    /// Fetch every match record visible to the current user.
    #[instrument(skip(self))]
    pub async fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        let credentials = self.credentials.as_ref();
        league_api::matches::list_matches(&self.http, &self.api_base, credentials).await
    }

    /// Schedule a new match. Its score starts unset.
    ///
    /// Blank athlete ids or venue are rejected before any request is made.
    #[instrument(skip(self, new_match))]
    pub async fn create_match(&self, new_match: &NewMatch) -> Result<()> {
        if let Some(field) = new_match.missing_field() {
            return Err(LeagueError::IncompleteMatch { field });
        }
        league_api::matches::create_match(
            &self.http,
            &self.api_base,
            self.credentials.as_ref(),
            new_match,
        )
        .await
    }

    /// Validate `score` and, if it is a legal set, save it on the match.
    ///
    /// Invalid scores are rejected before any request is made.
    #[instrument(skip(self))]
    pub async fn update_score(&self, match_id: &str, score: &MatchScore) -> Result<ValidatedScore> {
        let validated = validate(score)?;
        league_api::matches::update_score(
            &self.http,
            &self.api_base,
            self.credentials.as_ref(),
            match_id,
            &validated,
        )
        .await?;
        Ok(validated)
    }
}

fn http_client(settings: &ClientSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .map_err(|e| LeagueError::Http {
            url: settings.api_base.clone(),
            source: e,
        })
}

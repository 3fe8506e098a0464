//! Credentials attached to outgoing requests.
//!
//! The client never reads ambient state: whoever builds a [`crate::LeagueClient`]
//! hands it a [`CredentialProvider`], usually a shared [`Session`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{LoginResponse, UserClaims};

/// How the backend expects requests to be authenticated.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(try_from = "String")]
pub enum AuthMode {
    #[default]
    Jwt,
    Basic,
}

impl TryFrom<String> for AuthMode {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.trim().parse()
    }
}

/// Something that can produce an `Authorization` header value.
pub trait CredentialProvider: Send + Sync {
    fn authorization(&self) -> Option<SecretString>;
}

#[derive(Debug, Clone)]
pub enum Credentials {
    Bearer(SecretString),
    Basic {
        email: String,
        password: SecretString,
    },
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(SecretString::from(token.into()))
    }

    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl CredentialProvider for Credentials {
    fn authorization(&self) -> Option<SecretString> {
        let value = match self {
            Credentials::Bearer(token) => format!("Bearer {}", token.expose_secret()),
            Credentials::Basic { email, password } => {
                let pair = format!("{email}:{}", password.expose_secret());
                format!("Basic {}", STANDARD.encode(pair))
            }
        };
        Some(SecretString::from(value))
    }
}

impl CredentialProvider for Option<Credentials> {
    fn authorization(&self) -> Option<SecretString> {
        self.as_ref().and_then(CredentialProvider::authorization)
    }
}

/// Decode the claims of a session token without checking its signature.
///
/// The client does not hold the signing secret; the backend verifies every request.
pub fn decode_claims(token: &str) -> Result<UserClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let key = DecodingKey::from_secret(&[]);
    let data = jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?;
    Ok(data.claims)
}

#[derive(Debug, Default)]
struct SessionState {
    credentials: Option<Credentials>,
    user: Option<UserClaims>,
}

/// The logged-in user and the credentials to send on their behalf.
#[derive(Debug, Default)]
pub struct Session {
    mode: AuthMode,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            state: RwLock::default(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Start a session from a login response.
    ///
    /// With JWT the user comes from the token claims, falling back to the user
    /// the backend returned. With BASIC the email and password are kept in
    /// memory and sent on every request; without them the token is sent as a
    /// bearer token.
    pub fn login(&self, response: LoginResponse, basic: Option<Credentials>) -> Option<UserClaims> {
        let (credentials, user) = match self.mode {
            AuthMode::Jwt => {
                let user = match decode_claims(&response.token) {
                    Ok(claims) => Some(claims),
                    Err(e) => {
                        warn!(error = %e, "could not decode session token, using returned user");
                        response.user
                    }
                };
                (Credentials::bearer(response.token), user)
            }
            AuthMode::Basic => {
                let credentials = basic
                    .filter(|c| matches!(c, Credentials::Basic { .. }))
                    .unwrap_or_else(|| Credentials::bearer(response.token));
                (credentials, response.user)
            }
        };

        debug!(mode = %self.mode, has_user = user.is_some(), "session started");
        let mut state = self.write();
        state.credentials = Some(credentials);
        state.user = user.clone();
        user
    }

    pub fn logout(&self) {
        *self.write() = SessionState::default();
        debug!("session cleared");
    }

    pub fn user(&self) -> Option<UserClaims> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user.is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialProvider for Session {
    fn authorization(&self) -> Option<SecretString> {
        self.read().credentials.authorization()
    }
}

use serde::{Deserialize, Serialize};

/// User identifiers come back as numbers from some endpoints and as strings
/// from others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

/// The logged-in user, as carried in the JWT payload or returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: UserId,
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "atletaId", default)]
    pub athlete_id: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Body returned by `POST /auth/login`.
///
/// In BASIC mode the token is a placeholder and `user` is what identifies the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "usuario", default)]
    pub user: Option<UserClaims>,
}

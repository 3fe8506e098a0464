use serde::Serialize;
use tracing::{debug, instrument};

use crate::auth::CredentialProvider;
use crate::error::Result;
use crate::league_api::{self, api_url, authorize};
use crate::model::{MatchRecord, NewMatch, ValidatedScore};

/// Body of the score update endpoint. Tiebreak points are `null` unless the
/// set went to a tiebreak.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ScorePayload {
    #[serde(rename = "gamesTime1")]
    games_a: u32,
    #[serde(rename = "gamesTime2")]
    games_b: u32,
    #[serde(rename = "tiebreakTime1")]
    tiebreak_a: Option<u32>,
    #[serde(rename = "tiebreakTime2")]
    tiebreak_b: Option<u32>,
}

impl From<&ValidatedScore> for ScorePayload {
    fn from(score: &ValidatedScore) -> Self {
        Self {
            games_a: score.games_a(),
            games_b: score.games_b(),
            tiebreak_a: score.tiebreak().map(|(a, _)| a),
            tiebreak_b: score.tiebreak().map(|(_, b)| b),
        }
    }
}

#[instrument(skip(client, credentials))]
pub(crate) async fn list_matches(
    client: &reqwest::Client,
    base: &str,
    credentials: &dyn CredentialProvider,
) -> Result<Vec<MatchRecord>> {
    let url = api_url(base, "/partida/listarPartidas");
    let request = authorize(client.get(&url), credentials);
    let matches: Vec<MatchRecord> = league_api::send_json(request, &url).await?;
    debug!(count = matches.len(), "fetched match list");
    Ok(matches)
}

#[instrument(skip(client, credentials, score), fields(score = %score.label()))]
pub(crate) async fn update_score(
    client: &reqwest::Client,
    base: &str,
    credentials: &dyn CredentialProvider,
    match_id: &str,
    score: &ValidatedScore,
) -> Result<()> {
    let url = api_url(base, &format!("/partida/atualizarPlacar/{match_id}/placar"));
    let request = authorize(client.put(&url), credentials).json(&ScorePayload::from(score));
    league_api::send(request, &url).await?;
    debug!(match_id, "score updated");
    Ok(())
}

#[instrument(skip(client, credentials, new_match), fields(venue = %new_match.venue))]
pub(crate) async fn create_match(
    client: &reqwest::Client,
    base: &str,
    credentials: &dyn CredentialProvider,
    new_match: &NewMatch,
) -> Result<()> {
    let url = api_url(base, "/partida/criarPartida");
    let request = authorize(client.post(&url), credentials).json(new_match);
    league_api::send(request, &url).await?;
    debug!(played_at = %new_match.played_at, "match created");
    Ok(())
}

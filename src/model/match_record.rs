use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{MatchScore, Side, ValidatedScore};

/// An athlete as embedded in a match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub id: String,
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A match as stored by the league backend.
///
/// Athletes 1 and 2 play on side A, athletes 3 and 4 on side B. Singles
/// matches leave one slot per side empty. `played_at` is `None` when the
/// backend sent no usable date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub id: String,
    #[serde(rename = "data", default, with = "played_at_format")]
    pub played_at: Option<NaiveDateTime>,
    #[serde(rename = "local", default)]
    pub venue: Option<String>,
    #[serde(rename = "atleta1", default)]
    pub athlete1: Option<Athlete>,
    #[serde(rename = "atleta2", default)]
    pub athlete2: Option<Athlete>,
    #[serde(rename = "atleta3", default)]
    pub athlete3: Option<Athlete>,
    #[serde(rename = "atleta4", default)]
    pub athlete4: Option<Athlete>,
    #[serde(rename = "gamesTime1", default)]
    pub games_a: Option<u32>,
    #[serde(rename = "gamesTime2", default)]
    pub games_b: Option<u32>,
    #[serde(rename = "tiebreakTime1", default)]
    pub tiebreak_a: Option<u32>,
    #[serde(rename = "tiebreakTime2", default)]
    pub tiebreak_b: Option<u32>,
}

/// Scoring format of a new match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    /// A single set to 6 games.
    #[default]
    #[serde(rename = "6games")]
    SixGames,
}

/// Body of `POST /partida/criarPartida`. The new match starts with an unset score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMatch {
    #[serde(rename = "atleta1Id")]
    pub athlete1_id: String,
    #[serde(rename = "atleta2Id")]
    pub athlete2_id: String,
    #[serde(rename = "atleta3Id")]
    pub athlete3_id: String,
    #[serde(rename = "atleta4Id")]
    pub athlete4_id: String,
    /// Local date-time, sent without an offset so the backend does not shift it.
    #[serde(rename = "data", serialize_with = "played_at_format::serialize_local")]
    pub played_at: NaiveDateTime,
    #[serde(rename = "local")]
    pub venue: String,
    #[serde(rename = "formato")]
    pub format: MatchFormat,
    #[serde(rename = "torneioId")]
    pub tournament_id: Option<String>,
}

impl NewMatch {
    /// A friendly (non-tournament) match: `side_a` against `side_b`.
    pub fn friendly(
        side_a: [&str; 2],
        side_b: [&str; 2],
        played_at: NaiveDateTime,
        venue: &str,
    ) -> Self {
        Self {
            athlete1_id: side_a[0].to_string(),
            athlete2_id: side_a[1].to_string(),
            athlete3_id: side_b[0].to_string(),
            athlete4_id: side_b[1].to_string(),
            played_at,
            venue: venue.trim().to_string(),
            format: MatchFormat::default(),
            tournament_id: None,
        }
    }

    /// The first required field left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("atleta1Id", &self.athlete1_id),
            ("atleta2Id", &self.athlete2_id),
            ("atleta3Id", &self.athlete3_id),
            ("atleta4Id", &self.athlete4_id),
            ("local", &self.venue),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl MatchRecord {
    pub fn score(&self) -> MatchScore {
        MatchScore {
            games_a: self.games_a,
            games_b: self.games_b,
            tiebreak_a: self.tiebreak_a,
            tiebreak_b: self.tiebreak_b,
        }
    }

    /// Overwrite the current score with a validated one.
    pub fn apply_score(&mut self, score: &ValidatedScore) {
        let score = score.to_score();
        self.games_a = score.games_a;
        self.games_b = score.games_b;
        self.tiebreak_a = score.tiebreak_a;
        self.tiebreak_b = score.tiebreak_b;
    }

    pub fn side_a(&self) -> impl Iterator<Item = &Athlete> {
        self.athlete1.iter().chain(self.athlete2.iter())
    }

    pub fn side_b(&self) -> impl Iterator<Item = &Athlete> {
        self.athlete3.iter().chain(self.athlete4.iter())
    }

    /// The side `athlete_id` plays on, if they play in this match at all.
    pub fn side_of(&self, athlete_id: &str) -> Option<Side> {
        if self.side_a().any(|a| a.id == athlete_id) {
            Some(Side::A)
        } else if self.side_b().any(|a| a.id == athlete_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, athlete_id: &str) -> bool {
        self.side_of(athlete_id).is_some()
    }
}

/// Ids arrive as strings from some endpoints and as numbers from others.
mod id_format {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        })
    }
}

/// The backend sends either a local date-time (`2025-03-01T18:30:00`) or an
/// RFC 3339 timestamp. Timestamps with an offset are normalized to UTC.
/// Missing, null or unparsable dates become `None`.
mod played_at_format {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serialize_local(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn serialize_local<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(OUTPUT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let parsed = DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, LOCAL_FORMAT));
        match parsed {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(raw = %raw, error = %e, "ignoring unparsable match date");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_JSON: &str = r#"{
        "id": "m-1",
        "data": "2025-03-01T18:30:00.000Z",
        "local": "Clube Central",
        "atleta1": { "id": "a1", "nome": "Ana" },
        "atleta2": { "id": "a2", "nome": "Bia" },
        "atleta3": { "id": "a3" },
        "atleta4": null,
        "gamesTime1": 7,
        "gamesTime2": 6,
        "tiebreakTime1": 7,
        "tiebreakTime2": 4
    }"#;

    #[test]
    fn test_deserialize_record() {
        let record: MatchRecord = serde_json::from_str(RECORD_JSON).unwrap();
        assert_eq!(record.id, "m-1");
        assert_eq!(record.venue.as_deref(), Some("Clube Central"));
        assert_eq!(record.score(), MatchScore::with_tiebreak(7, 6, 7, 4));
        assert_eq!(
            record.athlete1.as_ref().and_then(|a| a.name.as_deref()),
            Some("Ana")
        );
        assert!(record.athlete4.is_none());
        assert_eq!(
            record.played_at.map(|d| d.to_string()).as_deref(),
            Some("2025-03-01 18:30:00")
        );
    }

    #[test]
    fn test_numeric_ids_and_missing_dates_are_tolerated() {
        let json = r#"[
            { "id": 12, "data": null, "atleta1": { "id": 7 }, "gamesTime1": 6, "gamesTime2": 2 },
            { "id": "m-2", "data": "not a date" },
            { "id": "m-3" }
        ]"#;
        let records: Vec<MatchRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "12");
        assert_eq!(records[0].side_of("7"), Some(Side::A));
        assert!(records.iter().all(|r| r.played_at.is_none()));
    }

    #[test]
    fn test_new_match_payload() {
        let played_at = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        let new_match = NewMatch::friendly(["a1", "a2"], ["a3", "a4"], played_at, " Court 2 ");
        assert_eq!(new_match.missing_field(), None);

        let payload = serde_json::to_value(&new_match).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "atleta1Id": "a1",
                "atleta2Id": "a2",
                "atleta3Id": "a3",
                "atleta4Id": "a4",
                "data": "2025-06-01T19:30:00",
                "local": "Court 2",
                "formato": "6games",
                "torneioId": null
            })
        );
    }

    #[test]
    fn test_new_match_missing_field() {
        let played_at = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let no_partner = NewMatch::friendly(["a1", ""], ["a3", "a4"], played_at, "Court 2");
        assert_eq!(no_partner.missing_field(), Some("atleta2Id"));

        let no_venue = NewMatch::friendly(["a1", "a2"], ["a3", "a4"], played_at, "  ");
        assert_eq!(no_venue.missing_field(), Some("local"));
    }

    #[test]
    fn test_deserialize_unset_record_with_local_date() {
        let json = r#"{ "id": "m-2", "data": "2025-04-10T09:00:00", "atleta1": { "id": "a1" } }"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert!(!record.score().is_set());
        assert!(record.venue.is_none());
        assert!(record.played_at.is_some());
    }

    #[test]
    fn test_side_of() {
        let record: MatchRecord = serde_json::from_str(RECORD_JSON).unwrap();
        assert_eq!(record.side_of("a1"), Some(Side::A));
        assert_eq!(record.side_of("a2"), Some(Side::A));
        assert_eq!(record.side_of("a3"), Some(Side::B));
        assert_eq!(record.side_of("zz"), None);
        assert!(!record.involves("zz"));
    }

    #[test]
    fn test_apply_score_replaces_tiebreak() {
        let mut record: MatchRecord = serde_json::from_str(RECORD_JSON).unwrap();
        let corrected = ValidatedScore::new(6, 4, None, Side::A);
        record.apply_score(&corrected);
        assert_eq!(record.score(), MatchScore::games(6, 4));
    }
}

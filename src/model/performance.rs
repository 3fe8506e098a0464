use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::SetResult;

/// One decided match in an athlete's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceEntry {
    pub match_id: String,
    pub played_at: NaiveDateTime,
    pub score_label: String,
    pub result: SetResult,
    pub venue: String,
}

/// Time window for performance views, counted back from "now".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::EnumString,
    strum_macros::Display,
)]
pub enum Period {
    #[default]
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "30")]
    Last30Days,
    #[strum(serialize = "90")]
    Last90Days,
    #[strum(serialize = "365")]
    Last365Days,
}

impl Period {
    pub fn days(self) -> Option<i64> {
        match self {
            Period::All => None,
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            Period::Last365Days => Some(365),
        }
    }
}

mod auth;
mod match_record;
mod performance;
mod score;

pub use auth::*;
pub use match_record::*;
pub use performance::*;
pub use score::*;

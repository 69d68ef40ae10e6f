mod identity;
mod ids;
mod question;
mod stats;

pub use identity::Identity;
pub use ids::{IdError, QuestionId, UserId};
pub use question::{MIN_OPTIONS, Question, QuestionDraft, QuestionError, Subject};
pub use stats::{RankEntry, SessionCounts, UserStats, rank_entries};

use quiz_core::model::{RankEntry, UserStats};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const ANONYMOUS_NAME: &str = "익명";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankRowVm {
    pub key: String,
    pub rank_label: String,
    pub name: String,
    pub correct: u32,
    pub solved: u32,
    pub accuracy: String,
    pub is_leader: bool,
}

#[must_use]
pub fn map_rank_rows(entries: &[RankEntry]) -> Vec<RankRowVm> {
    entries
        .iter()
        .map(|entry| RankRowVm {
            key: entry.stats.user_id().as_str().to_owned(),
            rank_label: rank_label(entry.rank),
            name: display_name(&entry.stats),
            correct: entry.stats.total_correct(),
            solved: entry.stats.total_solved(),
            accuracy: format!("{}%", entry.stats.accuracy()),
            is_leader: entry.rank == 1,
        })
        .collect()
}

fn rank_label(rank: usize) -> String {
    rank.checked_sub(1)
        .and_then(|i| MEDALS.get(i))
        .map_or_else(|| rank.to_string(), |medal| (*medal).to_owned())
}

/// Local part of the email; players without one are anonymous.
fn display_name(stats: &UserStats) -> String {
    stats
        .email()
        .and_then(|email| email.split('@').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS_NAME)
        .to_owned()
}

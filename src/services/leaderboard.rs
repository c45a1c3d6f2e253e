use crate::db::ScoreHistory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub best_score: u32,
}

/// Each user's best score, highest first, ties broken by username.
/// Users without a recorded score are left out.
pub fn top_scores(histories: Vec<ScoreHistory>, limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = histories
        .into_iter()
        .filter_map(|h| {
            h.scores.iter().max().map(|&best_score| LeaderboardEntry {
                username: h.username,
                best_score,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.best_score
            .cmp(&a.best_score)
            .then_with(|| a.username.cmp(&b.username))
    });
    entries.truncate(limit);
    entries
}

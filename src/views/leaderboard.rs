use maud::{html, Markup};

use crate::services::leaderboard::LeaderboardEntry;

pub fn leaderboard(entries: &[LeaderboardEntry]) -> Markup {
    html! {
        h1 { "Leaderboard" }
        @if entries.is_empty() {
            p { "No scores yet. Finish a quiz to claim the top spot." }
        } @else {
            table {
                thead {
                    tr {
                        th scope="col" { "#" }
                        th scope="col" { "User" }
                        th scope="col" { "Best score" }
                    }
                }
                tbody {
                    @for (rank, entry) in entries.iter().enumerate() {
                        tr {
                            td { (rank + 1) }
                            td { (entry.username) }
                            td { (entry.best_score) }
                        }
                    }
                }
            }
        }
    }
}

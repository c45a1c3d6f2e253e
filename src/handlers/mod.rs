pub mod homepage;
pub mod leaderboard;
pub mod quiz;

pub mod components;
pub mod homepage;
pub mod layout;
pub mod leaderboard;
pub mod quiz;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};

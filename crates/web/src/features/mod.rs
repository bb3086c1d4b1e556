pub mod guild;
pub mod leaderboard;
pub mod players;

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod traits;

pub use client::WynncraftClient;
pub use error::{Result, RosterError};
pub use models::PlayerProfile;
pub use normalize::{compute_current_leaderboard, top_members};
pub use pipeline::WeeklyRefresh;
pub use rank::Rank;
pub use traits::RosterSource;

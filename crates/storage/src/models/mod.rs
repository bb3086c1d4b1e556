pub mod difference_member;
pub mod leaderboard;
pub mod lock_record;
pub mod member;

pub use difference_member::DifferenceMember;
pub use leaderboard::Leaderboard;
pub use lock_record::LockRecord;
pub use member::Member;

pub mod lock;

pub use lock::LockRepository;

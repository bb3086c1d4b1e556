pub mod guild;
pub mod lock;
pub mod weekly;

pub mod employees;
pub mod error;
pub mod health;
pub mod vacations;

pub use error::AppError;

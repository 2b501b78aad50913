mod error;
mod operations;
mod requests;
mod types;

pub use error::*;
pub use operations::*;
pub use requests::*;
pub use types::*;

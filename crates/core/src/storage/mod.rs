mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::{EmployeeRepository, VacationRepository};
pub use types::{Page, VacationFilter};

use async_trait::async_trait;

use crate::staff::{Employee, EmployeeUpdate, NewEmployee, NewVacation, Vacation};

use super::{Page, Result, VacationFilter};

/// Repository for employee operations.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Gets an employee, with vacations, by ID.
    async fn get_employee(&self, id: i64) -> Result<Option<Employee>>;

    /// Lists employees ordered by ID.
    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>>;

    /// Creates a new employee and returns it with its assigned ID.
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee>;

    /// Applies a partial update. Fails with `NotFound` if the employee is absent.
    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee>;

    /// Deletes an employee and its vacations. Fails with `NotFound` if absent.
    async fn delete_employee(&self, id: i64) -> Result<()>;

    /// Lists the vacations owned by one employee, ordered by ID.
    async fn list_vacations_for_employee(
        &self,
        employee_id: i64,
        page: Page,
    ) -> Result<Vec<Vacation>>;
}

/// Repository for vacation operations.
#[async_trait]
pub trait VacationRepository: Send + Sync {
    /// Gets a vacation by its ID.
    async fn get_vacation(&self, id: i64) -> Result<Option<Vacation>>;

    /// Lists vacations matching the filter, ordered by ID.
    async fn list_vacations(&self, filter: VacationFilter, page: Page) -> Result<Vec<Vacation>>;

    /// Lists vacations with no decision yet, ordered by ID.
    async fn list_pending_vacations(&self, page: Page) -> Result<Vec<Vacation>>;

    /// Creates a vacation. Fails with `NotFound` if the owner does not exist.
    async fn create_vacation(&self, vacation: &NewVacation) -> Result<Vacation>;

    /// Records an approval decision and returns the updated vacation.
    async fn set_vacation_approval(&self, id: i64, approved: bool) -> Result<Vacation>;

    /// Deletes a vacation. Fails with `NotFound` if absent.
    async fn delete_vacation(&self, id: i64) -> Result<()>;
}

//! Cached employee repository decorator.

use std::sync::Arc;

use async_trait::async_trait;

use hrdesk_core::cache::{Cache, CacheCoordinator, CacheKeys};
use hrdesk_core::staff::{Employee, EmployeeUpdate, NewEmployee, Vacation};
use hrdesk_core::storage::{EmployeeRepository, Page, Result};

/// Cached employee repository decorator.
///
/// - `get_employee` reads through `{ns}:employee_cache:{id}`.
/// - `list_employees` reads through `{ns}:employees:{offset}:{limit}`. Those
///   pages are never invalidated and go stale until their TTL runs out.
/// - Updates and deletes drop the single-employee key after they succeed.
/// - Per-employee vacation lists are not cached.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedEmployeeRepository<R, C>
where
    R: EmployeeRepository + ?Sized,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    coordinator: CacheCoordinator<C>,
    keys: CacheKeys,
}

impl<R, C> CachedEmployeeRepository<R, C>
where
    R: EmployeeRepository + ?Sized,
    C: Cache + ?Sized,
{
    /// Creates a new cached employee repository.
    pub fn new(repository: Arc<R>, coordinator: CacheCoordinator<C>, keys: CacheKeys) -> Self {
        Self {
            repository,
            coordinator,
            keys,
        }
    }
}

#[async_trait]
impl<R, C> EmployeeRepository for CachedEmployeeRepository<R, C>
where
    R: EmployeeRepository + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    #[tracing::instrument(skip(self))]
    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let key = self.keys.employee(id);
        self.coordinator
            .read_through(&key, || self.repository.get_employee(id))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>> {
        let key = self.keys.employee_page(page);
        self.coordinator
            .read_through_all(&key, || self.repository.list_employees(page))
            .await
    }

    #[tracing::instrument(skip(self, employee))]
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let created = self.repository.create_employee(employee).await?;
        tracing::debug!(employee_id = created.id, "Employee created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee> {
        let updated = self.repository.update_employee(id, update).await?;
        self.coordinator
            .invalidate(&self.keys.employee_changed(id))
            .await;
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_employee(&self, id: i64) -> Result<()> {
        self.repository.delete_employee(id).await?;
        self.coordinator
            .invalidate(&self.keys.employee_changed(id))
            .await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_vacations_for_employee(
        &self,
        employee_id: i64,
        page: Page,
    ) -> Result<Vec<Vacation>> {
        self.repository
            .list_vacations_for_employee(employee_id, page)
            .await
    }
}

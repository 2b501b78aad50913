//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hrdesk_core::staff::{
    filter_by_approval, filter_pending, Employee, EmployeeUpdate, NewEmployee, NewVacation,
    Vacation,
};
use hrdesk_core::storage::{
    EmployeeRepository, Page, RepositoryError, Result, VacationFilter, VacationRepository,
};

/// Employee row without the vacation collection.
#[derive(Debug, Clone)]
struct EmployeeRecord {
    name: String,
    user_id: i64,
}

/// Sequence-backed tables.
#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<i64, EmployeeRecord>,
    vacations: BTreeMap<i64, Vacation>,
    last_employee_id: i64,
    last_vacation_id: i64,
}

impl Tables {
    fn vacations_of(&self, employee_id: i64) -> Vec<Vacation> {
        self.vacations
            .values()
            .filter(|v| v.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn employee(&self, id: i64) -> Option<Employee> {
        self.employees.get(&id).map(|record| {
            Employee::new(id, record.name.clone(), record.user_id)
                .with_vacations(self.vacations_of(id))
        })
    }
}

/// In-memory storage backend for testing.
///
/// Both tables share one lock so the employee-to-vacation cascade is atomic.
/// IDs are assigned from per-table sequences starting at 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables.employee(id))
    }

    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>> {
        let tables = self.tables.read().await;
        let ids: Vec<i64> = tables.employees.keys().copied().collect();
        Ok(page
            .slice(&ids)
            .iter()
            .filter_map(|id| tables.employee(*id))
            .collect())
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let mut tables = self.tables.write().await;
        tables.last_employee_id += 1;
        let id = tables.last_employee_id;
        tables.employees.insert(
            id,
            EmployeeRecord {
                name: employee.name.clone(),
                user_id: employee.user_id,
            },
        );
        Ok(Employee::new(id, employee.name.clone(), employee.user_id))
    }

    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee> {
        let mut tables = self.tables.write().await;
        let mut employee = tables
            .employee(id)
            .ok_or_else(|| RepositoryError::employee_not_found(id))?;

        update.apply_to(&mut employee);
        tables.employees.insert(
            id,
            EmployeeRecord {
                name: employee.name.clone(),
                user_id: employee.user_id,
            },
        );
        Ok(employee)
    }

    async fn delete_employee(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.employees.remove(&id).is_none() {
            return Err(RepositoryError::employee_not_found(id));
        }
        tables.vacations.retain(|_, v| v.employee_id != id);
        Ok(())
    }

    async fn list_vacations_for_employee(
        &self,
        employee_id: i64,
        page: Page,
    ) -> Result<Vec<Vacation>> {
        let tables = self.tables.read().await;
        Ok(page.slice(&tables.vacations_of(employee_id)).to_vec())
    }
}

#[async_trait]
impl VacationRepository for InMemoryRepository {
    async fn get_vacation(&self, id: i64) -> Result<Option<Vacation>> {
        let tables = self.tables.read().await;
        Ok(tables.vacations.get(&id).cloned())
    }

    async fn list_vacations(&self, filter: VacationFilter, page: Page) -> Result<Vec<Vacation>> {
        let tables = self.tables.read().await;
        let all: Vec<Vacation> = tables.vacations.values().cloned().collect();
        let matching: Vec<Vacation> = filter_by_approval(&all, filter.approved)
            .into_iter()
            .cloned()
            .collect();
        Ok(page.slice(&matching).to_vec())
    }

    async fn list_pending_vacations(&self, page: Page) -> Result<Vec<Vacation>> {
        let tables = self.tables.read().await;
        let all: Vec<Vacation> = tables.vacations.values().cloned().collect();
        let pending: Vec<Vacation> = filter_pending(&all).into_iter().cloned().collect();
        Ok(page.slice(&pending).to_vec())
    }

    async fn create_vacation(&self, vacation: &NewVacation) -> Result<Vacation> {
        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&vacation.employee_id) {
            return Err(RepositoryError::employee_not_found(vacation.employee_id));
        }

        tables.last_vacation_id += 1;
        let id = tables.last_vacation_id;
        let created = Vacation::pending(
            id,
            vacation.employee_id,
            vacation.start_date,
            vacation.end_date,
        )
        .with_approval(vacation.approved);
        tables.vacations.insert(id, created.clone());
        Ok(created)
    }

    async fn set_vacation_approval(&self, id: i64, approved: bool) -> Result<Vacation> {
        let mut tables = self.tables.write().await;
        let vacation = tables
            .vacations
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::vacation_not_found(id))?;
        vacation.approved = Some(approved);
        Ok(vacation.clone())
    }

    async fn delete_vacation(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.vacations.remove(&id).is_none() {
            return Err(RepositoryError::vacation_not_found(id));
        }
        Ok(())
    }
}

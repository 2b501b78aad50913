//! SQLite repository implementation.
//!
//! Implements the repository traits from `hrdesk_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use hrdesk_core::staff::{Employee, EmployeeUpdate, NewEmployee, NewVacation, Vacation};
use hrdesk_core::storage::{
    EmployeeRepository, Page, RepositoryError, Result, VacationFilter, VacationRepository,
};

use super::conversions::{format_date, row_to_employee, row_to_vacation};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Loads one employee and all of their vacations.
fn load_employee(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Employee>> {
    let employee = match conn.query_row(schema::SELECT_EMPLOYEE_BY_ID, [id], row_to_employee) {
        Ok(employee) => employee,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e),
    };
    let vacations = load_vacations(conn, schema::SELECT_VACATIONS_BY_EMPLOYEE, [id])?;
    Ok(Some(employee.with_vacations(vacations)))
}

fn load_vacations<P: rusqlite::Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<Vacation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_vacation)?;
    rows.collect()
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for employees and vacations.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// EmployeeRepository implementation
// ============================================================================

#[async_trait]
impl EmployeeRepository for SqliteRepository {
    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        self.conn
            .call(move |conn| load_employee(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Employee", id))
    }

    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EMPLOYEES_PAGE)
                    .map_err(wrap_err)?;
                let employees = stmt
                    .query_map([page.limit, page.offset], row_to_employee)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;

                let mut loaded = Vec::with_capacity(employees.len());
                for employee in employees {
                    let vacations =
                        load_vacations(conn, schema::SELECT_VACATIONS_BY_EMPLOYEE, [employee.id])
                            .map_err(wrap_err)?;
                    loaded.push(employee.with_vacations(vacations));
                }
                Ok(loaded)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let name = employee.name.clone();
        let user_id = employee.user_id;

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_EMPLOYEE, rusqlite::params![name, user_id])
                    .map_err(wrap_err)?;
                Ok(Employee::new(conn.last_insert_rowid(), name, user_id))
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee> {
        let update = update.clone();

        self.conn
            .call(move |conn| {
                let mut employee = load_employee(conn, id)
                    .map_err(wrap_err)?
                    .ok_or_else(|| wrap_err(rusqlite::Error::QueryReturnedNoRows))?;
                update.apply_to(&mut employee);
                conn.execute(
                    schema::UPDATE_EMPLOYEE,
                    rusqlite::params![id, employee.name, employee.user_id],
                )
                .map_err(wrap_err)?;
                Ok(employee)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Employee", id))
    }

    async fn delete_employee(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_EMPLOYEE, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Employee", id))
    }

    async fn list_vacations_for_employee(
        &self,
        employee_id: i64,
        page: Page,
    ) -> Result<Vec<Vacation>> {
        self.conn
            .call(move |conn| {
                load_vacations(
                    conn,
                    schema::SELECT_VACATIONS_BY_EMPLOYEE_PAGE,
                    rusqlite::params![employee_id, page.limit, page.offset],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

// ============================================================================
// VacationRepository implementation
// ============================================================================

#[async_trait]
impl VacationRepository for SqliteRepository {
    async fn get_vacation(&self, id: i64) -> Result<Option<Vacation>> {
        self.conn
            .call(move |conn| {
                match conn.query_row(schema::SELECT_VACATION_BY_ID, [id], row_to_vacation) {
                    Ok(vacation) => Ok(Some(vacation)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Vacation", id))
    }

    async fn list_vacations(&self, filter: VacationFilter, page: Page) -> Result<Vec<Vacation>> {
        self.conn
            .call(move |conn| {
                let vacations = match filter.approved {
                    Some(approved) => load_vacations(
                        conn,
                        schema::SELECT_VACATIONS_BY_APPROVAL_PAGE,
                        rusqlite::params![approved, page.limit, page.offset],
                    ),
                    None => load_vacations(
                        conn,
                        schema::SELECT_VACATIONS_PAGE,
                        rusqlite::params![page.limit, page.offset],
                    ),
                };
                vacations.map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn list_pending_vacations(&self, page: Page) -> Result<Vec<Vacation>> {
        self.conn
            .call(move |conn| {
                load_vacations(
                    conn,
                    schema::SELECT_PENDING_VACATIONS_PAGE,
                    rusqlite::params![page.limit, page.offset],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn create_vacation(&self, vacation: &NewVacation) -> Result<Vacation> {
        let employee_id = vacation.employee_id;
        let start_date = vacation.start_date;
        let end_date = vacation.end_date;
        let approved = vacation.approved;

        let created = self
            .conn
            .call(move |conn| {
                let exists = conn
                    .query_row(schema::SELECT_EMPLOYEE_BY_ID, [employee_id], |_| Ok(()))
                    .map(|_| true)
                    .or_else(|e| match e {
                        rusqlite::Error::QueryReturnedNoRows => Ok(false),
                        e => Err(wrap_err(e)),
                    })?;
                if !exists {
                    return Ok(None);
                }

                conn.execute(
                    schema::INSERT_VACATION,
                    rusqlite::params![
                        employee_id,
                        format_date(&start_date),
                        format_date(&end_date),
                        approved
                    ],
                )
                .map_err(wrap_err)?;
                Ok(Some(
                    Vacation::pending(conn.last_insert_rowid(), employee_id, start_date, end_date)
                        .with_approval(approved),
                ))
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        created.ok_or_else(|| RepositoryError::employee_not_found(employee_id))
    }

    async fn set_vacation_approval(&self, id: i64, approved: bool) -> Result<Vacation> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_VACATION_APPROVAL,
                        rusqlite::params![id, approved],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_VACATION_BY_ID, [id], row_to_vacation)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Vacation", id))
    }

    async fn delete_vacation(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_VACATION, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Vacation", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn new_vacation(employee_id: i64, approved: Option<bool>) -> NewVacation {
        NewVacation {
            employee_id,
            start_date: date(2024, 8, 1),
            end_date: date(2024, 8, 10),
            approved,
        }
    }

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_employee_create_and_get() {
        let repo = repo().await;

        let created = repo
            .create_employee(&NewEmployee::new("Ada", 7))
            .await
            .unwrap();
        let retrieved = repo.get_employee(created.id).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_employee_get_nonexistent() {
        let repo = repo().await;
        assert!(repo.get_employee(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_employee_loads_vacations() {
        let repo = repo().await;
        let employee = repo
            .create_employee(&NewEmployee::new("Ada", 7))
            .await
            .unwrap();
        let vacation = repo
            .create_vacation(&new_vacation(employee.id, Some(true)))
            .await
            .unwrap();

        let retrieved = repo.get_employee(employee.id).await.unwrap().unwrap();
        let listed = repo.list_employees(Page::default()).await.unwrap();

        assert_eq!(retrieved.vacations, vec![vacation.clone()]);
        assert_eq!(listed[0].vacations, vec![vacation]);
    }

    #[tokio::test]
    async fn test_list_employees_paginates_in_id_order() {
        let repo = repo().await;
        for name in ["A", "B", "C", "D"] {
            repo.create_employee(&NewEmployee::new(name, 1)).await.unwrap();
        }

        let page = repo.list_employees(Page::new(1, 2)).await.unwrap();

        let names: Vec<&str> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_employee_update_keeps_unset_fields() {
        let repo = repo().await;
        let employee = repo
            .create_employee(&NewEmployee::new("Ada", 7))
            .await
            .unwrap();

        let updated = repo
            .update_employee(employee.id, &EmployeeUpdate::default().with_user_id(9))
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.user_id, 9);
        assert_eq!(
            repo.get_employee(employee.id).await.unwrap().unwrap().user_id,
            9
        );
    }

    #[tokio::test]
    async fn test_employee_update_nonexistent() {
        let repo = repo().await;

        let result = repo
            .update_employee(9, &EmployeeUpdate::default().with_name("X"))
            .await;

        assert_eq!(result, Err(RepositoryError::employee_not_found(9)));
    }

    #[tokio::test]
    async fn test_employee_delete_cascades_to_vacations() {
        let repo = repo().await;
        let employee = repo
            .create_employee(&NewEmployee::new("Ada", 7))
            .await
            .unwrap();
        let vacation = repo
            .create_vacation(&new_vacation(employee.id, None))
            .await
            .unwrap();

        repo.delete_employee(employee.id).await.unwrap();

        assert!(repo.get_employee(employee.id).await.unwrap().is_none());
        assert!(repo.get_vacation(vacation.id).await.unwrap().is_none());
        assert_eq!(
            repo.delete_employee(employee.id).await,
            Err(RepositoryError::employee_not_found(employee.id))
        );
    }

    #[tokio::test]
    async fn test_vacation_requires_existing_employee() {
        let repo = repo().await;

        let result = repo.create_vacation(&new_vacation(99, None)).await;

        assert_eq!(result, Err(RepositoryError::employee_not_found(99)));
    }

    #[tokio::test]
    async fn test_list_vacations_filters_by_approval() {
        let repo = repo().await;
        let employee = repo.create_employee(&NewEmployee::new("A", 1)).await.unwrap();
        for approved in [None, Some(true), Some(false), None] {
            repo.create_vacation(&new_vacation(employee.id, approved))
                .await
                .unwrap();
        }

        let all = repo
            .list_vacations(VacationFilter::default(), Page::default())
            .await
            .unwrap();
        let rejected = repo
            .list_vacations(VacationFilter::approved(false), Page::default())
            .await
            .unwrap();
        let pending = repo.list_pending_vacations(Page::new(0, 1)).await.unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].approved, Some(false));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 1);
    }

    #[tokio::test]
    async fn test_set_vacation_approval() {
        let repo = repo().await;
        let employee = repo.create_employee(&NewEmployee::new("A", 1)).await.unwrap();
        let vacation = repo
            .create_vacation(&new_vacation(employee.id, None))
            .await
            .unwrap();

        let approved = repo.set_vacation_approval(vacation.id, true).await.unwrap();

        assert_eq!(approved.approved, Some(true));
        assert_eq!(approved.start_date, vacation.start_date);
        assert!(repo
            .list_pending_vacations(Page::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_set_vacation_approval_nonexistent() {
        let repo = repo().await;
        let result = repo.set_vacation_approval(3, false).await;
        assert_eq!(result, Err(RepositoryError::vacation_not_found(3)));
    }

    #[tokio::test]
    async fn test_vacation_delete() {
        let repo = repo().await;
        let employee = repo.create_employee(&NewEmployee::new("A", 1)).await.unwrap();
        let vacation = repo
            .create_vacation(&new_vacation(employee.id, None))
            .await
            .unwrap();

        repo.delete_vacation(vacation.id).await.unwrap();

        assert!(repo.get_vacation(vacation.id).await.unwrap().is_none());
        assert_eq!(
            repo.delete_vacation(vacation.id).await,
            Err(RepositoryError::vacation_not_found(vacation.id))
        );
    }

    #[tokio::test]
    async fn test_list_vacations_for_employee_paginates() {
        let repo = repo().await;
        let ada = repo.create_employee(&NewEmployee::new("Ada", 1)).await.unwrap();
        let bob = repo.create_employee(&NewEmployee::new("Bob", 2)).await.unwrap();
        for owner in [ada.id, bob.id, ada.id, ada.id] {
            repo.create_vacation(&new_vacation(owner, None)).await.unwrap();
        }

        let vacations = repo
            .list_vacations_for_employee(ada.id, Page::new(1, 5))
            .await
            .unwrap();

        assert_eq!(vacations.len(), 2);
        assert!(vacations.iter().all(|v| v.employee_id == ada.id));
    }
}

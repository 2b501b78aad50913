//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::NaiveDate;
use rusqlite::Row;

use hrdesk_core::staff::{Employee, Vacation};

/// Convert a SQLite row to an Employee with no vacations loaded.
///
/// Expected columns: id, name, user_id
pub fn row_to_employee(row: &Row) -> rusqlite::Result<Employee> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let user_id: i64 = row.get(2)?;

    Ok(Employee::new(id, name, user_id))
}

/// Convert a SQLite row to a Vacation.
///
/// Expected columns: id, employee_id, start_date, end_date, approved
pub fn row_to_vacation(row: &Row) -> rusqlite::Result<Vacation> {
    let id: i64 = row.get(0)?;
    let employee_id: i64 = row.get(1)?;
    let start_date: String = row.get(2)?;
    let end_date: String = row.get(3)?;
    let approved: Option<bool> = row.get(4)?;

    Ok(Vacation {
        id,
        employee_id,
        start_date: parse_date(2, &start_date)?,
        end_date: parse_date(3, &end_date)?,
        approved,
    })
}

/// Parse a date from YYYY-MM-DD format.
fn parse_date(column: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_format_date_is_iso() {
        assert_eq!(format_date(&date(2024, 3, 9)), "2024-03-09");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date(2, "not-a-date").is_err());
        assert_eq!(parse_date(2, "2024-03-09").unwrap(), date(2024, 3, 9));
    }

    #[test]
    fn test_row_to_vacation_reads_null_as_pending() {
        let conn = Connection::open_in_memory().unwrap();
        let vacation = conn
            .query_row(
                "SELECT 4, 2, '2024-07-01', '2024-07-05', NULL",
                [],
                row_to_vacation,
            )
            .unwrap();

        assert_eq!(
            vacation,
            Vacation::pending(4, 2, date(2024, 7, 1), date(2024, 7, 5))
        );
    }

    #[test]
    fn test_row_to_vacation_reads_integer_approval() {
        let conn = Connection::open_in_memory().unwrap();
        let vacation = conn
            .query_row(
                "SELECT 1, 1, '2024-07-01', '2024-07-05', 0",
                [],
                row_to_vacation,
            )
            .unwrap();

        assert_eq!(vacation.approved, Some(false));
    }

    #[test]
    fn test_row_to_employee() {
        let conn = Connection::open_in_memory().unwrap();
        let employee = conn
            .query_row("SELECT 3, 'Grace', 11", [], row_to_employee)
            .unwrap();

        assert_eq!(employee, Employee::new(3, "Grace", 11));
        assert!(employee.vacations.is_empty());
    }
}

//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every list query orders by id so pages are stable.

/// SQL statement to create all tables.
///
/// Foreign keys are off by default in SQLite; the pragma is part of the batch
/// so the employee-to-vacation cascade is enforced on every connection.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Employees table
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    user_id INTEGER NOT NULL
);

-- Vacations table (approved: NULL = pending, 0 = rejected, 1 = approved)
CREATE TABLE IF NOT EXISTS vacations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    approved INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_vacations_employee_id ON vacations(employee_id);
CREATE INDEX IF NOT EXISTS idx_vacations_approved ON vacations(approved);
"#;

// Employee queries
pub const INSERT_EMPLOYEE: &str = r#"
INSERT INTO employees (name, user_id)
VALUES (?1, ?2)
"#;

pub const SELECT_EMPLOYEE_BY_ID: &str = r#"
SELECT id, name, user_id
FROM employees
WHERE id = ?1
"#;

pub const SELECT_EMPLOYEES_PAGE: &str = r#"
SELECT id, name, user_id
FROM employees
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const UPDATE_EMPLOYEE: &str = r#"
UPDATE employees
SET name = ?2, user_id = ?3
WHERE id = ?1
"#;

pub const DELETE_EMPLOYEE: &str = r#"
DELETE FROM employees
WHERE id = ?1
"#;

// Vacation queries
pub const INSERT_VACATION: &str = r#"
INSERT INTO vacations (employee_id, start_date, end_date, approved)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_VACATION_BY_ID: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
WHERE id = ?1
"#;

pub const SELECT_VACATIONS_BY_EMPLOYEE: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
WHERE employee_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_VACATIONS_BY_EMPLOYEE_PAGE: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
WHERE employee_id = ?1
ORDER BY id ASC
LIMIT ?2 OFFSET ?3
"#;

pub const SELECT_VACATIONS_PAGE: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_VACATIONS_BY_APPROVAL_PAGE: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
WHERE approved = ?1
ORDER BY id ASC
LIMIT ?2 OFFSET ?3
"#;

pub const SELECT_PENDING_VACATIONS_PAGE: &str = r#"
SELECT id, employee_id, start_date, end_date, approved
FROM vacations
WHERE approved IS NULL
ORDER BY id ASC
LIMIT ?1 OFFSET ?2
"#;

pub const UPDATE_VACATION_APPROVAL: &str = r#"
UPDATE vacations
SET approved = ?2
WHERE id = ?1
"#;

pub const DELETE_VACATION: &str = r#"
DELETE FROM vacations
WHERE id = ?1
"#;

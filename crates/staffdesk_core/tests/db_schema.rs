use rusqlite::Connection;
use staffdesk_core::db::schema::{current_user_version, SCHEMA_VERSION};
use staffdesk_core::db::{open_db, open_db_in_memory, DbError};
use staffdesk_core::{EmployeeRepository, Salary, SqliteEmployeeRepository};

#[test]
fn open_db_in_memory_creates_both_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_table_exists(&conn, "departments");
    assert_table_exists(&conn, "employees");
}

#[test]
fn employees_table_declares_no_foreign_key() {
    let conn = open_db_in_memory().unwrap();

    let foreign_keys: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_foreign_key_list('employees');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(foreign_keys, 0);
}

#[test]
fn department_names_are_unique_in_the_store() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO departments (name) VALUES ('Ops');", [])
        .unwrap();

    let err = conn
        .execute("INSERT INTO departments (name) VALUES ('Ops');", [])
        .unwrap_err();
    assert!(matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    ));
}

#[test]
fn reopening_a_file_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdesk.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO departments (name) VALUES ('Legal');", [])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(current_user_version(&second).unwrap(), SCHEMA_VERSION);
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM departments;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn unversioned_file_with_existing_tables_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE departments (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE NOT NULL);
             CREATE TABLE employees (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 name TEXT NOT NULL,
                 age INTEGER,
                 department TEXT,
                 salary REAL
             );
             INSERT INTO departments (name) VALUES ('HR'), ('IT');
             INSERT INTO employees (name, age, department, salary) VALUES ('Alice', 30, 1, 50000);
             INSERT INTO employees (name, age, department, salary) VALUES ('Eve', 40, '2', 1000.5);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_table_exists(&conn, "employees");
    let name: String = conn
        .query_row("SELECT name FROM departments WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "HR");

    let repo = SqliteEmployeeRepository::new(&conn);
    let rows = repo.list_employee_rows().unwrap();
    let summary: Vec<(&str, i64, &str)> = rows
        .iter()
        .map(|row| {
            (
                row.employee.name.as_str(),
                row.employee.department,
                row.department_name.as_str(),
            )
        })
        .collect();
    assert_eq!(summary, vec![("Alice", 1, "HR"), ("Eve", 2, "IT")]);

    let mut eve = repo.get_employee(2).unwrap().unwrap();
    assert_eq!(eve.salary, Salary::from_cents(100_050));
    eve.department = 1;
    repo.update_employee(&eve).unwrap();
    assert_eq!(repo.get_employee(2).unwrap().unwrap().department, 1);
    assert_eq!(repo.headcount_by_department().unwrap().len(), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

use staffdesk_core::db::{open_db_in_memory, seed_defaults};
use staffdesk_core::ops::{show_report, view_employees};
use staffdesk_core::report::department_headcounts;
use staffdesk_core::{
    Age, DepartmentHeadcount, EmployeeRepository, LinePrompter, LookupContext, NewEmployee,
    Salary, SqliteEmployeeRepository,
};
use std::fs;
use std::io::Cursor;

fn headcount(name: &str, employees: u64) -> DepartmentHeadcount {
    DepartmentHeadcount {
        department_name: name.to_string(),
        employees,
    }
}

#[test]
fn headcounts_are_largest_first_then_by_name() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    SqliteEmployeeRepository::new(&conn)
        .create_employee(&NewEmployee {
            name: "Erin".to_string(),
            age: Age::new(41),
            department: 2,
            salary: Salary::from_units(61_000),
        })
        .unwrap();

    assert_eq!(
        department_headcounts(&conn).unwrap(),
        vec![
            headcount("IT", 2),
            headcount("Finance", 1),
            headcount("HR", 1),
            headcount("Marketing", 1),
        ]
    );
}

#[test]
fn departments_without_employees_are_left_out() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    conn.execute("INSERT INTO departments (name) VALUES ('Legal');", [])
        .unwrap();

    let names: Vec<String> = department_headcounts(&conn)
        .unwrap()
        .into_iter()
        .map(|count| count.department_name)
        .collect();
    assert!(!names.iter().any(|name| name == "Legal"));
    assert_eq!(names.len(), 4);
}

#[test]
fn report_prints_table_and_overwrites_chart_file() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("employees_per_department.svg");
    fs::write(&chart_path, "stale").unwrap();

    let mut io = LinePrompter::new(Cursor::new(""), Vec::new());
    let update = show_report(&conn, &lookups, &mut io, &chart_path).unwrap();
    assert!(update.is_unchanged());

    let output = String::from_utf8(io.into_output()).unwrap();
    assert!(output.starts_with("Number of Employees per Department:\n"));
    assert!(output.contains("Finance    1\n"));
    assert!(output.contains("Marketing  1\n"));
    assert!(output.contains(&format!("Barchart saved to {}", chart_path.display())));

    let chart = fs::read_to_string(&chart_path).unwrap();
    assert!(!chart.contains("stale"));
    assert!(chart.contains("<svg"));
    assert_eq!(chart.matches("fill=\"skyblue\"").count(), 4);
}

#[test]
fn report_on_empty_store_still_writes_a_chart() {
    let conn = open_db_in_memory().unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("empty.svg");

    let mut io = LinePrompter::new(Cursor::new(""), Vec::new());
    show_report(&conn, &lookups, &mut io, &chart_path).unwrap();

    let output = String::from_utf8(io.into_output()).unwrap();
    assert!(output.contains("No employees found."));
    let chart = fs::read_to_string(&chart_path).unwrap();
    assert!(!chart.contains("skyblue"));
}

#[test]
fn unwritable_chart_path_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("missing").join("chart.svg");

    let mut io = LinePrompter::new(Cursor::new(""), Vec::new());
    let err = show_report(&conn, &lookups, &mut io, &chart_path).unwrap_err();
    assert!(err.to_string().starts_with("failed to write chart"));
}

#[test]
fn view_and_report_leave_the_store_untouched() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("chart.svg");
    let before = SqliteEmployeeRepository::new(&conn).list_employees().unwrap();

    for _ in 0..2 {
        let mut io = LinePrompter::new(Cursor::new(""), Vec::new());
        view_employees(&mut conn, &lookups, &mut io).unwrap();
        show_report(&conn, &lookups, &mut io, &chart_path).unwrap();
    }

    assert_eq!(
        SqliteEmployeeRepository::new(&conn).list_employees().unwrap(),
        before
    );
    assert_eq!(LookupContext::load(&conn).unwrap(), lookups);
}

use staffdesk_core::db::{open_db_in_memory, seed_defaults};
use staffdesk_core::{
    Age, DepartmentRepository, DepartmentService, EmployeeChanges, EmployeeRepository,
    EmployeeService, LookupContext, NewEmployee, RecordSet, RepoError, Salary, ServiceError,
    SqliteDepartmentRepository, SqliteEmployeeRepository,
};

fn new_employee(name: &str, department: i64) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        age: Age::new(33),
        department,
        salary: Salary::from_cents(4_250_050),
    }
}

#[test]
fn create_and_get_roundtrip_keeps_exact_salary() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();

    let mut service = EmployeeService::new(&mut conn);
    let (id, _) = service
        .create_employee(lookups.departments(), &new_employee("Erin", 2))
        .unwrap();
    assert_eq!(id, 5);

    let loaded = service.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Erin");
    assert_eq!(loaded.age, Age::new(33));
    assert_eq!(loaded.department, 2);
    assert_eq!(loaded.salary.to_string(), "42500.50");
}

#[test]
fn largest_accepted_salary_is_stored_exactly() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();

    let mut employee = new_employee("Top", 1);
    employee.salary = Salary::from_cents(Salary::MAX_CENTS);
    let mut service = EmployeeService::new(&mut conn);
    let (id, _) = service
        .create_employee(lookups.departments(), &employee)
        .unwrap();

    let loaded = service.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.salary.cents(), Salary::MAX_CENTS);
    assert_eq!(loaded.salary.to_string(), "999999999999.99");
}

#[test]
fn create_with_department_missing_from_cache_is_refused() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();

    let err = EmployeeService::new(&mut conn)
        .create_employee(lookups.departments(), &new_employee("Ghost", 9))
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownDepartment(9)));
    assert_eq!(
        SqliteEmployeeRepository::new(&conn).count_employees().unwrap(),
        4
    );
}

#[test]
fn update_writes_all_fields_and_rejects_unknown_department() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let mut service = EmployeeService::new(&mut conn);

    let bob = service.get_employee(2).unwrap().unwrap();
    let promoted = bob.apply(&EmployeeChanges {
        department: Some(3),
        salary: Some(Salary::from_units(65_000)),
        ..EmployeeChanges::default()
    });
    let employees = service
        .update_employee(lookups.departments(), &promoted)
        .unwrap();
    assert_eq!(employees.id_for("Bob"), Some(2));
    assert_eq!(service.get_employee(2).unwrap().unwrap(), promoted);

    let moved = promoted.apply(&EmployeeChanges {
        department: Some(42),
        ..EmployeeChanges::default()
    });
    let err = service
        .update_employee(lookups.departments(), &moved)
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownDepartment(42)));
    assert_eq!(service.get_employee(2).unwrap().unwrap(), promoted);
}

#[test]
fn update_and_delete_missing_rows_return_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let lookups = LookupContext::load(&conn).unwrap();
    let mut service = EmployeeService::new(&mut conn);

    let mut ghost = service.get_employee(1).unwrap().unwrap();
    ghost.id = 99;
    let update_err = service
        .update_employee(lookups.departments(), &ghost)
        .unwrap_err();
    assert!(matches!(
        update_err,
        ServiceError::Repo(RepoError::NotFound {
            record_set: RecordSet::Employees,
            id: 99
        })
    ));

    let delete_err = service.delete_employee(99).unwrap_err();
    assert_eq!(delete_err.error_code(), "not_found");
}

#[test]
fn delete_removes_row_and_rebuilds_cache() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let mut service = EmployeeService::new(&mut conn);

    let employees = service.delete_employee(3).unwrap();
    assert_eq!(employees.id_for("Charlie"), None);
    assert!(service.get_employee(3).unwrap().is_none());
    assert_eq!(service.list_employees().unwrap().len(), 3);
}

#[test]
fn duplicate_department_name_rolls_back() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();

    let err = DepartmentService::new(&mut conn)
        .create_department("IT")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::DuplicateName(ref name)) if name == "IT"
    ));

    let departments = SqliteDepartmentRepository::new(&conn);
    assert_eq!(departments.count_departments().unwrap(), 4);
}

#[test]
fn joined_rows_carry_department_names_and_skip_dangling_references() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO employees (name, age, department, salary) VALUES ('Orphan', 40, 77, 10.0);",
        [],
    )
    .unwrap();

    let service = EmployeeService::new(&mut conn);
    let rows = service.list_employee_rows().unwrap();
    let summary: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row.employee.name.as_str(), row.department_name.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Alice", "HR"),
            ("Bob", "IT"),
            ("Charlie", "Finance"),
            ("David", "Marketing"),
        ]
    );
    assert_eq!(service.list_employees().unwrap().len(), 5);
}

#[test]
fn malformed_persisted_rows_are_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO employees (name, age, department, salary) VALUES ('NoAge', NULL, 1, 10.0);",
        [],
    )
    .unwrap();

    let err = SqliteEmployeeRepository::new(&conn)
        .get_employee(1)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("employees.age")));
}

#[test]
fn department_repository_reads_single_rows() {
    let mut conn = open_db_in_memory().unwrap();
    seed_defaults(&mut conn).unwrap();
    let repo = SqliteDepartmentRepository::new(&conn);

    assert_eq!(repo.get_department(3).unwrap().unwrap().name, "Finance");
    assert!(repo.get_department(30).unwrap().is_none());
}

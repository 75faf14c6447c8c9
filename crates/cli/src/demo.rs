//! Sample tables for `runarchive demo`.
//!
//! Fixture rows for an employee table and the tables derived from it. The
//! values are already computed; this module only lays them out as records.

use runarchive_core::{Artifact, Record};

struct Employee {
    name: &'static str,
    age: i64,
    salary: i64,
    department: &'static str,
}

const EMPLOYEES: [Employee; 4] = [
    Employee { name: "John", age: 28, salary: 50000, department: "HR" },
    Employee { name: "Sara", age: 24, salary: 60000, department: "IT" },
    Employee { name: "Amit", age: 22, salary: 45000, department: "IT" },
    Employee { name: "Riya", age: 32, salary: 75000, department: "HR" },
];

const NEW_HIRE: Employee = Employee { name: "Sam", age: 29, salary: 65000, department: "IT" };

const LOCATIONS: [(&str, &str); 2] = [("HR", "Building A"), ("IT", "Building B")];

fn employee_record(e: &Employee) -> Record {
    Record::new()
        .with("Name", e.name)
        .with("Age", e.age)
        .with("Salary", e.salary)
        .with("Department", e.department)
}

fn location_of(department: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|(dept, _)| *dept == department)
        .map(|(_, loc)| *loc)
}

/// Employees with a doubled-salary column
pub fn final_dataframe() -> Artifact {
    Artifact::with_rows(
        "final_dataframe",
        EMPLOYEES
            .iter()
            .map(|e| employee_record(e).with("Salary_Doubled", e.salary * 2))
            .collect(),
    )
}

/// Employees with their department's location
pub fn merged_data() -> Artifact {
    Artifact::with_rows(
        "merged_data",
        EMPLOYEES
            .iter()
            .map(|e| employee_record(e).with("Location", location_of(e.department)))
            .collect(),
    )
}

/// Employees followed by one new hire
pub fn concat_data() -> Artifact {
    Artifact::with_rows(
        "concat_data",
        EMPLOYEES
            .iter()
            .chain(std::iter::once(&NEW_HIRE))
            .map(employee_record)
            .collect(),
    )
}

/// A table with repeated rows
pub fn duplicates_example() -> Artifact {
    let pairs = [(1, 10), (1, 10), (2, 20), (2, 30), (3, 30)];
    Artifact::with_rows(
        "duplicates_example",
        pairs
            .iter()
            .map(|&(a, b)| Record::new().with("A", a).with("B", b))
            .collect(),
    )
}

/// Events with ISO dates
pub fn dates_example() -> Artifact {
    let events = [("A", "2024-01-01"), ("B", "2024-02-15"), ("C", "2024-03-10")];
    Artifact::with_rows(
        "dates_example",
        events
            .iter()
            .map(|&(event, date)| Record::new().with("Event", event).with("Date", date))
            .collect(),
    )
}

/// Every demo table, in save order
pub fn demo_artifacts() -> Vec<Artifact> {
    vec![
        final_dataframe(),
        merged_data(),
        concat_data(),
        duplicates_example(),
        dates_example(),
    ]
}

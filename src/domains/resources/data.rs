//! Static company data backing the corporate resources.

use serde::Serialize;

/// One entry in the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: &'static str,
    pub name: &'static str,
    pub department: &'static str,
    pub title: &'static str,
    pub email: &'static str,
}

pub const EMPLOYEES: &[Employee] = &[
    Employee {
        id: "U123",
        name: "Alice Johnson",
        department: "Engineering",
        title: "Senior Software Engineer",
        email: "alice.johnson@example.com",
    },
    Employee {
        id: "U456",
        name: "Bob Smith",
        department: "Marketing",
        title: "Marketing Manager",
        email: "bob.smith@example.com",
    },
    Employee {
        id: "U789",
        name: "Carol Diaz",
        department: "Human Resources",
        title: "HR Business Partner",
        email: "carol.diaz@example.com",
    },
];

/// Official 2025 holidays, in calendar order.
pub const HOLIDAYS_2025: &[&str] = &["2025-01-01", "2025-07-04", "2025-12-25"];

pub fn find_employee(id: &str) -> Option<&'static Employee> {
    EMPLOYEES.iter().find(|e| e.id == id)
}

//! Fixed employee roster with delete-by-id. Nothing here is persisted.

use serde::Serialize;

pub const EMPTY_TABLE_TEXT: &str = "No employees to display.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub designation: String,
}

impl Employee {
    pub fn new(id: u32, name: &str, designation: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            designation: designation.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeTable {
    employees: Vec<Employee>,
}

impl EmployeeTable {
    pub fn seeded() -> Self {
        Self {
            employees: vec![
                Employee::new(1, "Suryansh", "Software Engineer"),
                Employee::new(2, "Akshay", "Product Manager"),
                Employee::new(3, "Priyanshu", "UI/UX Designer"),
            ],
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Drops every row with `id`. Returns how many rows went away.
    pub fn delete(&mut self, id: u32) -> usize {
        let before = self.employees.len();
        self.employees.retain(|employee| employee.id != id);
        before - self.employees.len()
    }

    pub fn render(&self) -> String {
        if self.employees.is_empty() {
            return EMPTY_TABLE_TEXT.to_string();
        }

        let headers = ["ID", "Name", "Designation"];
        let rows: Vec<[String; 3]> = self
            .employees
            .iter()
            .map(|e| [e.id.to_string(), e.name.clone(), e.designation.clone()])
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 3]| {
            cells
                .iter()
                .zip(widths.iter())
                .map(|(cell, width)| format!("{cell:<width$}", width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(headers)];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            out.push(line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
        }
        out.join("\n")
    }
}

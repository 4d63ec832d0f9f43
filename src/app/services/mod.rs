pub mod document_service;
pub mod entity_service;

use crate::domain::model::{Employee, Role};

pub use document_service::DocumentService;
pub use entity_service::EntityService;

/// Employees default to status `"Active"` and a link date of now on creation.
pub type EmployeeService = EntityService<Employee>;

pub type RoleService = EntityService<Role>;

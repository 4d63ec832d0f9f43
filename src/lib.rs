pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use app::handler::{Handler, Request, Response};
pub use app::services::{DocumentService, EmployeeService, EntityService, RoleService};
pub use domain::model::{Document, Employee, Entity, PresignedUpload, Role};
pub use domain::patch::{DocumentPatch, EmployeePatch, FieldUpdate, RolePatch};
pub use domain::ports::{FileStorage, Repository};
pub use domain::upload::UploadPolicy;
pub use utils::error::{AppError, Result, StoreError, StoreResult};

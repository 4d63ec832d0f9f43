use crate::app::services::{DocumentService, EmployeeService, RoleService};
use crate::domain::model::{Document, Employee, Role};
use crate::domain::patch::{DocumentPatch, EmployeePatch, RolePatch};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One service call, as delivered in a Lambda event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    CreateDocument { document: Document },
    GetDocument { id: String },
    ListDocuments,
    UpdateDocument { id: String, changes: DocumentPatch },
    DeleteDocument { id: String },
    RequestUploadUrl {
        #[serde(rename = "fileName")]
        file_name: String,
    },
    CreateEmployee { employee: Employee },
    GetEmployee { id: String },
    ListEmployees,
    UpdateEmployee { id: String, changes: EmployeePatch },
    DeleteEmployee { id: String },
    CreateRole { role: Role },
    GetRole { id: String },
    ListRoles,
    UpdateRole { id: String, changes: RolePatch },
    DeleteRole { id: String },
}

/// `Absent` is a successful lookup that found nothing; failures travel as
/// errors instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "camelCase")]
pub enum Response {
    Ok(Value),
    Absent,
    Deleted,
}

impl Response {
    fn of<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Ok(serde_json::to_value(value)?))
    }

    fn of_optional<T: Serialize>(value: Option<T>) -> Result<Self> {
        match value {
            Some(v) => Self::of(&v),
            None => Ok(Self::Absent),
        }
    }
}

#[derive(Clone)]
pub struct Handler {
    documents: DocumentService,
    employees: EmployeeService,
    roles: RoleService,
}

impl Handler {
    pub fn new(documents: DocumentService, employees: EmployeeService, roles: RoleService) -> Self {
        Self {
            documents,
            employees,
            roles,
        }
    }

    pub async fn handle(&self, request: Request) -> Result<Response> {
        match request {
            Request::CreateDocument { document } => Response::of(&self.documents.create(document).await?),
            Request::GetDocument { id } => Response::of_optional(self.documents.get_by_id(&id).await?),
            Request::ListDocuments => Response::of(&self.documents.get_all().await?),
            Request::UpdateDocument { id, changes } => {
                Response::of(&self.documents.update(&id, changes).await?)
            }
            Request::DeleteDocument { id } => {
                self.documents.delete(&id).await?;
                Ok(Response::Deleted)
            }
            Request::RequestUploadUrl { file_name } => {
                Response::of(&self.documents.request_upload_url(&file_name).await?)
            }

            Request::CreateEmployee { employee } => Response::of(&self.employees.create(employee).await?),
            Request::GetEmployee { id } => Response::of_optional(self.employees.get_by_id(&id).await?),
            Request::ListEmployees => Response::of(&self.employees.get_all().await?),
            Request::UpdateEmployee { id, changes } => {
                Response::of(&self.employees.update(&id, changes).await?)
            }
            Request::DeleteEmployee { id } => {
                self.employees.delete(&id).await?;
                Ok(Response::Deleted)
            }

            Request::CreateRole { role } => Response::of(&self.roles.create(role).await?),
            Request::GetRole { id } => Response::of_optional(self.roles.get_by_id(&id).await?),
            Request::ListRoles => Response::of(&self.roles.get_all().await?),
            Request::UpdateRole { id, changes } => Response::of(&self.roles.update(&id, changes).await?),
            Request::DeleteRole { id } => {
                self.roles.delete(&id).await?;
                Ok(Response::Deleted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_are_tagged_by_action() {
        let request: Request = serde_json::from_value(json!({
            "action": "updateEmployee",
            "id": "e-1",
            "changes": {"roleId": null}
        }))
        .unwrap();
        assert!(matches!(request, Request::UpdateEmployee { ref id, .. } if id == "e-1"));

        let request: Request =
            serde_json::from_value(json!({"action": "requestUploadUrl", "fileName": "a.pdf"}))
                .unwrap();
        assert!(matches!(request, Request::RequestUploadUrl { ref file_name } if file_name == "a.pdf"));

        let request: Request = serde_json::from_value(json!({"action": "listRoles"})).unwrap();
        assert!(matches!(request, Request::ListRoles));
    }

    #[test]
    fn absent_response_has_no_data() {
        assert_eq!(
            serde_json::to_value(Response::Absent).unwrap(),
            json!({"outcome": "absent"})
        );
    }
}

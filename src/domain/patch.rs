//! Partial updates.
//!
//! Every mutable field carries a [`FieldUpdate`] so a caller can say "leave it",
//! "clear it" or "set it" explicitly. Entity values convert into patches with the
//! zero-value convention: an empty string means "leave it", while
//! `requires_signature` is always written.

use crate::domain::model::{Document, Employee, Role};
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T: Default> FieldUpdate<T> {
    fn apply(self, target: &mut T) {
        match self {
            Self::Keep => {}
            Self::Clear => *target = T::default(),
            Self::Set(value) => *target = value,
        }
    }
}

impl FieldUpdate<String> {
    /// Zero-value convention: an empty proposed value leaves the field alone.
    pub fn from_proposed(value: String) -> Self {
        if value.is_empty() {
            Self::Keep
        } else {
            Self::Set(value)
        }
    }

    /// `Set("")` clears, same as `Clear`.
    fn clears(&self) -> bool {
        match self {
            Self::Keep => false,
            Self::Clear => true,
            Self::Set(value) => value.is_empty(),
        }
    }
}

impl From<Option<String>> for FieldUpdate<String> {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Keep, Self::from_proposed)
    }
}

/// Absent field → `Keep` (via `#[serde(default)]`), `null` → `Clear`,
/// `""` → `Keep`, any other value → `Set`.
impl<'de> Deserialize<'de> for FieldUpdate<String> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(value) => Self::from_proposed(value),
            None => Self::Clear,
        })
    }
}

fn ensure_required(field: &str, update: &FieldUpdate<String>) -> Result<()> {
    if update.clears() {
        return Err(AppError::validation(field, "field cannot be cleared"));
    }
    Ok(())
}

/// Changes merged into a stored entity by an update operation.
pub trait Patch<E>: Send {
    /// Rejects patches that would clear a field that must stay populated.
    fn validate(&self) -> Result<()>;

    fn apply_to(self, target: &mut E);
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPatch {
    pub file_name: FieldUpdate<String>,
    #[serde(rename = "s3Key")]
    pub storage_key: FieldUpdate<String>,
    pub status: FieldUpdate<String>,
    pub owner_id: FieldUpdate<String>,
    pub requires_signature: Option<bool>,
    pub document_type: FieldUpdate<String>,
    pub group_name: FieldUpdate<String>,
    pub recipient: FieldUpdate<String>,
}

impl Patch<Document> for DocumentPatch {
    fn validate(&self) -> Result<()> {
        ensure_required("fileName", &self.file_name)?;
        ensure_required("s3Key", &self.storage_key)?;
        ensure_required("status", &self.status)
    }

    fn apply_to(self, doc: &mut Document) {
        self.file_name.apply(&mut doc.file_name);
        self.storage_key.apply(&mut doc.storage_key);
        self.status.apply(&mut doc.status);
        self.owner_id.apply(&mut doc.owner_id);
        if let Some(requires_signature) = self.requires_signature {
            doc.requires_signature = requires_signature;
        }
        self.document_type.apply(&mut doc.document_type);
        self.group_name.apply(&mut doc.group_name);
        self.recipient.apply(&mut doc.recipient);
    }
}

impl From<Document> for DocumentPatch {
    fn from(doc: Document) -> Self {
        Self {
            file_name: FieldUpdate::from_proposed(doc.file_name),
            storage_key: FieldUpdate::from_proposed(doc.storage_key),
            status: FieldUpdate::from_proposed(doc.status),
            owner_id: FieldUpdate::from_proposed(doc.owner_id),
            // A bool has no "unset" value, so the proposed one always wins.
            requires_signature: Some(doc.requires_signature),
            document_type: FieldUpdate::from_proposed(doc.document_type),
            group_name: FieldUpdate::from_proposed(doc.group_name),
            recipient: FieldUpdate::from_proposed(doc.recipient),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub status: FieldUpdate<String>,
    pub role_id: FieldUpdate<String>,
}

impl Patch<Employee> for EmployeePatch {
    fn validate(&self) -> Result<()> {
        ensure_required("name", &self.name)?;
        ensure_required("status", &self.status)
    }

    fn apply_to(self, employee: &mut Employee) {
        self.name.apply(&mut employee.name);
        self.email.apply(&mut employee.email);
        self.status.apply(&mut employee.status);
        self.role_id.apply(&mut employee.role_id);
    }
}

impl From<Employee> for EmployeePatch {
    fn from(employee: Employee) -> Self {
        Self {
            name: FieldUpdate::from_proposed(employee.name),
            email: FieldUpdate::from_proposed(employee.email),
            status: FieldUpdate::from_proposed(employee.status),
            role_id: FieldUpdate::from_proposed(employee.role_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePatch {
    pub name: FieldUpdate<String>,
    pub description: FieldUpdate<String>,
}

impl Patch<Role> for RolePatch {
    fn validate(&self) -> Result<()> {
        ensure_required("name", &self.name)
    }

    fn apply_to(self, role: &mut Role) {
        self.name.apply(&mut role.name);
        self.description.apply(&mut role.description);
    }
}

impl From<Role> for RolePatch {
    fn from(role: Role) -> Self {
        Self {
            name: FieldUpdate::from_proposed(role.name),
            description: FieldUpdate::from_proposed(role.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_document() -> Document {
        Document {
            id: "d-1".to_string(),
            file_name: "a.pdf".to_string(),
            storage_key: "uploads/a.pdf_1_x".to_string(),
            status: "PENDING_UPLOAD".to_string(),
            owner_id: "e-1".to_string(),
            requires_signature: true,
            document_type: "contract".to_string(),
            group_name: "hr".to_string(),
            recipient: "legal".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn proposed_entity_only_overwrites_non_empty_strings() {
        let mut doc = stored_document();
        let proposed = Document {
            status: "UPLOADED".to_string(),
            ..Default::default()
        };
        DocumentPatch::from(proposed).apply_to(&mut doc);

        assert_eq!(doc.status, "UPLOADED");
        assert_eq!(doc.file_name, "a.pdf");
        assert_eq!(doc.owner_id, "e-1");
        assert_eq!(doc.recipient, "legal");
        // the flag is always taken from the proposal
        assert!(!doc.requires_signature);
    }

    #[test]
    fn explicit_clear_resets_optional_fields() {
        let mut employee = Employee {
            name: "Ana".to_string(),
            role_id: "r1".to_string(),
            ..Default::default()
        };
        let patch = EmployeePatch {
            role_id: FieldUpdate::Clear,
            ..Default::default()
        };
        patch.validate().unwrap();
        patch.apply_to(&mut employee);
        assert!(employee.role_id.is_empty());
        assert_eq!(employee.name, "Ana");
    }

    #[test]
    fn clearing_required_fields_is_rejected() {
        let patch = RolePatch {
            name: FieldUpdate::Clear,
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(AppError::Validation { .. })));

        let patch = DocumentPatch {
            status: FieldUpdate::Set(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch: DocumentPatch = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert!(matches!(patch.validate(), Err(AppError::Validation { .. })));
    }

    #[test]
    fn empty_json_strings_leave_fields_alone() {
        let patch: DocumentPatch =
            serde_json::from_str(r#"{"ownerId": "", "status": "", "recipient": ""}"#).unwrap();
        assert!(patch.owner_id.is_keep());
        assert!(patch.status.is_keep());
        assert!(patch.recipient.is_keep());
        patch.validate().unwrap();

        let mut doc = stored_document();
        patch.apply_to(&mut doc);
        assert_eq!(doc, stored_document());

        let patch: EmployeePatch = serde_json::from_str(r#"{"roleId": "", "name": ""}"#).unwrap();
        assert_eq!(patch, EmployeePatch::default());
    }

    #[test]
    fn json_patch_distinguishes_absent_null_and_value() {
        let patch: EmployeePatch =
            serde_json::from_str(r#"{"email": null, "roleId": "r2"}"#).unwrap();
        assert_eq!(patch.name, FieldUpdate::Keep);
        assert_eq!(patch.email, FieldUpdate::Clear);
        assert_eq!(patch.role_id, FieldUpdate::Set("r2".to_string()));

        let patch: DocumentPatch = serde_json::from_str(r#"{"requiresSignature": false}"#).unwrap();
        assert_eq!(patch.requires_signature, Some(false));
        assert!(patch.file_name.is_keep());
    }
}

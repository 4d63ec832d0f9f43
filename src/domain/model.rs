use crate::domain::patch::{DocumentPatch, EmployeePatch, Patch, RolePatch};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Conventional document statuses. Any other string is accepted as-is.
pub mod document_status {
    pub const PENDING_UPLOAD: &str = "PENDING_UPLOAD";
    pub const UPLOADED: &str = "UPLOADED";
    pub const PROCESSED: &str = "PROCESSED";
}

pub const DEFAULT_EMPLOYEE_STATUS: &str = "Active";

/// A record managed by an entity service and persisted under its `id`.
pub trait Entity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Lower-case singular name used in log lines and error messages.
    const KIND: &'static str;

    type Patch: Patch<Self>;

    /// Serialized attribute names left out of the record while empty. A store
    /// that updates in place must delete them when the merged entity omits them.
    const OMITTED_WHEN_EMPTY: &'static [&'static str] = &[];

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Fills creation-time defaults (timestamps, status) that the caller left unset.
    fn apply_creation_defaults(&mut self, _now: DateTime<Utc>) {}
}

/// `DateTime::default()` (the Unix epoch) stands for "not supplied", so a record
/// created with a timestamp of exactly `1970-01-01T00:00:00Z` is stamped with
/// the creation time instead.
pub fn is_unset_timestamp(ts: &DateTime<Utc>) -> bool {
    *ts == DateTime::<Utc>::default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: String,
    pub file_name: String,
    /// Opaque blob-store locator issued by the upload coordinator.
    #[serde(rename = "s3Key")]
    pub storage_key: String,
    pub upload_date: DateTime<Utc>,
    /// Free-form; see [`document_status`] for the conventional values.
    pub status: String,
    /// Employee identifier. Never resolved or validated.
    pub owner_id: String,
    pub requires_signature: bool,
    pub document_type: String,
    pub group_name: String,
    pub recipient: String,
}

impl Entity for Document {
    const KIND: &'static str = "document";

    type Patch = DocumentPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_creation_defaults(&mut self, now: DateTime<Utc>) {
        if is_unset_timestamp(&self.upload_date) {
            self.upload_date = now;
        }
        if self.status.is_empty() {
            self.status = document_status::PENDING_UPLOAD.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub link_date: DateTime<Utc>,
    /// Role identifier; empty means unassigned and is not written to the record.
    /// Never resolved or validated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role_id: String,
}

impl Entity for Employee {
    const KIND: &'static str = "employee";

    type Patch = EmployeePatch;

    const OMITTED_WHEN_EMPTY: &'static [&'static str] = &["roleId"];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn apply_creation_defaults(&mut self, now: DateTime<Utc>) {
        if is_unset_timestamp(&self.link_date) {
            self.link_date = now;
        }
        if self.status.is_empty() {
            self.status = DEFAULT_EMPLOYEE_STATUS.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Entity for Role {
    const KIND: &'static str = "role";

    type Patch = RolePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Upload authorization returned to a client: where to PUT the bytes, and the
/// key that will locate the object afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    pub url: String,
    pub key: String,
}

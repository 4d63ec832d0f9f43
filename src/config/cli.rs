use crate::domain::model::{Document, Employee, Role};
use crate::domain::patch::{DocumentPatch, EmployeePatch, FieldUpdate, RolePatch};
use clap::{Args, Subcommand, ValueEnum};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage document records and upload URLs
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },
    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Manage roles
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum DocumentAction {
    Create {
        /// Identifier to use instead of a generated one
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: DocumentArgs,
    },
    Get {
        id: String,
    },
    List,
    Update {
        id: String,
        #[command(flatten)]
        fields: DocumentArgs,
        /// Fields to clear (repeatable)
        #[arg(long, value_enum)]
        clear: Vec<DocumentField>,
    },
    Delete {
        id: String,
    },
    /// Issue a presigned upload URL and storage key for a file name
    UploadUrl { file_name: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EmployeeAction {
    Create {
        /// Identifier to use instead of a generated one
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    Get {
        id: String,
    },
    List,
    Update {
        id: String,
        #[command(flatten)]
        fields: EmployeeArgs,
        /// Fields to clear (repeatable)
        #[arg(long, value_enum)]
        clear: Vec<EmployeeField>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RoleAction {
    Create {
        /// Identifier to use instead of a generated one
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: RoleArgs,
    },
    Get {
        id: String,
    },
    List,
    Update {
        id: String,
        #[command(flatten)]
        fields: RoleArgs,
        /// Fields to clear (repeatable)
        #[arg(long, value_enum)]
        clear: Vec<RoleField>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    #[arg(long)]
    pub file_name: Option<String>,
    #[arg(long)]
    pub s3_key: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub owner_id: Option<String>,
    #[arg(long)]
    pub requires_signature: Option<bool>,
    #[arg(long)]
    pub document_type: Option<String>,
    #[arg(long)]
    pub group_name: Option<String>,
    #[arg(long)]
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentField {
    OwnerId,
    DocumentType,
    GroupName,
    Recipient,
}

#[derive(Debug, Clone, Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub role_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmployeeField {
    Email,
    RoleId,
}

#[derive(Debug, Clone, Args)]
pub struct RoleArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleField {
    Description,
}

fn update_or_clear(value: Option<String>, cleared: bool) -> FieldUpdate<String> {
    if cleared {
        FieldUpdate::Clear
    } else {
        value.into()
    }
}

impl DocumentArgs {
    pub fn into_entity(self, id: Option<String>) -> Document {
        Document {
            id: id.unwrap_or_default(),
            file_name: self.file_name.unwrap_or_default(),
            storage_key: self.s3_key.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            owner_id: self.owner_id.unwrap_or_default(),
            requires_signature: self.requires_signature.unwrap_or(false),
            document_type: self.document_type.unwrap_or_default(),
            group_name: self.group_name.unwrap_or_default(),
            recipient: self.recipient.unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn into_patch(self, clear: &[DocumentField]) -> DocumentPatch {
        let cleared = |field| clear.contains(&field);
        DocumentPatch {
            file_name: self.file_name.into(),
            storage_key: self.s3_key.into(),
            status: self.status.into(),
            owner_id: update_or_clear(self.owner_id, cleared(DocumentField::OwnerId)),
            requires_signature: self.requires_signature,
            document_type: update_or_clear(self.document_type, cleared(DocumentField::DocumentType)),
            group_name: update_or_clear(self.group_name, cleared(DocumentField::GroupName)),
            recipient: update_or_clear(self.recipient, cleared(DocumentField::Recipient)),
        }
    }
}

impl EmployeeArgs {
    pub fn into_entity(self, id: Option<String>) -> Employee {
        Employee {
            id: id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            role_id: self.role_id.unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn into_patch(self, clear: &[EmployeeField]) -> EmployeePatch {
        EmployeePatch {
            name: self.name.into(),
            email: update_or_clear(self.email, clear.contains(&EmployeeField::Email)),
            status: self.status.into(),
            role_id: update_or_clear(self.role_id, clear.contains(&EmployeeField::RoleId)),
        }
    }
}

impl RoleArgs {
    pub fn into_entity(self, id: Option<String>) -> Role {
        Role {
            id: id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }

    pub fn into_patch(self, clear: &[RoleField]) -> RolePatch {
        RolePatch {
            name: self.name.into(),
            description: update_or_clear(self.description, clear.contains(&RoleField::Description)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use clap::Parser;

    #[test]
    fn employee_update_flags_build_a_patch() {
        let config = CliConfig::try_parse_from([
            "document-manager",
            "employee",
            "update",
            "e-1",
            "--name",
            "Ana",
            "--clear",
            "role-id",
        ])
        .unwrap();

        let Command::Employee {
            action: EmployeeAction::Update { id, fields, clear },
        } = config.command
        else {
            panic!("unexpected command");
        };
        assert_eq!(id, "e-1");
        let patch = fields.into_patch(&clear);
        assert_eq!(patch.name, FieldUpdate::Set("Ana".to_string()));
        assert_eq!(patch.role_id, FieldUpdate::Clear);
        assert!(patch.email.is_keep());
    }

    #[test]
    fn upload_url_takes_a_file_name() {
        let config =
            CliConfig::try_parse_from(["document-manager", "document", "upload-url", "invoice.pdf"])
                .unwrap();
        assert!(matches!(
            config.command,
            Command::Document { action: DocumentAction::UploadUrl { ref file_name } }
                if file_name == "invoice.pdf"
        ));
    }

    #[test]
    fn document_create_flags_build_an_entity() {
        let config = CliConfig::try_parse_from([
            "document-manager",
            "document",
            "create",
            "--file-name",
            "a.pdf",
            "--requires-signature",
            "true",
        ])
        .unwrap();

        let Command::Document {
            action: DocumentAction::Create { id, fields },
        } = config.command
        else {
            panic!("unexpected command");
        };
        assert!(id.is_none());
        let doc = fields.into_entity(id);
        assert_eq!(doc.file_name, "a.pdf");
        assert!(doc.requires_signature);
        assert!(doc.status.is_empty());
    }
}

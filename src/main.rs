use clap::Parser;
use document_manager::adapters::{JsonFileRepository, LocalFileStorage};
use document_manager::config::cli::{Command, DocumentAction, EmployeeAction, RoleAction};
use document_manager::utils::{logger, validation::Validate};
use document_manager::{
    AppError, CliConfig, Document, DocumentService, Employee, EmployeeService, Role, RoleService,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

struct Services {
    documents: DocumentService,
    employees: EmployeeService,
    roles: RoleService,
}

fn print_json<T: Serialize>(value: &T) -> document_manager::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_found<T: Serialize>(kind: &str, id: &str, value: Option<T>) -> document_manager::Result<()> {
    match value {
        Some(v) => print_json(&v),
        None => {
            eprintln!("No {} found with ID {}", kind, id);
            Ok(())
        }
    }
}

async fn run(command: Command, services: &Services) -> document_manager::Result<()> {
    match command {
        Command::Document { action } => {
            let documents = &services.documents;
            match action {
                DocumentAction::Create { id, fields } => {
                    print_json(&documents.create(fields.into_entity(id)).await?)
                }
                DocumentAction::Get { id } => print_found("document", &id, documents.get_by_id(&id).await?),
                DocumentAction::List => print_json(&documents.get_all().await?),
                DocumentAction::Update { id, fields, clear } => {
                    print_json(&documents.update(&id, fields.into_patch(&clear)).await?)
                }
                DocumentAction::Delete { id } => documents.delete(&id).await,
                DocumentAction::UploadUrl { file_name } => {
                    print_json(&documents.request_upload_url(&file_name).await?)
                }
            }
        }
        Command::Employee { action } => {
            let employees = &services.employees;
            match action {
                EmployeeAction::Create { id, fields } => {
                    print_json(&employees.create(fields.into_entity(id)).await?)
                }
                EmployeeAction::Get { id } => print_found("employee", &id, employees.get_by_id(&id).await?),
                EmployeeAction::List => print_json(&employees.get_all().await?),
                EmployeeAction::Update { id, fields, clear } => {
                    print_json(&employees.update(&id, fields.into_patch(&clear)).await?)
                }
                EmployeeAction::Delete { id } => employees.delete(&id).await,
            }
        }
        Command::Role { action } => {
            let roles = &services.roles;
            match action {
                RoleAction::Create { id, fields } => print_json(&roles.create(fields.into_entity(id)).await?),
                RoleAction::Get { id } => print_found("role", &id, roles.get_by_id(&id).await?),
                RoleAction::List => print_json(&roles.get_all().await?),
                RoleAction::Update { id, fields, clear } => {
                    print_json(&roles.update(&id, fields.into_patch(&clear)).await?)
                }
                RoleAction::Delete { id } => roles.delete(&id).await,
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let data_dir = Path::new(&settings.storage.data_dir);
    let services = Services {
        documents: DocumentService::with_upload_policy(
            Arc::new(LocalFileStorage::new(data_dir.join("blobs"))),
            Arc::new(JsonFileRepository::<Document>::new(data_dir)),
            settings.upload_policy(),
        ),
        employees: EmployeeService::new(Arc::new(JsonFileRepository::<Employee>::new(data_dir))),
        roles: RoleService::new(Arc::new(JsonFileRepository::<Role>::new(data_dir))),
    };

    if let Err(e) = run(config.command, &services).await {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e {
            AppError::NotFound { .. } | AppError::Validation { .. } => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

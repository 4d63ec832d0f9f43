use document_manager::adapters::{DynamoRepository, S3FileStorage};
use document_manager::app::context::with_request_id;
use document_manager::utils::{logger, validation::Validate};
use document_manager::{
    Document, DocumentService, Employee, EmployeeService, Handler, LambdaConfig, Request, Response,
    Role, RoleService,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

async fn build_handler(config: &LambdaConfig) -> Handler {
    let dynamodb = config.dynamodb_client().await;
    let s3 = config.s3_client().await;

    let documents = DocumentService::with_upload_policy(
        Arc::new(S3FileStorage::new(s3, config.s3_bucket.clone())),
        Arc::new(DynamoRepository::<Document>::new(
            dynamodb.clone(),
            &config.documents_table,
        )),
        config.upload_policy(),
    );
    let employees = EmployeeService::new(Arc::new(DynamoRepository::<Employee>::new(
        dynamodb.clone(),
        &config.employees_table,
    )));
    let roles = RoleService::new(Arc::new(DynamoRepository::<Role>::new(
        dynamodb,
        &config.roles_table,
    )));

    Handler::new(documents, employees, roles)
}

async fn function_handler(handler: &Handler, event: LambdaEvent<Request>) -> Result<Response, Error> {
    let (request, context) = event.into_parts();
    tracing::info!(request_id = %context.request_id, "handling {:?}", request);

    let response = with_request_id(context.request_id, handler.handle(request))
        .await
        .map_err(|e| {
            tracing::error!("request failed: {}", e);
            Box::new(e) as Box<dyn std::error::Error + Send + Sync>
        })?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let handler = build_handler(&config).await;
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(handler, event).await
    }))
    .await
}

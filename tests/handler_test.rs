use document_manager::adapters::{InMemoryFileStorage, InMemoryRepository, JsonFileRepository};
use document_manager::app::context::with_request_id;
use document_manager::{
    Document, DocumentService, Employee, EmployeeService, Handler, Request, Response, Role,
    RoleService,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

fn in_memory_handler() -> Handler {
    Handler::new(
        DocumentService::new(
            Arc::new(InMemoryFileStorage::new()),
            Arc::new(InMemoryRepository::<Document>::new()),
        ),
        EmployeeService::new(Arc::new(InMemoryRepository::<Employee>::new())),
        RoleService::new(Arc::new(InMemoryRepository::<Role>::new())),
    )
}

async fn call(handler: &Handler, request: Value) -> Response {
    let request: Request = serde_json::from_value(request).unwrap();
    handler.handle(request).await.unwrap()
}

fn data(response: Response) -> Value {
    match response {
        Response::Ok(value) => value,
        other => panic!("expected data, got {:?}", other),
    }
}

#[tokio::test]
async fn employee_scenario_through_requests() {
    let handler = in_memory_handler();

    let created = data(
        call(
            &handler,
            json!({"action": "createEmployee", "employee": {"name": "Ana"}}),
        )
        .await,
    );
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "Active");

    call(
        &handler,
        json!({"action": "updateEmployee", "id": id, "changes": {"roleId": "r1"}}),
    )
    .await;

    let fetched = data(call(&handler, json!({"action": "getEmployee", "id": id})).await);
    assert_eq!(fetched["roleId"], "r1");
    assert_eq!(fetched["name"], "Ana");

    let listed = data(call(&handler, json!({"action": "listEmployees"})).await);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    assert_eq!(
        call(&handler, json!({"action": "deleteEmployee", "id": id})).await,
        Response::Deleted
    );
    assert_eq!(
        call(&handler, json!({"action": "getEmployee", "id": id})).await,
        Response::Absent
    );
}

#[tokio::test]
async fn update_of_unknown_role_is_an_error_not_absent() {
    let handler = in_memory_handler();
    let request: Request = serde_json::from_value(
        json!({"action": "updateRole", "id": "ghost", "changes": {"name": "X"}}),
    )
    .unwrap();

    let err = handler.handle(request).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn upload_url_request_returns_url_and_key() {
    let handler = in_memory_handler();

    let response = with_request_id(
        "req-9",
        call(&handler, json!({"action": "requestUploadUrl", "fileName": "invoice.pdf"})),
    )
    .await;
    let upload = data(response);

    let key = upload["key"].as_str().unwrap();
    assert!(key.starts_with("uploads/invoice.pdf_"));
    assert!(key.ends_with("_req-9"));
    assert!(upload["url"].as_str().unwrap().starts_with("memory://"));
}

#[tokio::test]
async fn document_round_trip_through_json_files() {
    let dir = TempDir::new().unwrap();
    let handler = Handler::new(
        DocumentService::new(
            Arc::new(InMemoryFileStorage::new()),
            Arc::new(JsonFileRepository::<Document>::new(dir.path())),
        ),
        EmployeeService::new(Arc::new(JsonFileRepository::<Employee>::new(dir.path()))),
        RoleService::new(Arc::new(JsonFileRepository::<Role>::new(dir.path()))),
    );

    let created = data(
        call(
            &handler,
            json!({"action": "createDocument", "document": {"fileName": "a.pdf", "requiresSignature": true}}),
        )
        .await,
    );
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "PENDING_UPLOAD");

    let updated = data(
        call(
            &handler,
            json!({"action": "updateDocument", "id": id, "changes": {"status": "UPLOADED"}}),
        )
        .await,
    );
    assert_eq!(updated["status"], "UPLOADED");
    assert_eq!(updated["fileName"], "a.pdf");
    assert_eq!(updated["requiresSignature"], true);

    // a fresh repository over the same directory sees the identical record
    let reopened = JsonFileRepository::<Document>::new(dir.path());
    let stored = document_manager::Repository::find_by_id(&reopened, &id)
        .await
        .unwrap()
        .unwrap();
    let expected: Document = serde_json::from_value(updated).unwrap();
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn empty_strings_in_update_changes_keep_stored_values() {
    let handler = in_memory_handler();

    let created = data(
        call(
            &handler,
            json!({"action": "createDocument", "document": {"fileName": "a.pdf", "ownerId": "emp-1", "recipient": "legal"}}),
        )
        .await,
    );
    let id = created["id"].as_str().unwrap().to_string();

    let updated = data(
        call(
            &handler,
            json!({"action": "updateDocument", "id": id, "changes": {"ownerId": "", "status": "", "fileName": ""}}),
        )
        .await,
    );
    assert_eq!(updated["ownerId"], "emp-1");
    assert_eq!(updated["status"], "PENDING_UPLOAD");
    assert_eq!(updated["fileName"], "a.pdf");

    // null is the explicit way to clear
    let cleared = data(
        call(
            &handler,
            json!({"action": "updateDocument", "id": id, "changes": {"recipient": null}}),
        )
        .await,
    );
    assert_eq!(cleared["recipient"], "");
    assert_eq!(cleared["ownerId"], "emp-1");
}

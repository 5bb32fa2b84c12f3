use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use task_server::{app, Task, TaskStore};
use tower::ServiceExt;

fn test_app() -> axum::Router {
    app(TaskStore::in_memory().unwrap())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn send(app: &mut axum::Router, request: Request<String>) -> axum::response::Response {
    use tower::Service;

    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap()
}

/// Create a task through the API and return it.
async fn create_task(app: &mut axum::Router, body: &str) -> Task {
    let resp = send(app, json_request("POST", "/api/tasks", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_tasks_empty() {
    let resp = test_app().oneshot(get_request("/api/tasks")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn list_tasks_returns_full_shape() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Test Task 1"}"#).await;
    create_task(&mut app, r#"{"name":"Test Task 2","completed":true}"#).await;

    let resp = send(&mut app, get_request("/api/tasks")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(tasks.len(), 2);
    for task in &tasks {
        for key in ["id", "name", "completed", "created_at", "updated_at"] {
            assert!(task.get(key).is_some(), "missing {key}");
        }
    }
}

// --- create ---

#[tokio::test]
async fn create_task_returns_201_and_defaults_completed() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/tasks", r#"{"name":"New Task"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Task = body_json(resp).await;
    assert_eq!(task.name, "New Task");
    assert!(!task.completed);
}

#[tokio::test]
async fn create_task_accepts_explicit_completed() {
    let resp = test_app()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            r#"{"name":"Completed Task","completed":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Task = body_json(resp).await;
    assert!(task.completed);
}

#[tokio::test]
async fn create_task_without_name_returns_422() {
    let mut app = test_app();

    let resp = send(&mut app, json_request("POST", "/api/tasks", "{}")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["errors"]["name"][0].as_str().is_some());

    // Nothing was persisted.
    let resp = send(&mut app, get_request("/api/tasks")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn create_task_with_empty_name_returns_422() {
    let resp = test_app()
        .oneshot(json_request("POST", "/api/tasks", r#"{"name":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body["errors"]["name"][0],
        "The name field is required."
    );
}

#[tokio::test]
async fn create_task_with_overlong_name_returns_422() {
    let name = "x".repeat(256);
    let resp = test_app()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            &format!(r#"{{"name":"{name}"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body["errors"]["name"][0],
        "The name field must not be greater than 255 characters."
    );
}

// --- get ---

#[tokio::test]
async fn get_task_not_found() {
    let resp = test_app()
        .oneshot(get_request("/api/tasks/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "Task not found");
    assert_eq!(body["message"], "The requested task does not exist");
}

#[tokio::test]
async fn get_task_non_numeric_id_returns_400() {
    let resp = test_app()
        .oneshot(get_request("/api/tasks/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_task_returns_the_task() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Test Task"}"#).await;

    let resp = send(&mut app, get_request(&format!("/api/tasks/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Task = body_json(resp).await;
    assert_eq!(fetched, created);
}

// --- update ---

#[tokio::test]
async fn update_task_not_found() {
    let resp = test_app()
        .oneshot(json_request("PUT", "/api/tasks/999", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_task_full() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Original Task"}"#).await;

    let resp = send(
        &mut app,
        json_request(
            "PUT",
            &format!("/api/tasks/{}", created.id),
            r#"{"name":"Updated Task","completed":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Updated Task");
    assert!(updated.completed);
}

#[tokio::test]
async fn update_task_partial_completed_keeps_name() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Original Task"}"#).await;

    let resp = send(
        &mut app,
        json_request(
            "PUT",
            &format!("/api/tasks/{}", created.id),
            r#"{"completed":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.name, "Original Task");
    assert!(updated.completed);
}

#[tokio::test]
async fn update_task_partial_name_keeps_completed() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Walk dog","completed":true}"#).await;

    let resp = send(
        &mut app,
        json_request(
            "PUT",
            &format!("/api/tasks/{}", created.id),
            r#"{"name":"Walk cat"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.name, "Walk cat");
    assert!(updated.completed);
}

#[tokio::test]
async fn update_task_null_fields_keep_prior_values() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Original Task","completed":true}"#).await;

    let resp = send(
        &mut app,
        json_request(
            "PUT",
            &format!("/api/tasks/{}", created.id),
            r#"{"name":null,"completed":null}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.name, "Original Task");
    assert!(updated.completed);
}

// --- delete ---

#[tokio::test]
async fn delete_task_not_found() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/tasks/999")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_task_acknowledges_then_404s() {
    let mut app = test_app();
    let created = create_task(&mut app, r#"{"name":"Task to delete"}"#).await;

    let resp = send(
        &mut app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/tasks/{}", created.id))
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Task deleted successfully");

    let resp = send(&mut app, get_request(&format!("/api/tasks/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- filters ---

#[tokio::test]
async fn filter_by_completed_status() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Task 1"}"#).await;
    create_task(&mut app, r#"{"name":"Task 2","completed":true}"#).await;
    create_task(&mut app, r#"{"name":"Task 3"}"#).await;

    let resp = send(&mut app, get_request("/api/tasks?completed=true")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Task 2");

    let resp = send(&mut app, get_request("/api/tasks?completed=false")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn filter_accepts_loose_boolean_spellings() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Pending"}"#).await;
    create_task(&mut app, r#"{"name":"Done","completed":true}"#).await;

    for uri in ["/api/tasks?completed=1", "/api/tasks?completed=yes"] {
        let resp = send(&mut app, get_request(uri)).await;
        let tasks: Vec<Task> = body_json(resp).await;
        assert_eq!(tasks.len(), 1, "{uri}");
        assert_eq!(tasks[0].name, "Done", "{uri}");
    }

    let resp = send(&mut app, get_request("/api/tasks?completed=0")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Pending");
}

#[tokio::test]
async fn unparseable_completed_filter_is_ignored() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Pending"}"#).await;
    create_task(&mut app, r#"{"name":"Done","completed":true}"#).await;

    let resp = send(&mut app, get_request("/api/tasks?completed=banana")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn search_matches_name_substring() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Clean the yard"}"#).await;
    create_task(&mut app, r#"{"name":"Do the laundry","completed":true}"#).await;
    create_task(&mut app, r#"{"name":"Get gas"}"#).await;

    let resp = send(&mut app, get_request("/api/tasks?search=the")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"BUY GROCERIES"}"#).await;
    create_task(&mut app, r#"{"name":"Clean house","completed":true}"#).await;

    let resp = send(&mut app, get_request("/api/tasks?search=buy")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "BUY GROCERIES");
}

#[tokio::test]
async fn search_and_completed_filters_intersect() {
    let mut app = test_app();
    create_task(&mut app, r#"{"name":"Buy groceries"}"#).await;
    create_task(&mut app, r#"{"name":"Buy milk","completed":true}"#).await;
    create_task(&mut app, r#"{"name":"Clean house"}"#).await;

    let resp = send(&mut app, get_request("/api/tasks?search=Buy&completed=true")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Buy milk");
    assert!(tasks[0].completed);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = test_app();

    let created = create_task(&mut app, r#"{"name":"Walk dog"}"#).await;
    assert_eq!(created.name, "Walk dog");
    assert!(!created.completed);
    let id = created.id;

    let resp = send(&mut app, get_request("/api/tasks")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);

    let resp = send(
        &mut app,
        json_request("PUT", &format!("/api/tasks/{id}"), r#"{"completed":true}"#),
    )
    .await;
    let updated: Task = body_json(resp).await;
    assert_eq!(updated.name, "Walk dog");
    assert!(updated.completed);

    let resp = send(
        &mut app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/tasks/{id}"))
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, get_request("/api/tasks")).await;
    let tasks: Vec<Task> = body_json(resp).await;
    assert!(tasks.is_empty());
}

//! # API REST
//!
//! REST API implementation for the AutoFixer IDE backend.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (status codes, the `{success, ...}` envelope, CORS)
//!
//! Uses `api-shared` for the wire types and `autofixer-core` for every data operation.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, State,
    },
    http::{header, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CreateFileReq, CreateFolderReq, CreateProjectReq, ErrorRes, FileContentRes, FileRes,
    FolderRes, HealthRes, HealthService, ListProjectsRes, MessageRes, Project, ProjectFile,
    ProjectRes, RunRes, SkippedProject, Template, UpdateFileReq,
};
use autofixer_core::{
    CoreConfig, ErrorKind, FileService, MetadataStore, ProjectError, ProjectService,
};

/// Application state shared across REST API handlers.
///
/// Both services share one [`MetadataStore`], so they also share its per-project locks.
#[derive(Clone)]
pub struct AppState {
    projects: ProjectService,
    files: FileService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = Arc::new(MetadataStore::new(cfg));
        Self {
            projects: ProjectService::new(store.clone()),
            files: FileService::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_projects,
        create_project,
        get_project,
        delete_project,
        create_file,
        read_file,
        update_file,
        delete_file,
        create_folder,
        run_project,
    ),
    components(schemas(
        HealthRes,
        ListProjectsRes,
        ProjectRes,
        FileRes,
        FileContentRes,
        FolderRes,
        RunRes,
        MessageRes,
        ErrorRes,
        CreateProjectReq,
        CreateFileReq,
        UpdateFileReq,
        CreateFolderReq,
        Project,
        ProjectFile,
        SkippedProject,
        Template,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI, CORS and panic recovery.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", get(get_project).delete(delete_project))
        .route("/api/projects/:id/files", post(create_file))
        .route(
            "/api/projects/:id/files/*path",
            get(read_file).put(update_file).delete(delete_file),
        )
        .route("/api/projects/:id/folders", post(create_folder))
        .route("/api/projects/:id/run", post(run_project))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(map_response(method_not_allowed_envelope))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the REST router until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- AutoFixer REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Failure response: a status code plus the `{success: false, error}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        let status = match err.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => {
                tracing::error!("request failed: {:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorRes::new(self.message))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor whose rejection uses the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
struct ApiJson<T>(T);

/// Path parameter extractor whose rejection uses the error envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
struct ApiPath<T>(T);

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("handler panicked: {}", detail);
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Endpoint not found")
}

/// Gives the empty 405 that routing produces for a known path the error envelope.
async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped =
        ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness check. Touches no storage.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All readable projects", body = ListProjectsRes),
        (status = 500, description = "Projects directory cannot be read", body = ErrorRes)
    )
)]
/// Lists every project with a readable descriptor.
///
/// Directories without one are reported under `skipped` instead of failing the request.
#[axum::debug_handler]
async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<ListProjectsRes>> {
    let listing = state.projects.list_projects()?;
    Ok(Json(ListProjectsRes {
        success: true,
        projects: listing.projects,
        skipped: listing.skipped,
    }))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectReq,
    responses(
        (status = 201, description = "Project created", body = ProjectRes),
        (status = 400, description = "Missing name or unknown template", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Creates a project and scaffolds its template.
#[axum::debug_handler]
async fn create_project(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateProjectReq>,
) -> ApiResult<(StatusCode, Json<ProjectRes>)> {
    let project = state.projects.create_project(
        req.name.as_deref().unwrap_or_default(),
        req.template.as_deref(),
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectRes {
            success: true,
            project,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project descriptor", body = ProjectRes),
        (status = 404, description = "Project not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<ProjectRes>> {
    let project = state.projects.get_project(&id)?;
    Ok(Json(ProjectRes {
        success: true,
        project,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project deleted", body = MessageRes),
        (status = 404, description = "Project not found", body = ErrorRes)
    )
)]
/// Recursively deletes a project directory.
#[axum::debug_handler]
async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MessageRes>> {
    state.projects.delete_project(&id)?;
    Ok(Json(MessageRes::ok("Project deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/files",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = CreateFileReq,
    responses(
        (status = 201, description = "File created", body = FileRes),
        (status = 400, description = "Missing name or path, or path outside the project", body = ErrorRes),
        (status = 404, description = "Project not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_file(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<CreateFileReq>,
) -> ApiResult<(StatusCode, Json<FileRes>)> {
    let file = state.files.create_file(
        &id,
        req.name.as_deref().unwrap_or_default(),
        req.path.as_deref().unwrap_or_default(),
        req.content.as_deref().unwrap_or_default(),
    )?;
    Ok((StatusCode::CREATED, Json(FileRes { success: true, file })))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/files/{path}",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("path" = String, Path, description = "Project-relative file path; may contain `/`")
    ),
    responses(
        (status = 200, description = "File content", body = FileContentRes),
        (status = 404, description = "Project or file not found", body = ErrorRes)
    )
)]
/// Reads a file from disk, not from the descriptor cache.
#[axum::debug_handler]
async fn read_file(
    State(state): State<AppState>,
    ApiPath((id, path)): ApiPath<(String, String)>,
) -> ApiResult<Json<FileContentRes>> {
    let content = state.files.read_file(&id, &path)?;
    Ok(Json(FileContentRes {
        success: true,
        content,
    }))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}/files/{path}",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("path" = String, Path, description = "Project-relative file path; may contain `/`")
    ),
    request_body = UpdateFileReq,
    responses(
        (status = 200, description = "File updated", body = MessageRes),
        (status = 404, description = "Project or file not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn update_file(
    State(state): State<AppState>,
    ApiPath((id, path)): ApiPath<(String, String)>,
    ApiJson(req): ApiJson<UpdateFileReq>,
) -> ApiResult<Json<MessageRes>> {
    state
        .files
        .update_file(&id, &path, req.content.as_deref().unwrap_or_default())?;
    Ok(Json(MessageRes::ok("File updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}/files/{path}",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("path" = String, Path, description = "Project-relative file path; may contain `/`")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageRes),
        (status = 404, description = "Project or file not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_file(
    State(state): State<AppState>,
    ApiPath((id, path)): ApiPath<(String, String)>,
) -> ApiResult<Json<MessageRes>> {
    state.files.delete_file(&id, &path)?;
    Ok(Json(MessageRes::ok("File deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/folders",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = CreateFolderReq,
    responses(
        (status = 201, description = "Folder created", body = FolderRes),
        (status = 400, description = "Missing name", body = ErrorRes),
        (status = 404, description = "Project not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_folder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<CreateFolderReq>,
) -> ApiResult<(StatusCode, Json<FolderRes>)> {
    let folder = state
        .files
        .create_folder(&id, req.name.as_deref().unwrap_or_default())?;
    Ok((
        StatusCode::CREATED,
        Json(FolderRes {
            success: true,
            folder,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/run",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Canned run transcript", body = RunRes),
        (status = 404, description = "Project not found", body = ErrorRes)
    )
)]
/// Stub: reports that compilation started without running anything.
#[axum::debug_handler]
async fn run_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<RunRes>> {
    let output = state.projects.run_project(&id)?;
    Ok(Json(RunRes {
        success: true,
        output,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(temp_dir: &TempDir) -> Router {
        let cfg = Arc::new(CoreConfig::new(temp_dir.path().to_path_buf()).unwrap());
        router(AppState::new(cfg))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "AutoFixer IDE Backend is running");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_demo_project_scenario() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(
            &app,
            "POST",
            "/api/projects",
            Some(json!({"name": "Demo", "template": "empty"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"]["folders"], json!(["src"]));
        assert_eq!(body["project"]["files"], json!([]));
        let id = body["project"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/projects/{id}/files"),
            Some(json!({"name": "App.java", "path": "src/App.java", "content": "class App{}"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["file"]["type"], "java");

        let (status, body) =
            send(&app, "GET", &format!("/api/projects/{id}/files/src/App.java"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "class App{}");
    }

    #[tokio::test]
    async fn test_create_project_defaults_to_empty_template() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) =
            send(&app, "POST", "/api/projects", Some(json!({"name": "Plain"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"]["template"], "empty");
        assert!(body["project"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_project_validation_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, "POST", "/api/projects", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "Project name is required"}));

        let (status, body) = send(
            &app,
            "POST",
            "/api/projects",
            Some(json!({"name": "X", "template": "gradle"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_project_reports_missing_name_before_unknown_template() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(
            &app,
            "POST",
            "/api/projects",
            Some(json!({"template": "gradle"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "Project name is required"}));
    }

    #[tokio::test]
    async fn test_create_project_keeps_name_as_given() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) =
            send(&app, "POST", "/api/projects", Some(json!({"name": "  Padded  "}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"]["name"], "  Padded  ");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request_envelope() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let request = Request::builder()
            .method("POST")
            .uri("/api/projects")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_projects() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        send(&app, "POST", "/api/projects", Some(json!({"name": "One"}))).await;
        std::fs::create_dir_all(temp_dir.path().join("1000")).unwrap();

        let (status, body) = send(&app, "GET", "/api/projects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);
        assert_eq!(body["skipped"][0]["id"], "1000");
    }

    #[tokio::test]
    async fn test_list_projects_unreadable_root_is_internal_error_envelope() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("projects");
        std::fs::write(&root, "not a directory").unwrap();
        let app = router(AppState::new(Arc::new(CoreConfig::new(root).unwrap())));

        let (status, body) = send(&app, "GET", "/api/projects", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("failed to read projects directory"));
    }

    #[tokio::test]
    async fn test_get_and_delete_project() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, body) = send(
            &app,
            "POST",
            "/api/projects",
            Some(json!({"name": "Gone", "template": "maven"})),
        )
        .await;
        let id = body["project"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", &format!("/api/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["name"], "Gone");

        let (status, body) = send(&app, "DELETE", &format!("/api/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Project deleted successfully");

        let (status, body) = send(&app, "GET", &format!("/api/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Project not found"}));
    }

    #[tokio::test]
    async fn test_file_endpoints_on_missing_project_are_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let base = "/api/projects/1700000000000";

        let cases = [
            ("POST", format!("{base}/files"), Some(json!({"name": "a", "path": "a"}))),
            ("GET", format!("{base}/files/a"), None),
            ("PUT", format!("{base}/files/a"), Some(json!({"content": "x"}))),
            ("DELETE", format!("{base}/files/a"), None),
            ("POST", format!("{base}/folders"), Some(json!({"name": "lib"}))),
            ("POST", format!("{base}/run"), None),
        ];
        for (method, uri, body) in cases {
            let (status, body) = send(&app, method, &uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body["error"], "Project not found");
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, body) = send(&app, "POST", "/api/projects", Some(json!({"name": "Edit"}))).await;
        let id = body["project"]["id"].as_str().unwrap().to_string();
        send(
            &app,
            "POST",
            &format!("/api/projects/{id}/files"),
            Some(json!({"name": "a.txt", "path": "docs/a.txt"})),
        )
        .await;

        let uri = format!("/api/projects/{id}/files/docs/a.txt");
        let (status, body) = send(&app, "PUT", &uri, Some(json!({"content": "hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "File updated successfully");

        let (_, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(body["content"], "hello");

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "File deleted successfully");

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "File not found");
    }

    #[tokio::test]
    async fn test_create_file_requires_name_and_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, body) = send(&app, "POST", "/api/projects", Some(json!({"name": "V"}))).await;
        let id = body["project"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/projects/{id}/files"),
            Some(json!({"name": "only-name"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File name and path are required");
    }

    #[tokio::test]
    async fn test_traversal_is_bad_request() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, body) = send(&app, "POST", "/api/projects", Some(json!({"name": "T"}))).await;
        let id = body["project"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/projects/{id}/files"),
            Some(json!({"name": "x", "path": "../../escape.txt"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!temp_dir.path().join("escape.txt").exists());

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/projects/{id}/files/project.json"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/projects/..%2F..", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_folder_and_run() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, body) = send(&app, "POST", "/api/projects", Some(json!({"name": "Run me"}))).await;
        let id = body["project"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/projects/{id}/folders"),
            Some(json!({"name": "lib"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["folder"], "lib");

        let (status, body) = send(&app, "POST", &format!("/api/projects/{id}/run"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["output"],
            "Running project: Run me...\nCompilation started...\n"
        );
    }

    #[tokio::test]
    async fn test_unmatched_route_is_not_found_envelope() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_wrong_method_is_method_not_allowed_envelope() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let request = Request::builder()
            .method("PATCH")
            .uri("/api/projects")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = response.headers().get(header::ALLOW).unwrap().to_str().unwrap();
        assert!(allow.contains("GET"));
        assert!(allow.contains("POST"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Method not allowed"}));

        let (status, body) = send(&app, "PUT", "/api/projects/1700000000000", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_undecodable_path_parameter_is_bad_request_envelope() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, "GET", "/api/projects/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());

        let (status, body) = send(&app, "GET", "/api/projects/1700000000000/files/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/projects"].is_object());
    }
}

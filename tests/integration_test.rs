use axum::http::{header, HeaderValue, Method, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header_exists, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ocorrencias_core::app;
use ocorrencias_core::core::config::{AppConfig, BackendConfig, Config, SwaggerConfig};

/// Spin up the production router against a mock of the managed backend
async fn test_app() -> (MockServer, TestServer) {
    let backend = MockServer::start().await;

    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        },
        backend: BackendConfig {
            url: backend.uri(),
            anon_key: "test-anon-key".to_string(),
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Ocorrências API".to_string(),
            version: "0.1.0".to_string(),
            description: "test".to_string(),
        },
    };

    let server = TestServer::new(app::build_router(&config)).unwrap();
    (backend, server)
}

/// Identity provider accepts any request carrying an Authorization header
async fn mock_authenticated_user(backend: &MockServer, user_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": "cidadao@example.com"
        })))
        .mount(backend)
        .await;
}

async fn mock_prefeitura(backend: &MockServer, prefeitura_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/prefeituras"))
        .and(query_param("select", "id"))
        .and(query_param("cidade", "eq.Jaú"))
        .and(query_param("estado", "eq.SP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": prefeitura_id })))
        .mount(backend)
        .await;
}

fn occurrence_row(id: Uuid, user_id: Uuid, prefeitura_id: Uuid) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "prefeitura_id": prefeitura_id,
        "titulo": "Buraco na rua",
        "descricao": "Buraco grande na frente do número 123",
        "categoria_id": null,
        "latitude": null,
        "longitude": null,
        "endereco": null,
        "fotos": [],
        "videos": [],
        "status": "recebido",
        "created_at": "2025-06-15T12:00:00Z"
    })
}

fn bearer() -> HeaderValue {
    HeaderValue::from_static("Bearer valid-token")
}

// ============================================================================
// Occurrence creator
// ============================================================================

#[tokio::test]
async fn test_create_occurrence_without_credential_is_unauthorized() {
    let (_backend, server) = test_app().await;

    let res = server
        .post("/create-occurrence")
        .json(&json!({ "titulo": "Buraco", "descricao": "Na rua" }))
        .await;

    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json();
    assert_eq!(body["error"], "Usuário não está logado");
}

#[tokio::test]
async fn test_create_occurrence_with_rejected_token_is_unauthorized() {
    let (backend, server) = test_app().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid JWT" })),
        )
        .mount(&backend)
        .await;

    let res = server
        .post("/create-occurrence")
        .add_header(header::AUTHORIZATION, bearer())
        .json(&json!({ "titulo": "Buraco", "descricao": "Na rua" }))
        .await;

    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_occurrence_requires_title_and_description() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    // No insert may reach the data store
    Mock::given(method("POST"))
        .and(path("/rest/v1/ocorrencias"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&backend)
        .await;

    for body in [
        json!({ "descricao": "sem título" }),
        json!({ "titulo": "sem descrição" }),
        json!({ "titulo": "", "descricao": "vazio" }),
        json!({}),
    ] {
        let res = server
            .post("/create-occurrence")
            .add_header(header::AUTHORIZATION, bearer())
            .json(&body)
            .await;

        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = res.json();
        assert_eq!(body["error"], "Título e descrição são obrigatórios");
    }
}

#[tokio::test]
async fn test_create_occurrence_fails_when_prefeitura_is_missing() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    // Single-object lookup with no matching row
    Mock::given(method("GET"))
        .and(path("/rest/v1/prefeituras"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&backend)
        .await;

    let res = server
        .post("/create-occurrence")
        .add_header(header::AUTHORIZATION, bearer())
        .json(&json!({ "titulo": "Buraco", "descricao": "Na rua" }))
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "Prefeitura não encontrada");
}

#[tokio::test]
async fn test_create_occurrence_success_defaults_media_lists() {
    let (backend, server) = test_app().await;
    let user_id = Uuid::new_v4();
    let prefeitura_id = Uuid::new_v4();
    let occurrence_id = Uuid::new_v4();

    mock_authenticated_user(&backend, user_id).await;
    mock_prefeitura(&backend, prefeitura_id).await;

    // The insert must carry the resolved owner, municipality and defaulted
    // media lists
    Mock::given(method("POST"))
        .and(path("/rest/v1/ocorrencias"))
        .and(body_partial_json(json!({
            "user_id": user_id,
            "prefeitura_id": prefeitura_id,
            "titulo": "Buraco na rua",
            "fotos": [],
            "videos": []
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(occurrence_row(occurrence_id, user_id, prefeitura_id)),
        )
        .expect(1)
        .mount(&backend)
        .await;

    let res = server
        .post("/create-occurrence")
        .add_header(header::AUTHORIZATION, bearer())
        .json(&json!({
            "titulo": "Buraco na rua",
            "descricao": "Buraco grande na frente do número 123"
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Ocorrência criada com sucesso!");
    assert_eq!(body["data"]["id"], json!(occurrence_id));
    assert_eq!(body["data"]["status"], "recebido");
    assert_eq!(body["data"]["fotos"], json!([]));
    assert_eq!(body["data"]["videos"], json!([]));
}

#[tokio::test]
async fn test_create_occurrence_surfaces_data_store_failure() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;
    mock_prefeitura(&backend, Uuid::new_v4()).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/ocorrencias"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&backend)
        .await;

    let res = server
        .post("/create-occurrence")
        .add_header(header::AUTHORIZATION, bearer())
        .json(&json!({ "titulo": "Buraco", "descricao": "Na rua" }))
        .await;

    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json();
    assert_eq!(body["error"], "Erro interno do servidor");
    assert_eq!(
        body["details"],
        "duplicate key value violates unique constraint"
    );
}

// ============================================================================
// Dashboard statistics
// ============================================================================

#[tokio::test]
async fn test_dashboard_stats_requires_prefeitura_id() {
    let (_backend, server) = test_app().await;

    let res = server.get("/get-dashboard-stats").await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "prefeitura_id é obrigatório");
}

#[tokio::test]
async fn test_dashboard_stats_for_empty_municipality() {
    let (backend, server) = test_app().await;
    let prefeitura_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/ocorrencias"))
        .and(query_param("select", "status,created_at"))
        .and(query_param("prefeitura_id", format!("eq.{}", prefeitura_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&backend)
        .await;

    let res = server
        .get("/get-dashboard-stats")
        .add_query_param("prefeitura_id", prefeitura_id.to_string())
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);

    let gerais = &body["data"]["estatisticas_gerais"];
    assert_eq!(gerais["total"], 0);
    assert_eq!(gerais["percentual_resolucao"], 0);
    assert_eq!(body["data"]["estatisticas_diarias"], json!([]));
    assert_eq!(body["data"]["periodo_dias"], 30);
}

#[tokio::test]
async fn test_dashboard_stats_aggregates_statuses_and_days() {
    let (backend, server) = test_app().await;
    let prefeitura_id = Uuid::new_v4();

    let recent = Utc::now() - Duration::days(2);
    let old = Utc::now() - Duration::days(45);

    let rows = json!([
        { "status": "recebido", "created_at": recent.to_rfc3339() },
        { "status": "recebido", "created_at": recent.to_rfc3339() },
        { "status": "resolvido", "created_at": recent.to_rfc3339() },
        { "status": "resolvido", "created_at": old.to_rfc3339() },
        { "status": "resolvido", "created_at": old.to_rfc3339() },
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/ocorrencias"))
        .and(query_param("prefeitura_id", format!("eq.{}", prefeitura_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(&backend)
        .await;

    let res = server
        .get("/get-dashboard-stats")
        .add_query_param("prefeitura_id", prefeitura_id.to_string())
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();

    let gerais = &body["data"]["estatisticas_gerais"];
    assert_eq!(gerais["total"], 5);
    assert_eq!(gerais["recebidas"], 2);
    assert_eq!(gerais["resolvidas"], 3);
    assert_eq!(gerais["em_analise"], 0);
    assert_eq!(gerais["em_atendimento"], 0);
    assert_eq!(gerais["rejeitadas"], 0);
    assert_eq!(gerais["percentual_resolucao"], 60);

    // The two old rows fall outside the 30-day series; the three recent
    // ones share a single calendar-day bucket
    let diarias = body["data"]["estatisticas_diarias"].as_array().unwrap();
    assert_eq!(diarias.len(), 1);
    assert_eq!(diarias[0]["date"], recent.date_naive().to_string());
    assert_eq!(diarias[0]["total"], 3);
    assert_eq!(diarias[0]["resolvidas"], 1);
}

#[tokio::test]
async fn test_dashboard_stats_surfaces_data_store_failure() {
    let (backend, server) = test_app().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ocorrencias"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "connection reset" })),
        )
        .mount(&backend)
        .await;

    let res = server
        .get("/get-dashboard-stats")
        .add_query_param("prefeitura_id", "abc")
        .await;

    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json();
    assert_eq!(body["error"], "Erro interno do servidor");
    assert_eq!(body["details"], "connection reset");
}

// ============================================================================
// Media uploader
// ============================================================================

fn photo_form(data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_text("type", "photo").add_part(
        "file",
        Part::bytes(data).file_name("foto.jpg").mime_type("image/jpeg"),
    )
}

#[tokio::test]
async fn test_upload_media_without_credential_is_unauthorized() {
    let (_backend, server) = test_app().await;

    let res = server
        .post("/upload-media")
        .multipart(photo_form(vec![0u8; 16]))
        .await;

    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json();
    assert_eq!(body["error"], "Usuário não autorizado");
}

#[tokio::test]
async fn test_upload_media_requires_a_file() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    for form in [
        MultipartForm::new().add_text("type", "photo"),
        MultipartForm::new().add_text("type", "video"),
    ] {
        let res = server
            .post("/upload-media")
            .add_header(header::AUTHORIZATION, bearer())
            .multipart(form)
            .await;

        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = res.json();
        assert_eq!(body["error"], "Nenhum arquivo enviado");
    }
}

#[tokio::test]
async fn test_upload_media_rejects_oversized_photo() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    let res = server
        .post("/upload-media")
        .add_header(header::AUTHORIZATION, bearer())
        .multipart(photo_form(vec![0u8; 5 * 1024 * 1024 + 1]))
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "Arquivo muito grande. Máximo: 5MB");
}

#[tokio::test]
async fn test_upload_media_rejects_oversized_video() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    let form = MultipartForm::new().add_text("type", "video").add_part(
        "file",
        Part::bytes(vec![0u8; 50 * 1024 * 1024 + 1])
            .file_name("video.mp4")
            .mime_type("video/mp4"),
    );

    let res = server
        .post("/upload-media")
        .add_header(header::AUTHORIZATION, bearer())
        .multipart(form)
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "Arquivo muito grande. Máximo: 50MB");
}

#[tokio::test]
async fn test_upload_media_accepts_photo_at_the_size_limit() {
    let (backend, server) = test_app().await;
    let user_id = Uuid::new_v4();
    mock_authenticated_user(&backend, user_id).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/occurrences-media/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "occurrences-media/uploaded"
        })))
        .expect(1)
        .mount(&backend)
        .await;

    let res = server
        .post("/upload-media")
        .add_header(header::AUTHORIZATION, bearer())
        .multipart(photo_form(vec![0u8; 5 * 1024 * 1024]))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Arquivo enviado com sucesso");
    assert_eq!(body["data"]["type"], "photo");

    let file_name = body["data"]["fileName"].as_str().unwrap();
    assert!(file_name.starts_with(&format!("{}/photos/", user_id)));
    assert!(file_name.ends_with("_foto.jpg"));

    let public_url = body["data"]["publicUrl"].as_str().unwrap();
    assert!(public_url.starts_with(&format!(
        "{}/storage/v1/object/public/occurrences-media/",
        backend.uri()
    )));
}

#[tokio::test]
async fn test_upload_media_surfaces_storage_failure() {
    let (backend, server) = test_app().await;
    mock_authenticated_user(&backend, Uuid::new_v4()).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/occurrences-media/.+$"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "Duplicate",
            "message": "The resource already exists"
        })))
        .mount(&backend)
        .await;

    let res = server
        .post("/upload-media")
        .add_header(header::AUTHORIZATION, bearer())
        .multipart(photo_form(vec![0u8; 16]))
        .await;

    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json();
    assert_eq!(body["error"], "Erro interno do servidor");
    assert_eq!(body["details"], "The resource already exists");
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_bare_options_answers_ok() {
    let (_backend, server) = test_app().await;

    for endpoint in ["/create-occurrence", "/get-dashboard-stats", "/upload-media"] {
        let res = server.method(Method::OPTIONS, endpoint).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.text(), "ok");
    }
}

#[tokio::test]
async fn test_preflight_allows_app_headers() {
    let (_backend, server) = test_app().await;

    let res = server
        .method(Method::OPTIONS, "/create-occurrence")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("authorization, apikey, content-type"),
        )
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);

    let allow_origin = res
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(allow_origin, "*");

    let allow_headers = res
        .headers()
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();
    assert!(allow_headers.contains("authorization"));
    assert!(allow_headers.contains("apikey"));
    assert!(allow_headers.contains("x-client-info"));
    assert!(allow_headers.contains("content-type"));
}

// Integration tests for the GraphQL HTTP endpoint
use crate::{
    engine::{graphql::create_schema, storage::ClientStore},
    models::Client,
    server::graphql::{create_router, GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig},
    settings::{RunMode, ServerSettings},
    ClientbookError,
};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::{net::TcpListener, time::Duration};
use tower::ServiceExt;

// Test helpers
fn create_test_store() -> ClientStore {
    ClientStore::new(vec![
        Client::new("1", "Alice", "a@x.com", "111"),
        Client::new("2", "Bob", "b@x.com", "222"),
    ])
}

fn create_test_app(graphiql_enabled: bool) -> Router {
    create_test_app_with_config(GraphQLServerConfig {
        graphiql_enabled,
        ..Default::default()
    })
}

fn create_test_app_with_config(config: GraphQLServerConfig) -> Router {
    create_router(create_schema(create_test_store()), &config)
}

fn graphql_post(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body())
        .await
        .unwrap()
        .to_vec()
}

// Extract JSON body from response
async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_client_lookup_over_http() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({"query": r#"{ client(id: "2") { name } }"#})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"data": {"client": {"name": "Bob"}}}));
}

#[tokio::test]
async fn test_missing_client_is_null_not_error() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({"query": r#"{ client(id: "9") { name } }"#})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({"data": {"client": null}}));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_clients_over_http_in_storage_order() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({"query": "{ clients { id phone } }"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"data": {"clients": [{"id": "1", "phone": "111"}, {"id": "2", "phone": "222"}]}})
    );
}

#[tokio::test]
async fn test_variables_and_operation_name() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({
            "query": "query A { clients { id } } query B($id: ID) { client(id: $id) { email } }",
            "variables": {"id": "1"},
            "operationName": "B"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"data": {"client": {"email": "a@x.com"}}})
    );
}

#[tokio::test]
async fn test_unknown_field_is_rejected_with_400() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({"query": r#"{ client(id: "1") { phoneNumber } }"#})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.get("data").is_none());

    let errors = body["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(errors[0]["message"].as_str().unwrap().contains("phoneNumber"));
    assert!(errors[0]["locations"].is_array());
}

#[tokio::test]
async fn test_syntax_error_is_rejected_with_400() {
    let app = create_test_app(false);

    let response = app
        .oneshot(graphql_post(json!({"query": "{ clients { id "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.get("data").is_none());
    assert!(body["errors"][0]["message"].is_string());
}

#[tokio::test]
async fn test_truncated_body_is_rejected_with_json_errors() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"query": "#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = json_body(response).await;
    assert!(body.get("data").is_none());
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["message"].is_string());
}

#[tokio::test]
async fn test_get_with_bad_variables_is_rejected_with_json_errors() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/graphql?query=%7B%20clients%20%7B%20id%20%7D%20%7D&variables=%7Bnot-json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.get("data").is_none());
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_executes_query_string_request() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/graphql?query=%7B%20clients%20%7B%20name%20%7D%20%7D")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"data": {"clients": [{"name": "Alice"}, {"name": "Bob"}]}})
    );
}

#[tokio::test]
async fn test_graphiql_served_in_development() {
    let app = create_test_app(RunMode::Development.graphiql_enabled());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/graphql")
        .header(header::ACCEPT, "text/html,application/xhtml+xml")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_graphiql_absent_in_production() {
    let app = create_test_app(RunMode::Production.graphiql_enabled());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/graphql")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!body.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(false);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_headers_present_when_enabled() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::from(json!({"query": "{ clients { id } }"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_cors_headers_absent_when_disabled() {
    let app = create_test_app_with_config(GraphQLServerConfig {
        cors_enabled: false,
        ..Default::default()
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::from(json!({"query": "{ clients { id } }"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_run_fails_when_port_is_taken() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = GraphQLServer::new()
        .with_config(GraphQLServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        })
        .with_store(create_test_store());

    let result = tokio::time::timeout(Duration::from_secs(5), server.run())
        .await
        .expect("server should fail to bind instead of serving");

    assert!(matches!(result, Err(ClientbookError::Server(_))));
    drop(listener);
}

#[tokio::test]
async fn test_run_fails_on_non_ip_host() {
    let server = GraphQLServer::new()
        .with_config(GraphQLServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        })
        .with_store(create_test_store());

    let result = server.run().await;
    assert!(matches!(result, Err(ClientbookError::InvalidAddress(_))));
}

#[tokio::test]
async fn test_builder_prepares_router_from_explicit_store() {
    let mut server = GraphQLServerBuilder::new()
        .with_settings(&ServerSettings::default())
        .with_store(create_test_store())
        .build();

    let app = server.prepare().await.unwrap();
    let response = app
        .oneshot(graphql_post(json!({"query": r#"{ client(id: "1") { name } }"#})))
        .await
        .unwrap();

    assert_eq!(
        json_body(response).await,
        json!({"data": {"client": {"name": "Alice"}}})
    );
}

#[tokio::test]
async fn test_builder_loads_builtin_sample_data() {
    let mut server = GraphQLServerBuilder::new()
        .with_settings(&ServerSettings::default())
        .build();

    let app = server.prepare().await.unwrap();
    let response = app
        .oneshot(graphql_post(json!({"query": "{ clients { id } }"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["clients"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_builder_fails_on_missing_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ServerSettings {
        data_path: Some(dir.path().join("missing.json")),
        ..ServerSettings::default()
    };

    let mut server = GraphQLServerBuilder::new().with_settings(&settings).build();
    let err = server.prepare().await.unwrap_err();
    assert!(matches!(err, ClientbookError::DataSource { .. }));
}

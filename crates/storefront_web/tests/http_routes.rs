use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::path::PathBuf;
use storefront_core::db::open_db;
use storefront_core::{
    CreateBrand, CreateProduct, LifecycleManager, SqliteBrandStore, SqliteProductStore,
    PERSISTENCE_FAILURE_MESSAGE,
};
use storefront_web::{app, AppState};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    _dir: TempDir,
    db_path: PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("storefront.sqlite3");
        open_db(&db_path).unwrap();
        Self { _dir: dir, db_path }
    }

    fn router(&self) -> Router {
        app(AppState::new(self.db_path.clone()))
    }

    fn seed_brand(&self, name: &str) -> Uuid {
        let conn = open_db(&self.db_path).unwrap();
        LifecycleManager::new(SqliteBrandStore::new(&conn))
            .create(&CreateBrand::new(name, ""))
            .into_value()
            .unwrap()
            .id
    }

    fn seed_product(&self, brand_id: Uuid, name: &str, price_cents: i64) -> Uuid {
        let conn = open_db(&self.db_path).unwrap();
        LifecycleManager::new(SqliteProductStore::new(&conn))
            .create(&CreateProduct::new(brand_id, name, price_cents))
            .into_value()
            .unwrap()
            .product
            .id
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_raw(method, uri, body.map(|body| body.to_string()))
            .await
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }
}

fn names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn welcome_and_health_respond() {
    let app = TestApp::new();

    let (status, page) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["component"], "Welcome");
    assert!(!page["version"].as_str().unwrap().is_empty());

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["ping"], "pong");
}

#[tokio::test]
async fn brand_index_sorts_and_echoes_filters() {
    let app = TestApp::new();
    app.seed_brand("Zen");
    app.seed_brand("Acme");

    let (status, page) = app.get("/brands?sort=name&direction=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["component"], "Brands/Index");
    assert_eq!(names(&page["props"]["brands"]), vec!["Zen", "Acme"]);
    assert_eq!(page["props"]["filters"]["direction"], "desc");

    let (_, page) = app.get("/brands?q=ac").await;
    assert_eq!(names(&page["props"]["brands"]), vec!["Acme"]);
    assert_eq!(page["props"]["filters"]["q"], "ac");
}

#[tokio::test]
async fn unknown_sort_field_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.get("/brands?sort=password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn brand_crud_flow_over_http() {
    let app = TestApp::new();

    let (status, created) = app
        .send(
            Method::POST,
            "/brands",
            Some(json!({ "name": "Acme", "description": "Anvils" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["ok"], true);
    assert_eq!(created["message"], "Brand created successfully.");
    assert_eq!(created["redirect_to"], "/brands");
    let id = created["record_id"].as_str().unwrap().to_string();

    let (status, page) = app.get(&format!("/brands/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["component"], "Brands/Show");
    assert_eq!(page["props"]["brand"]["name"], "Acme");
    assert!(page["props"]["created_on"].is_string());

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/brands/{id}"),
            Some(json!({ "name": "Acme Corp" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Data updated successfully.");

    let (_, page) = app.get(&format!("/brands/{id}/edit")).await;
    assert_eq!(page["component"], "Brands/Form");
    assert_eq!(page["props"]["brand"]["name"], "Acme Corp");
    assert_eq!(page["props"]["brand"]["description"], "Anvils");

    let (status, deleted) = app.send(Method::DELETE, &format!("/brands/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Data deleted successfully.");

    let (status, body) = app.get(&format!("/brands/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Brand not found.");
}

#[tokio::test]
async fn update_of_unknown_brand_is_not_found() {
    let app = TestApp::new();
    app.seed_brand("Acme");
    let missing = Uuid::new_v4();

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/brands/{missing}"),
            Some(json!({ "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Brand not found.");
    assert_eq!(body["redirect_to"], "/brands");

    let (_, page) = app.get("/brands").await;
    assert_eq!(names(&page["props"]["brands"]), vec!["Acme"]);
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_the_store() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/brands", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, page) = app.get("/brands").await;
    assert!(page["props"]["brands"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_with_unknown_brand_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/products",
            Some(json!({ "brand_id": Uuid::new_v4(), "name": "Rocket", "price_cents": 100 })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn product_pages_expand_brand_and_fall_back_to_placeholder() {
    let app = TestApp::new();
    let acme = app.seed_brand("Acme");
    let rocket = app.seed_product(acme, "Rocket", 1_999);
    app.seed_product(acme, "Anvil", 4_999);

    let (status, page) = app.get("/products?sort=price&direction=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&page["props"]["products"]), vec!["Anvil", "Rocket"]);

    let (_, page) = app.get(&format!("/products/{rocket}")).await;
    assert_eq!(page["component"], "Products/Show");
    assert_eq!(page["props"]["product"]["brand"]["name"], "Acme");
    assert_eq!(
        page["props"]["image"],
        "https://via.placeholder.com/300x300"
    );

    let (_, form) = app.get("/products/create").await;
    assert_eq!(form["component"], "Products/Form");
    assert!(form["props"]["product"].is_null());
    assert_eq!(names(&form["props"]["brands"]), vec!["Acme"]);
}

#[tokio::test]
async fn deleting_a_referenced_brand_reports_generic_failure() {
    let app = TestApp::new();
    let acme = app.seed_brand("Acme");
    app.seed_product(acme, "Rocket", 100);

    let (status, body) = app.send(Method::DELETE, &format!("/brands/{acme}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], PERSISTENCE_FAILURE_MESSAGE);
    assert_eq!(body["redirect_to"], format!("/brands/{acme}"));

    let (status, _) = app.get(&format!("/brands/{acme}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn suggestions_match_product_names() {
    let app = TestApp::new();
    let acme = app.seed_brand("Acme");
    app.seed_product(acme, "Rocket Skates", 100);
    app.seed_product(acme, "Rocket", 100);
    app.seed_product(acme, "Anvil", 100);

    let (status, body) = app.get("/api/products/suggestions?q=rock&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!(["Rocket"]));

    let (_, body) = app.get("/api/products/suggestions?q=").await;
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn malformed_identity_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/brands/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Brand not found.");

    let (status, body) = app.send(Method::DELETE, "/products/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found.");

    let (status, body) = app
        .send(
            Method::PATCH,
            "/brands/123",
            Some(json!({ "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_json_bodies_use_the_error_envelope() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/brands", Some(json!({ "description": "x" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
    assert!(!body["message"].as_str().unwrap().is_empty());

    let (status, body) = app
        .send_raw(Method::POST, "/brands", Some("{\"name\": ".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn submitted_names_are_trimmed_at_the_boundary() {
    let app = TestApp::new();

    let (status, created) = app
        .send(Method::POST, "/brands", Some(json!({ "name": "  Acme  " })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["record_id"].as_str().unwrap().to_string();

    let (_, page) = app.get(&format!("/brands/{id}")).await;
    assert_eq!(page["props"]["brand"]["name"], "Acme");
}

#[tokio::test]
async fn product_image_can_be_cleared_with_null() {
    let app = TestApp::new();
    let acme = app.seed_brand("Acme");

    let (_, created) = app
        .send(
            Method::POST,
            "/products",
            Some(json!({
                "brand_id": acme,
                "name": "Anvil",
                "price_cents": 100,
                "image_url": "https://cdn.example.com/anvil.png",
            })),
        )
        .await;
    let id = created["record_id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/products/{id}"),
            Some(json!({ "image_url": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, page) = app.get(&format!("/products/{id}")).await;
    assert!(page["props"]["product"]["image_url"].is_null());
    assert_eq!(page["props"]["image"], "https://via.placeholder.com/300x300");
}

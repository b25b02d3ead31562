//! Router tests: full middleware stack over an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pos_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let state = ServerState::initialize(&Config::for_testing()).await.unwrap();
        Self {
            app: build_app(&state),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn create(&self, uri: &str, token: &str, body: Value) -> Value {
        let (status, value) = self.send(Method::POST, uri, Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {uri} failed: {value}");
        value
    }
}

/// Category, menu (12.50), zone and table, created by the admin
async fn seed_catalog(app: &TestApp, admin: &str) -> (i64, i64) {
    let category = app
        .create("/api/categories", admin, json!({"name": "Mains"}))
        .await;
    let menu = app
        .create(
            "/api/menus",
            admin,
            json!({"category_id": category["id"], "name": "Noodles", "price": 12.5}),
        )
        .await;
    let zone = app
        .create("/api/zones", admin, json!({"name": "Terrace"}))
        .await;
    let table = app
        .create(
            "/api/table",
            admin,
            json!({"table_number": "T1", "zone_id": zone["id"]}),
        )
        .await;
    (menu["id"].as_i64().unwrap(), table["id"].as_i64().unwrap())
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/menus", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app
        .send(Method::GET, "/api/menus", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_password_without_enumeration() {
    let app = TestApp::new().await;
    let (wrong_password, body_a) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "nope"})),
        )
        .await;
    let (unknown_user, body_b) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "ghost", "password": "nope"})),
        )
        .await;
    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["message"], body_b["message"]);
}

#[tokio::test]
async fn test_me_and_refresh() {
    let app = TestApp::new().await;
    let token = app.login("admin", "admin123").await;

    let (status, me) = app.send(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["role"], "admin");

    let (status, refreshed) = app
        .send(Method::POST, "/api/auth/refresh", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_token = refreshed["token"].as_str().unwrap();
    let (status, _) = app.send(Method::GET, "/api/auth/me", Some(new_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cashier_permissions() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    app.create(
        "/api/cashiers",
        &admin,
        json!({
            "first_name": "Cam", "last_name": "Cashier", "email": "cam@example.com",
            "username": "cam", "password": "cashier1", "status": "cashier"
        }),
    )
    .await;
    let cashier = app.login("cam", "cashier1").await;

    // catalog:read yes, menu:manage no
    let (status, _) = app.send(Method::GET, "/api/categories", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .send(
            Method::POST,
            "/api/categories",
            Some(&cashier),
            Some(json!({"name": "Desserts"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    // user management and reports are admin only
    let (status, _) = app.send(Method::GET, "/api/cashiers", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::GET, "/api/dashboard", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_catalog_validation_and_conflicts() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;

    let (status, body) = app
        .send(Method::POST, "/api/categories", Some(&admin), Some(json!({"name": "  "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let category = app
        .create("/api/categories", &admin, json!({"name": "Drinks"}))
        .await;
    let (status, body) = app
        .send(Method::POST, "/api/categories", Some(&admin), Some(json!({"name": "Drinks"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6103);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/menus",
            Some(&admin),
            Some(json!({"category_id": category["id"], "name": "Tea", "price": -1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let menu = app
        .create(
            "/api/menus",
            &admin,
            json!({"category_id": category["id"], "name": "Tea", "price": 2.25}),
        )
        .await;

    // status-only toggle, boolean form
    let (status, toggled) = app
        .send(
            Method::PATCH,
            &format!("/api/menus/{}", menu["id"]),
            Some(&admin),
            Some(json!({"status": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["status"], "unavailable");

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/categories/{}", category["id"]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);

    let (status, found) = app
        .send(Method::GET, "/api/menus?name=Tea", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_then_bill_then_paid() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let (menu_id, table_id) = seed_catalog(&app, &admin).await;

    let created = app
        .create(
            "/api/order",
            &admin,
            json!({
                "table_id": table_id,
                "order_items": [{"menu_id": menu_id, "quantity": 2}]
            }),
        )
        .await;
    let order_id = created["orderId"].as_i64().unwrap();
    assert_eq!(created["order"]["status"], "pending");
    assert_eq!(created["order"]["total_amount"], 25.0);

    let bill = app
        .create(
            "/api/bills",
            &admin,
            json!({
                "order_id": order_id, "payment_status": "paid",
                "payment_method": "cash", "received_amount": 30.0
            }),
        )
        .await;
    assert_eq!(bill["total_amount"], 25.0);
    assert_eq!(bill["change_amount"], 5.0);

    // Browser follow-up PATCH is accepted
    let (status, order) = app
        .send(
            Method::PATCH,
            &format!("/api/order/{order_id}"),
            Some(&admin),
            Some(json!({"status": "paid"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "paid");

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/order/{order_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    let (status, summaries) = app
        .send(Method::GET, "/api/order?status=paid", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summaries[0]["item_count"], 1);
    assert_eq!(summaries[0]["table_number"], "T1");
}

#[tokio::test]
async fn test_pay_endpoint_and_dashboard() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let (menu_id, table_id) = seed_catalog(&app, &admin).await;

    let created = app
        .create(
            "/api/order",
            &admin,
            json!({"table_id": table_id, "order_items": [{"menu_id": menu_id, "quantity": 1}]}),
        )
        .await;
    let order_id = created["orderId"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/order/{order_id}/pay"),
            Some(&admin),
            Some(json!({"received_amount": 10.0})),
        )
        .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], 5002);

    let (status, receipt) = app
        .send(
            Method::POST,
            &format!("/api/order/{order_id}/pay"),
            Some(&admin),
            Some(json!({"received_amount": 20.0, "payment_method": "cash"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["bill"]["change_amount"], 7.5);
    assert_eq!(receipt["order"]["status"], "paid");

    let (status, stats) = app.send(Method::GET, "/api/dashboard", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_sales"], 12.5);
    assert_eq!(stats["total_bills"], 1);
    assert_eq!(stats["total_menus"], 1);
    assert_eq!(stats["total_tables"], 1);
    assert_eq!(stats["monthly_sales"].as_array().unwrap().len(), 12);
    assert_eq!(stats["daily_sales"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_cannot_delete_self() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let (_, me) = app.send(Method::GET, "/api/auth/me", Some(&admin), None).await;

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/cashiers/{}", me["id"]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 8003);
}

#[tokio::test]
async fn test_disabled_account_loses_access_immediately() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let (menu_id, table_id) = seed_catalog(&app, &admin).await;
    let cam = app
        .create(
            "/api/cashiers",
            &admin,
            json!({
                "first_name": "Cam", "last_name": "Cashier",
                "username": "cam", "password": "cashier1", "role": "cashier"
            }),
        )
        .await;
    let cashier = app.login("cam", "cashier1").await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/cashiers/{}", cam["id"]),
            Some(&admin),
            Some(json!({"is_active": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    // Token is still valid, the account is not
    let (status, body) = app
        .send(
            Method::POST,
            "/api/order",
            Some(&cashier),
            Some(json!({
                "table_id": table_id,
                "order_items": [{"menu_id": menu_id, "quantity": 1}]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1007);
}

#[tokio::test]
async fn test_demoted_admin_loses_admin_routes() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let ada = app
        .create(
            "/api/cashiers",
            &admin,
            json!({
                "first_name": "Ada", "last_name": "Lovelace",
                "username": "ada", "password": "admin456", "role": "admin"
            }),
        )
        .await;
    let ada_token = app.login("ada", "admin456").await;
    let (status, _) = app.send(Method::GET, "/api/cashiers", Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/cashiers/{}", ada["id"]),
            Some(&admin),
            Some(json!({"role": "cashier"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, _) = app.send(Method::GET, "/api/cashiers", Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::GET, "/api/dashboard", Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    // cashier rights still apply
    let (status, _) = app.send(Method::GET, "/api/categories", Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bill_settles_lines_added_after_it_was_opened() {
    let app = TestApp::new().await;
    let admin = app.login("admin", "admin123").await;
    let (menu_id, table_id) = seed_catalog(&app, &admin).await;

    let created = app
        .create(
            "/api/order",
            &admin,
            json!({
                "table_id": table_id,
                "order_items": [{"menu_id": menu_id, "quantity": 1}]
            }),
        )
        .await;
    let order_id = created["orderId"].as_i64().unwrap();
    let bill = app
        .create("/api/bills", &admin, json!({"order_id": order_id}))
        .await;
    assert_eq!(bill["total_amount"], 12.5);

    let item = app
        .create(
            "/api/order_items",
            &admin,
            json!({"order_id": order_id, "menu_id": menu_id, "quantity": 3}),
        )
        .await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/bills/{}", bill["id"]),
            Some(&admin),
            Some(json!({"payment_status": "paid", "received_amount": 12.5})),
        )
        .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], 5002);

    let (_, order) = app
        .send(Method::GET, &format!("/api/order/{order_id}"), Some(&admin), None)
        .await;
    assert_eq!(order["status"], "updated");
    assert_eq!(order["total_amount"], 50.0);

    // Removing lines down to the last one is allowed, the last one is not
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/order_items/{}", item["id"]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, lines) = app
        .send(
            Method::GET,
            &format!("/api/order_items?order_id={order_id}"),
            Some(&admin),
            None,
        )
        .await;
    let last = &lines.as_array().unwrap()[0];
    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/order_items/{}", last["id"]),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);
}

//! Integration tests for the CRM router.
//!
//! Each test builds the full router (sessions included) over a fresh
//! in-memory `SQLite` database and drives it with `oneshot`, carrying the
//! session cookie between requests by hand.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use serelix_web::config::AppConfig;
use serelix_web::db;
use serelix_web::middleware::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
use serelix_web::state::AppState;

const SESSION_SECRET: &str = "Zq8#vN2!pL5@xR9$kT3%mW7^bY1&cH4*fJ6(gD0)sA2-eU8+iO5=nQ7?tV3/yX1<";

// =============================================================================
// Helpers
// =============================================================================

async fn test_app() -> Router {
    let config = AppConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: [127, 0, 0, 1].into(),
        port: 5000,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from(SESSION_SECRET),
        sentry_dsn: None,
        sentry_environment: None,
    };

    let pool = db::create_pool(&config.database_url).await.unwrap();
    db::migrate(&pool).await.unwrap();
    let store = create_session_store(&pool).await.unwrap();
    let session_layer = create_session_layer(store, &config).unwrap();

    serelix_web::app(AppState::new(config, pool), session_layer)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// The `name=value` pair of the session cookie set by a response.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(SESSION_COOKIE_NAME))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Register an account and return its session cookie.
async fn register(app: &Router, email: &str, name: &str) -> String {
    let body = format!("email={}&password=correct-horse&name={name}", urlencoding::encode(email));
    let response = send(app, form("/register", &body, None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    session_cookie(&response).unwrap()
}

async fn add_client(app: &Router, cookie: &str, payload: &Value) -> i64 {
    let response = send(app, json_request("POST", "/add_client", payload, Some(cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    body["id"].as_i64().unwrap()
}

// =============================================================================
// Public Pages
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app().await;

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = send(&app, get("/health/ready", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_landing_page_and_static_assets() {
    let app = test_app().await;

    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("href=\"/register\""));

    let response = send(&app, get("/static/css/main.css", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_logs_in() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome, Ada"));
}

#[tokio::test]
async fn test_duplicate_registration_flashes() {
    let app = test_app().await;
    register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        form(
            "/register",
            "email=ada%40analytical.io&password=other&name=Impostor",
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Email already exists"));
}

#[tokio::test]
async fn test_registration_requires_password() {
    let app = test_app().await;

    let response = send(
        &app,
        form("/register", "email=ada%40analytical.io&password=&name=Ada", None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Password is required"));
}

#[tokio::test]
async fn test_bad_login_rerenders_with_flash() {
    let app = test_app().await;
    register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        form("/login", "email=ada%40analytical.io&password=wrong", None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Invalid email or password"));
    assert!(html.contains("value=\"ada@analytical.io\""));
}

#[tokio::test]
async fn test_login_follows_local_next() {
    let app = test_app().await;
    register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        form(
            "/login?next=%2Fclients",
            "email=ada%40analytical.io&password=correct-horse",
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/clients");

    let response = send(
        &app,
        form(
            "/login?next=%2F%2Fevil.example",
            "email=ada%40analytical.io&password=correct-horse",
            None,
        ),
    )
    .await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_after_logout_redirect_stays_logged_in() {
    let app = test_app().await;
    register(&app, "ada@analytical.io", "Ada").await;

    let response = send(&app, get("/logout", None)).await;
    assert_eq!(location(&response), "/login?next=%2Flogout");

    let response = send(&app, get("/login?next=%2Flogout", None)).await;
    assert!(!body_text(response).await.contains("logout"));

    let response = send(
        &app,
        form(
            "/login?next=%2Flogout",
            "email=ada%40analytical.io&password=correct-horse",
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response).unwrap();

    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_registration_error_keeps_logged_in_nav() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        form(
            "/register",
            "email=ada%40analytical.io&password=other&name=Ada",
            Some(&cookie),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Email already exists"));
    assert!(html.contains("<li class=\"nav-user\">Ada</li>"));
    assert!(html.contains("Log out"));
}

#[tokio::test]
async fn test_unauthenticated_page_redirects_to_login() {
    let app = test_app().await;

    let response = send(&app, get("/dashboard", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fdashboard");
}

#[tokio::test]
async fn test_unauthenticated_mutation_is_401() {
    let app = test_app().await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/add_client",
            &json!({ "name": "Acme", "email": "hi@acme.io" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Authentication required" })
    );
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(&app, get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// =============================================================================
// Client Records
// =============================================================================

#[tokio::test]
async fn test_add_client_creates_one_owned_record() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    add_client(
        &app,
        &cookie,
        &json!({ "name": "Babbage & Co", "email": "charles@babbage.io", "company": "Engines" }),
    )
    .await;

    let response = send(&app, get("/clients", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(html.matches("class=\"client-row\"").count(), 1);
    assert!(html.contains("charles@babbage.io"));
    assert!(html.contains("badge-lead"));

    let other = register(&app, "grace@navy.mil", "Grace").await;
    let response = send(&app, get("/clients", Some(&other))).await;
    assert!(!body_text(response).await.contains("charles@babbage.io"));
}

#[tokio::test]
async fn test_add_client_requires_name_and_email() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        json_request("POST", "/add_client", &json!({ "name": "Nameless" }), Some(&cookie)),
    )
    .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_dashboard_counts_reflect_statuses() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    for (name, status) in [("A", "lead"), ("B", "lead"), ("C", "active"), ("D", "inactive")] {
        add_client(
            &app,
            &cookie,
            &json!({ "name": name, "email": format!("{name}@x.io"), "status": status }),
        )
        .await;
    }

    let html = body_text(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("id=\"stat-total\">4<"));
    assert!(html.contains("id=\"stat-leads\">2<"));
    assert!(html.contains("id=\"stat-active\">1<"));
}

#[tokio::test]
async fn test_owner_can_update_and_delete() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;
    let id = add_client(&app, &cookie, &json!({ "name": "Acme", "email": "hi@acme.io" })).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/update_client/{id}"),
            &json!({ "status": "active" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let html = body_text(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("id=\"stat-active\">1<"));
    assert!(html.contains("Acme"));

    let response = send(&app, delete(&format!("/delete_client/{id}"), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(html.contains("id=\"stat-total\">0<"));
}

#[tokio::test]
async fn test_cross_user_access_is_forbidden() {
    let app = test_app().await;
    let owner = register(&app, "ada@analytical.io", "Ada").await;
    let intruder = register(&app, "mallory@evil.example", "Mallory").await;
    let id = add_client(&app, &owner, &json!({ "name": "Acme", "email": "hi@acme.io" })).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/update_client/{id}"),
            &json!({ "name": "Hijacked" }),
            Some(&intruder),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));

    let response = send(&app, delete(&format!("/delete_client/{id}"), Some(&intruder))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let html = body_text(send(&app, get("/clients", Some(&owner))).await).await;
    assert!(html.contains("Acme"));
    assert!(!html.contains("Hijacked"));
}

#[tokio::test]
async fn test_unknown_client_is_404() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(
        &app,
        json_request("PUT", "/update_client/999", &json!({ "name": "Ghost" }), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));

    let response = send(&app, delete("/delete_client/999", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_client_id_is_404() {
    let app = test_app().await;
    let cookie = register(&app, "ada@analytical.io", "Ada").await;

    let response = send(&app, delete("/delete_client/abc", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));

    let response = send(
        &app,
        json_request("PUT", "/update_client/abc", &json!({ "name": "Ghost" }), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

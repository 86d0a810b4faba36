#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use estate_api::auth::jwt::{generate_access_token, JwtConfig};
use estate_api::auth::password::hash_password;
use estate_api::config::ServerConfig;
use estate_api::router::build_app_router;
use estate_api::state::AppState;
use estate_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use estate_db::models::staff_user::CreateStaffUser;
use estate_db::{MemoryLeadStore, MemoryStaffStore, StaffStore};
use estate_events::{EventBus, LeadNotification, Notifier, NotifyError};

pub const ADMIN_EMAIL: &str = "admin@estate.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PUBLIC_FORM_URL: &str = "https://waitlist.estate.test/";

/// Build a test `ServerConfig` with safe defaults and no external services.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        public_form_url: PUBLIC_FORM_URL.to_string(),
        allow_signup: true,
        admin: None,
        notify_function_url: None,
        notify_recipient: None,
        smtp: None,
    }
}

/// Records every notification instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<LeadNotification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<LeadNotification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(lead.clone());
        if self.fail {
            return Err(NotifyError::HttpStatus(502));
        }
        Ok(())
    }
}

/// Everything a test needs to drive the app and inspect its collaborators.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub leads: Arc<MemoryLeadStore>,
    pub staff: Arc<MemoryStaffStore>,
    pub bus: Arc<EventBus>,
    pub notifier: Arc<RecordingNotifier>,
    pub mailer: Arc<RecordingNotifier>,
}

impl TestApp {
    /// A fresh router over the same state (`oneshot` consumes the router).
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config(), RecordingNotifier::default())
}

/// Build the full application router on in-memory stores, with recording
/// notifiers in place of HTTP and SMTP delivery.
pub fn build_test_app_with(config: ServerConfig, mailer: RecordingNotifier) -> TestApp {
    let bus = Arc::new(EventBus::default());
    let leads = Arc::new(MemoryLeadStore::new(Arc::clone(&bus)));
    let staff = Arc::new(MemoryStaffStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let mailer = Arc::new(mailer);

    let mut state = AppState::new(config.clone(), leads.clone(), staff.clone(), Arc::clone(&bus));
    state.notifier = Some(notifier.clone());
    state.function_mailer = Some(mailer.clone());

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        leads,
        staff,
        bus,
        notifier,
        mailer,
    }
}

/// Create a staff account directly in the store and return a valid token.
pub async fn seed_staff(app: &TestApp, email: &str, password: &str, role: &str) -> String {
    let user = app
        .staff
        .create(CreateStaffUser {
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            role: role.to_string(),
        })
        .await
        .unwrap();
    generate_access_token(user.id, &user.role, &app.state.config.jwt).unwrap()
}

pub async fn admin_token(app: &TestApp) -> String {
    seed_staff(app, ADMIN_EMAIL, ADMIN_PASSWORD, ROLE_ADMIN).await
}

pub async fn member_token(app: &TestApp) -> String {
    seed_staff(app, "member@estate.test", "member-password", ROLE_MEMBER).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A valid form body, dated well in the future.
pub fn lead_body(name: &str, budget: &str, neighborhoods: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phone": "2125550100",
        "moveInDate": "2099-06-01",
        "budgetRange": budget,
        "neighborhoods": neighborhoods,
    })
}

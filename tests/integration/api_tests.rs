//! API integration tests
//!
//! The real HTTP client runs against an in-process stub of the Book Buddy
//! service built with axum.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use book_buddy::{
    api::{ApiClient, LibraryApi},
    config::AppConfig,
    models::{Book, LoginRequest, RegisterRequest},
    router::{Navigation, Route},
    services::{
        session::Restored,
        storage::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY},
    },
    views::{AccountView, BookDetailView, LoginView, Opened},
    App, AppError, Screen,
};

const VALID_TOKEN: &str = "valid-token";

#[derive(Default)]
struct StubState {
    books: Vec<Value>,
    reservations: Vec<Value>,
    patches: Vec<Value>,
}

type Shared = Arc<Mutex<StubState>>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

fn reader() -> Value {
    json!({ "id": 1, "firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com" })
}

async fn list_books(State(state): State<Shared>) -> Response {
    let books = state.lock().unwrap().books.clone();
    Json(json!({ "books": books })).into_response()
}

async fn get_book(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response();
    }
    let state = state.lock().unwrap();
    match state.books.iter().find(|b| b["id"] == id) {
        Some(book) => Json(book.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn patch_book(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut state = state.lock().unwrap();
    state.patches.push(body.clone());
    match state.books.iter_mut().find(|b| b["id"] == id) {
        Some(book) => {
            book["available"] = body["available"].clone();
            Json(book.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn list_reservations(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let reservations = state.lock().unwrap().reservations.clone();
    Json(Value::Array(reservations)).into_response()
}

async fn delete_reservation(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut state = state.lock().unwrap();
    let before = state.reservations.len();
    state.reservations.retain(|r| r["id"] != id);
    if state.reservations.len() == before {
        return error(StatusCode::NOT_FOUND, "Reservation not found");
    }
    Json(json!({ "message": "Book returned" })).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return error(StatusCode::CONFLICT, "User already exists");
    }
    let user = json!({
        "id": 2,
        "firstname": body["firstname"],
        "lastname": body["lastname"],
        "email": body["email"],
    });
    Json(json!({ "user": user, "token": VALID_TOKEN })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "ada@example.com" && body["password"] == "correct" {
        Json(json!({ "user": reader(), "token": VALID_TOKEN })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(reader()).into_response()
}

/// Start the stub service; returns its `/api` base URL and its state
async fn spawn_stub() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(StubState {
        books: vec![
            json!({ "id": 1, "title": "The Hobbit", "author": "J.R.R. Tolkien",
                    "description": "There and back again.", "coverimage": "https://covers.example/1.jpg",
                    "available": true }),
            json!({ "id": 2, "title": "Emma", "author": "Jane Austen",
                    "description": "Matchmaking.", "coverimage": null, "available": false }),
        ],
        reservations: vec![
            json!({ "id": 10, "title": "Emma", "author": "Jane Austen", "bookid": 2 }),
            json!({ "id": 11, "title": "Dune", "author": "Frank Herbert", "bookid": 3 }),
        ],
        patches: Vec::new(),
    }));

    let api = Router::new()
        .route("/books", get(list_books))
        .route("/books/:id", get(get_book).patch(patch_book))
        .route("/reservations", get(list_reservations))
        .route("/reservations/:id", delete(delete_reservation))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(me))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub service");
    let addr: SocketAddr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, Router::new().nest("/api", api))
            .await
            .expect("Stub service failed");
    });

    (format!("http://{}/api", addr), state)
}

fn config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    config.ui.checkout_redirect_delay_ms = 10;
    config
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&config(base_url).api).expect("Failed to build client")
}

fn app(base_url: &str, store: Arc<dyn KeyValueStore>) -> App {
    App::with_parts(config(base_url), Arc::new(client(base_url)), store)
}

#[tokio::test]
async fn test_list_and_get_books() {
    let (base_url, _) = spawn_stub().await;
    let client = client(&base_url);

    let books = client.list_books().await.expect("Failed to list books");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].cover_image.as_deref(), Some("https://covers.example/1.jpg"));
    assert!(books[1].cover_image.is_none());

    let book: Book = client.get_book(2).await.expect("Failed to get book");
    assert_eq!(book.title, "Emma");
}

#[tokio::test]
async fn test_missing_book_carries_service_message() {
    let (base_url, _) = spawn_stub().await;

    let err = client(&base_url).get_book(99).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Book not found");
}

#[tokio::test]
async fn test_non_json_error_uses_fallback_message() {
    let (base_url, _) = spawn_stub().await;

    let err = client(&base_url).get_book(500).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "An error occurred");
}

#[tokio::test]
async fn test_authorized_call_without_valid_token() {
    let (base_url, _) = spawn_stub().await;

    let err = client(&base_url)
        .list_reservations("stale")
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_network_failure() {
    // Bind then drop a listener to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr))
        .list_books()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}

#[tokio::test]
async fn test_configured_timeout_bounds_requests() {
    let slow = Router::new().route(
        "/books",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(json!({ "books": [] }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().nest("/api", slow))
            .await
            .expect("Stub service failed");
    });

    let mut config = config(&format!("http://{}/api", addr));
    config.api.timeout_seconds = 1;
    let client = ApiClient::new(&config.api).expect("Failed to build client");

    let started = std::time::Instant::now();
    let err = client.list_books().await.unwrap_err();
    assert!(matches!(err, AppError::Network(ref e) if e.is_timeout()));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_login_with_invalid_credentials_stays_on_form() {
    let (base_url, _) = spawn_stub().await;
    let app = app(&base_url, Arc::new(MemoryStore::new()));

    let mut view = LoginView::new();
    view.set_email("ada@example.com");
    view.set_password("wrong");

    assert_eq!(view.submit(&app.services).await, Navigation::Stay);
    assert_eq!(view.error(), Some("Invalid credentials"));
    assert!(!app.session().await.is_authenticated());
}

#[tokio::test]
async fn test_login_then_checkout() {
    let (base_url, state) = spawn_stub().await;
    let store = Arc::new(MemoryStore::new());
    let app = app(&base_url, store.clone());

    let mut login = LoginView::new();
    login.set_email("ada@example.com");
    login.set_password("correct");
    assert_eq!(login.submit(&app.services).await, Navigation::To(Route::Catalog));
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some(VALID_TOKEN));

    let user = client(&base_url)
        .current_user(&app.services.session.token().await.unwrap())
        .await
        .expect("Token should be accepted");
    assert_eq!(user.firstname, "Ada");

    let mut view = BookDetailView::open(1, &app.services, app.config.checkout_redirect_delay());
    view.loaded().await;
    assert!(view.can_checkout(&app.session().await));

    let next = view.checkout().await;
    assert_eq!(
        next,
        Navigation::After {
            route: Route::Account,
            delay: Duration::from_millis(10)
        }
    );
    assert!(!view.book().unwrap().available);
    assert_eq!(state.lock().unwrap().patches, vec![json!({ "available": false })]);
}

#[tokio::test]
async fn test_account_return_flow() {
    let (base_url, _) = spawn_stub().await;
    let app = app(&base_url, Arc::new(MemoryStore::new()));

    let auth = client(&base_url)
        .login(&LoginRequest {
            email: "ada@example.com".into(),
            password: "correct".into(),
        })
        .await
        .expect("Login should succeed");
    app.services.session.login(auth.user, auth.token).await;

    let mut view = match AccountView::open(&app.services).await {
        Opened::View(view) => view,
        Opened::Redirect(route) => panic!("unexpected redirect to {}", route),
    };
    view.loaded().await;
    assert_eq!(view.reservations().len(), 2);

    assert!(view.return_book(10).await);
    assert_eq!(view.reservations().len(), 1);

    // Already gone on the service side: the list must not change
    assert!(!view.return_book(10).await);
    assert_eq!(view.reservations().len(), 1);
    assert!(view.action_error().is_some());
}

#[tokio::test]
async fn test_register_creates_session() {
    let (base_url, _) = spawn_stub().await;
    let client = client(&base_url);

    let auth = client
        .register(&RegisterRequest {
            firstname: "Grace".into(),
            lastname: "Hopper".into(),
            email: "grace@example.com".into(),
            password: "cobol".into(),
        })
        .await
        .expect("Registration should succeed");
    assert_eq!(auth.user.firstname, "Grace");
    assert_eq!(auth.token, VALID_TOKEN);

    let err = client
        .register(&RegisterRequest {
            email: "taken@example.com".into(),
            password: "x".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
}

#[tokio::test]
async fn test_persisted_session_is_restored() {
    let (base_url, _) = spawn_stub().await;
    let dir = std::env::temp_dir().join(format!("book-buddy-{}", uuid::Uuid::new_v4()));
    let path = dir.join("storage.json");

    FileStore::new(&path).set(TOKEN_KEY, VALID_TOKEN).unwrap();

    let app = app(&base_url, Arc::new(FileStore::new(&path)));
    match app.start().await.expect("Restore should succeed") {
        Restored::Authenticated(user) => assert_eq!(user.email, "ada@example.com"),
        other => panic!("unexpected restore outcome {:?}", other),
    }
    assert!(matches!(app.open(Route::Account).await, Screen::Account(_)));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_rejected_persisted_token_is_cleared() {
    let (base_url, _) = spawn_stub().await;
    let store = Arc::new(MemoryStore::new());
    store.set(TOKEN_KEY, "expired").unwrap();

    let app = app(&base_url, store.clone());
    assert_eq!(app.start().await.unwrap(), Restored::Rejected);
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert!(matches!(app.open(Route::Account).await, Screen::Login(_)));
}

// tavola-client/tests/common/mod.rs
// In-process mock of the restaurant backend

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tavola_client::{ClientConfig, OneshotHttpClient, RetryPolicy, TavolaClient};

/// One request as the backend saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockState {
    pub requests: Mutex<Vec<Recorded>>,
    pub branches: Mutex<Vec<Value>>,
    pub meals: Mutex<Vec<Value>>,
    pub cart_items: Mutex<Vec<Value>>,
    pub reservations: Mutex<Vec<Value>>,
    pub tags: Mutex<Vec<Value>>,
    pub pages: Mutex<Vec<Value>>,
    /// Number of upcoming requests answered with 503
    pub fail_next: Mutex<u32>,
    next_id: Mutex<i64>,
}

impl MockState {
    fn next_id(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        100 + *id
    }
}

pub type Shared = Arc<MockState>;

pub struct MockBackend {
    pub state: Shared,
    pub client: TavolaClient<OneshotHttpClient>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        // RUST_LOG=tavola_client=debug shows client logs for a failing test
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        let state: Shared = Arc::new(MockState::default());
        let client = TavolaClient::in_process(router(state.clone()), config).unwrap();
        Self { state, client }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
    }

    /// Requests matching a method, in order
    pub fn calls(&self, method: Method) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn seed_branch(&self, name: &str, city: &str, is_active: bool) -> i64 {
        let id = self.state.next_id();
        self.state.branches.lock().unwrap().push(json!({
            "id": id,
            "name": name,
            "address": format!("{id} Corniche Rd"),
            "city": city,
            "phone": "+20100000000",
            "isActive": is_active
        }));
        id
    }

    pub fn seed_meal(&self, title: &str, price: f64) -> i64 {
        let id = self.state.next_id();
        self.state.meals.lock().unwrap().push(meal_json(id, title, price));
        id
    }

    pub fn seed_tag(&self, title: &str) -> i64 {
        let id = self.state.next_id();
        self.state.tags.lock().unwrap().push(json!({
            "id": id,
            "title": title,
            "textColor": "#FFFFFF",
            "backgroundColor": "#2E7D32"
        }));
        id
    }

    pub fn seed_page(&self, slug: &str, title: &str) -> i64 {
        let id = self.state.next_id();
        self.state.pages.lock().unwrap().push(json!({
            "id": id,
            "slug": slug,
            "title": title,
            "heroImage": null,
            "content": "Welcome",
            "isPublished": true
        }));
        id
    }

    pub fn seed_reservation(&self, status: &str) -> i64 {
        let id = self.state.next_id();
        self.state.reservations.lock().unwrap().push(json!({
            "id": id,
            "customerName": "Nour",
            "customerPhone": "+20122222222",
            "date": "2030-01-01",
            "startTime": "19:00",
            "endTime": "21:00",
            "partySize": 4,
            "tableNumber": 7,
            "status": status
        }));
        id
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("http://mock.local/api").with_retry(RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    })
}

fn meal_json(id: i64, title: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} of the house"),
        "price": price,
        "image": null,
        "category": "lunch",
        "isAvailable": true
    })
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// Body the backend returns for a successful delete
fn deleted(id: impl Into<Value>, what: &str) -> Response {
    ok(json!({ "id": id.into(), "message": format!("{what} deleted") }))
}

/// Shallow merge of a JSON patch into a stored row
fn merge(row: &mut Value, patch: Value) {
    if let (Some(row), Value::Object(patch)) = (row.as_object_mut(), patch) {
        row.extend(patch);
    }
}

fn paginate(rows: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u64 = params.get("limit").and_then(|p| p.parse().ok()).unwrap_or(10);
    let total = rows.len() as u64;
    let items: Vec<Value> = rows
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();
    json!({
        "items": items,
        "total": total,
        "page": page,
        "limit": limit,
        "totalPages": total.div_ceil(limit)
    })
}

fn text_matches(row: &Value, fields: &[&str], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    fields.iter().any(|f| {
        row[*f]
            .as_str()
            .is_some_and(|v| v.to_lowercase().contains(&needle))
    })
}

fn cart_json(items: &[Value]) -> Value {
    let subtotal: f64 = items.iter().filter_map(|i| i["lineTotal"].as_f64()).sum();
    let tax = (subtotal * 0.14 * 100.0).round() / 100.0;
    json!({
        "id": 1,
        "items": items,
        "subtotal": subtotal,
        "tax": tax,
        "total": subtotal + tax
    })
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    state.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    });

    {
        let mut fail_next = state.fail_next.lock().unwrap();
        if *fail_next > 0 {
            *fail_next -= 1;
            return fail(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable");
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/google", post(google_login))
        .route("/auth/me", get(me))
        .route("/branches", get(list_branches).post(create_branch))
        .route("/branches/{id}", get(get_branch).delete(delete_branch))
        .route("/branches/{id}/status", patch(set_branch_status))
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/{id}", get(get_meal).put(update_meal).delete(delete_meal))
        .route("/meals/{id}/availability", patch(set_meal_availability))
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_cart_item))
        .route("/cart/items/{id}", put(update_cart_item).delete(delete_cart_item))
        .route("/reservations", post(create_reservation))
        .route("/reservations/{id}", get(get_reservation))
        .route("/reservations/{id}/{action}", patch(reservation_action))
        .route("/analytics/summary", get(summary))
        .route("/analytics/breakdown", get(breakdown))
        .route("/analytics/dashboard", get(dashboard))
        .route("/payments/checkout-session", post(checkout))
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", put(update_tag).delete(delete_tag))
        .route("/pages", get(list_pages).post(create_page))
        .route("/pages/{slug}", get(get_page).put(update_page).delete(delete_page))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

// ── Auth ────────────────────────────────────────────────────────────

async fn google_login(Json(body): Json<Value>) -> Response {
    if body["credential"] != "google-id-token" {
        return fail(StatusCode::UNAUTHORIZED, "Invalid Google credential");
    }
    ok(json!({
        "token": "session-token",
        "user": { "id": 1, "name": "Salma", "email": "salma@example.com", "role": "admin" }
    }))
}

async fn me(headers: axum::http::HeaderMap) -> Response {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer session-token") => ok(json!({
            "id": 1, "name": "Salma", "email": "salma@example.com", "role": "admin"
        })),
        _ => fail(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

// ── Branches ────────────────────────────────────────────────────────

async fn list_branches(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let rows: Vec<Value> = state
        .branches
        .lock()
        .unwrap()
        .iter()
        .filter(|b| match params.get("search") {
            Some(needle) => text_matches(b, &["name", "city", "address"], needle),
            None => true,
        })
        .cloned()
        .collect();
    ok(paginate(rows, &params))
}

async fn create_branch(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut branch = body;
    branch["id"] = json!(state.next_id());
    if branch.get("isActive").is_none() {
        branch["isActive"] = json!(true);
    }
    state.branches.lock().unwrap().push(branch.clone());
    ok(branch)
}

async fn get_branch(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.branches.lock().unwrap().iter().find(|b| b["id"] == id) {
        Some(branch) => ok(branch.clone()),
        None => fail(StatusCode::NOT_FOUND, "Branch not found"),
    }
}

async fn delete_branch(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    state.branches.lock().unwrap().retain(|b| b["id"] != id);
    deleted(id, "Branch")
}

async fn set_branch_status(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut branches = state.branches.lock().unwrap();
    match branches.iter_mut().find(|b| b["id"] == id) {
        Some(branch) => {
            branch["isActive"] = body["isActive"].clone();
            ok(branch.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Branch not found"),
    }
}

// ── Meals ───────────────────────────────────────────────────────────

async fn list_meals(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let rows: Vec<Value> = state.meals.lock().unwrap().clone();
    ok(paginate(rows, &params))
}

async fn create_meal(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut meal = body;
    meal["id"] = json!(state.next_id());
    if meal.get("isAvailable").is_none() {
        meal["isAvailable"] = json!(true);
    }
    state.meals.lock().unwrap().push(meal.clone());
    ok(meal)
}

async fn get_meal(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.meals.lock().unwrap().iter().find(|m| m["id"] == id) {
        Some(meal) => ok(meal.clone()),
        None => fail(StatusCode::NOT_FOUND, "Meal not found"),
    }
}

async fn update_meal(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut meals = state.meals.lock().unwrap();
    match meals.iter_mut().find(|m| m["id"] == id) {
        Some(meal) => {
            merge(meal, body);
            ok(meal.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Meal not found"),
    }
}

async fn delete_meal(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    state.meals.lock().unwrap().retain(|m| m["id"] != id);
    deleted(id, "Meal")
}

async fn set_meal_availability(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut meals = state.meals.lock().unwrap();
    match meals.iter_mut().find(|m| m["id"] == id) {
        Some(meal) => {
            meal["isAvailable"] = body["isAvailable"].clone();
            ok(meal.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Meal not found"),
    }
}

// ── Tags ────────────────────────────────────────────────────────────

async fn list_tags(State(state): State<Shared>) -> Response {
    ok(Value::Array(state.tags.lock().unwrap().clone()))
}

async fn create_tag(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut tag = body;
    tag["id"] = json!(state.next_id());
    state.tags.lock().unwrap().push(tag.clone());
    ok(tag)
}

async fn update_tag(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut tags = state.tags.lock().unwrap();
    match tags.iter_mut().find(|t| t["id"] == id) {
        Some(tag) => {
            merge(tag, body);
            ok(tag.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Tag not found"),
    }
}

async fn delete_tag(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    state.tags.lock().unwrap().retain(|t| t["id"] != id);
    deleted(id, "Tag")
}

// ── Pages ───────────────────────────────────────────────────────────

async fn list_pages(State(state): State<Shared>) -> Response {
    ok(Value::Array(state.pages.lock().unwrap().clone()))
}

async fn create_page(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut pages = state.pages.lock().unwrap();
    if pages.iter().any(|p| p["slug"] == body["slug"]) {
        return fail(StatusCode::CONFLICT, "Slug already in use");
    }
    let mut page = body;
    page["id"] = json!(state.next_id());
    pages.push(page.clone());
    ok(page)
}

async fn get_page(State(state): State<Shared>, Path(slug): Path<String>) -> Response {
    match state.pages.lock().unwrap().iter().find(|p| p["slug"] == slug) {
        Some(page) => ok(page.clone()),
        None => fail(StatusCode::NOT_FOUND, "Page not found"),
    }
}

async fn update_page(
    State(state): State<Shared>,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut pages = state.pages.lock().unwrap();
    match pages.iter_mut().find(|p| p["slug"] == slug) {
        Some(page) => {
            merge(page, body);
            ok(page.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Page not found"),
    }
}

async fn delete_page(State(state): State<Shared>, Path(slug): Path<String>) -> Response {
    let mut pages = state.pages.lock().unwrap();
    let before = pages.len();
    pages.retain(|p| p["slug"] != slug);
    if pages.len() == before {
        return fail(StatusCode::NOT_FOUND, "Page not found");
    }
    deleted(slug, "Page")
}

// ── Cart ────────────────────────────────────────────────────────────

async fn get_cart(State(state): State<Shared>) -> Response {
    ok(cart_json(&state.cart_items.lock().unwrap()))
}

async fn clear_cart(State(state): State<Shared>) -> Response {
    state.cart_items.lock().unwrap().clear();
    ok(json!({ "message": "Cart cleared" }))
}

async fn add_cart_item(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let meal_id = body["mealId"].as_i64().unwrap_or_default();
    let quantity = body["quantity"].as_u64().unwrap_or_default();
    let Some(meal) = state
        .meals
        .lock()
        .unwrap()
        .iter()
        .find(|m| m["id"] == meal_id)
        .cloned()
    else {
        return fail(StatusCode::NOT_FOUND, "Meal not found");
    };

    let item_id = state.next_id();
    let price = meal["price"].as_f64().unwrap_or_default();
    let mut items = state.cart_items.lock().unwrap();
    items.push(json!({
        "id": item_id,
        "meal": meal,
        "quantity": quantity,
        "lineTotal": price * quantity as f64
    }));
    ok(cart_json(&items))
}

async fn update_cart_item(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let quantity = body["quantity"].as_u64().unwrap_or_default();
    if quantity == 0 {
        // A real backend would store the zero line; tests assert it never arrives
        return fail(StatusCode::BAD_REQUEST, "Quantity must be positive");
    }
    let mut items = state.cart_items.lock().unwrap();
    match items.iter_mut().find(|i| i["id"] == id) {
        Some(item) => {
            let price = item["meal"]["price"].as_f64().unwrap_or_default();
            item["quantity"] = json!(quantity);
            item["lineTotal"] = json!(price * quantity as f64);
        }
        None => return fail(StatusCode::NOT_FOUND, "Cart item not found"),
    }
    ok(cart_json(&items))
}

async fn delete_cart_item(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut items = state.cart_items.lock().unwrap();
    items.retain(|i| i["id"] != id);
    ok(cart_json(&items))
}

// ── Reservations ────────────────────────────────────────────────────

async fn create_reservation(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut reservation = body;
    reservation["id"] = json!(state.next_id());
    reservation["status"] = json!("pending");
    state.reservations.lock().unwrap().push(reservation.clone());
    ok(reservation)
}

async fn get_reservation(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state
        .reservations
        .lock()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
    {
        Some(reservation) => ok(reservation.clone()),
        None => fail(StatusCode::NOT_FOUND, "Reservation not found"),
    }
}

async fn reservation_action(
    State(state): State<Shared>,
    Path((id, action)): Path<(i64, String)>,
) -> Response {
    let status = match action.as_str() {
        "confirm" => "confirmed",
        "reject" => "rejected",
        "cancel" => "cancelled",
        "complete" => "completed",
        "no-show" => "no_show",
        _ => return fail(StatusCode::BAD_REQUEST, "Unknown action"),
    };
    let mut reservations = state.reservations.lock().unwrap();
    match reservations.iter_mut().find(|r| r["id"] == id) {
        Some(reservation) => {
            reservation["status"] = json!(status);
            ok(reservation.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Reservation not found"),
    }
}

// ── Analytics and payments ──────────────────────────────────────────

async fn summary(Query(params): Query<HashMap<String, String>>) -> Response {
    ok(json!({
        "from": params.get("from"),
        "to": params.get("to"),
        "revenue": 12500.0,
        "expenses": 8000.0,
        "profit": 4500.0,
        "orderCount": 310,
        "reservationCount": 42
    }))
}

async fn breakdown() -> Response {
    ok(json!([
        { "date": "2026-10-05", "revenue": 1000.0, "expenses": 600.0, "profit": 400.0 },
        { "date": "2026-10-06", "revenue": 1500.5, "expenses": 700.0, "profit": 800.5 },
        { "date": "2026-10-13", "revenue": 900.0, "expenses": 1000.0, "profit": -100.0 }
    ]))
}

async fn dashboard(State(state): State<Shared>) -> Response {
    let active = state
        .branches
        .lock()
        .unwrap()
        .iter()
        .filter(|b| b["isActive"] == true)
        .count();
    ok(json!({
        "todayReservations": 12,
        "pendingReservations": 3,
        "todayRevenue": 5400.0,
        "activeBranches": active
    }))
}

async fn checkout(Json(body): Json<Value>) -> Response {
    let cart_id = body["cartId"].as_i64().unwrap_or_default();
    ok(json!({
        "sessionId": format!("cs_test_{cart_id}"),
        "url": format!("https://checkout.example.com/pay/cs_test_{cart_id}")
    }))
}

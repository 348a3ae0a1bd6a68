//! Mock Ecotrack API server for testing
//!
//! An in-process HTTP server that behaves like the Ecotrack backend, so the
//! HTTP client and the controllers can be tested end to end without it.
//!
//! Routes and response shapes follow the real API:
//! - POST /api/users/register, POST /api/users/login
//! - GET /api/products/search?barcode=
//! - GET|POST /api/users/{id}/favorites, DELETE /api/users/{id}/favorites/{barcode}
//! - GET /api/emissions?year=&region=
//!
//! Seeded with user `ana` / `x` (id 1) who has Nutella as a favorite.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

use super::http::HttpResourceClient;
use crate::ports::ResourceClient;

/// Mock Ecotrack server for testing
pub struct MockApiServer {
    port: u16,
    running: Arc<AtomicBool>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour switches for the mock
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer every request with this status and raw body
    pub fixed_response: Option<(u16, String)>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    content_type: Option<String>,
}

struct MockUser {
    id: u64,
    username: String,
    email: String,
    password: String,
    favorites: Vec<String>,
}

struct MockState {
    users: Vec<MockUser>,
    products: HashMap<String, JsonValue>,
    emissions: Vec<(String, i64, f64)>,
}

impl MockState {
    fn seeded() -> Self {
        let mut products = HashMap::new();
        products.insert(
            "3017620422003".to_string(),
            json!({
                "id": 1,
                "barcode": "3017620422003",
                "name": "Nutella",
                "nutriscore": "e",
                "ecoscore": "d",
                "category": "Spreads"
            }),
        );
        products.insert(
            "8410188012092".to_string(),
            json!({
                "id": 2,
                "barcode": "8410188012092",
                "name": "Agua mineral",
                "nutriscore": "a",
                "ecoscore": null,
                "category": null
            }),
        );

        Self {
            users: vec![MockUser {
                id: 1,
                username: "ana".to_string(),
                email: "ana@example.com".to_string(),
                password: "x".to_string(),
                favorites: vec!["3017620422003".to_string()],
            }],
            products,
            emissions: vec![
                ("España".to_string(), 2021, 123.456),
                ("Francia".to_string(), 2020, 98.7),
            ],
        }
    }
}

struct ParsedRequest {
    method: String,
    path: String,
    query: HashMap<String, String>,
    content_type: Option<String>,
    body: JsonValue,
}

impl MockApiServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let recorded_clone = recorded.clone();
        let state = Arc::new(Mutex::new(MockState::seeded()));

        // Set listener to non-blocking for graceful shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state.clone();
                        let recorded = recorded_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &state, &recorded);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            recorded,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// HTTP resource client pointed at this server
    pub fn client(&self) -> Arc<dyn ResourceClient> {
        Arc::new(HttpResourceClient::new(&self.base_url()).unwrap())
    }

    /// Requests received so far, as `METHOD /path` without the query string
    pub fn requests(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    /// Content-Type header of the most recent request
    pub fn last_content_type(&self) -> Option<String> {
        self.recorded
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.content_type.clone())
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    state: &Mutex<MockState>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };

    recorded.lock().unwrap().push(RecordedRequest {
        method: request.method.clone(),
        path: request.path.clone(),
        content_type: request.content_type.clone(),
    });

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some((status, body)) = &config.fixed_response {
        send_response(&mut stream, *status, body);
        return;
    }

    let (status, body) = route(&request, &mut state.lock().unwrap());
    send_response(&mut stream, status, &body.to_string());
}

/// Read headers and a Content-Length delimited body
fn read_request(stream: &mut TcpStream) -> Option<ParsedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = find_header_end(&data) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let first_line = lines.next()?;
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "content-type" => content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }
    let body_end = data.len().min(body_start + content_length);
    let body = serde_json::from_slice(&data[body_start..body_end]).unwrap_or(JsonValue::Null);

    let target = parts[1];
    let (path, query_string) = target.split_once('?').unwrap_or((target, ""));
    let query = url::form_urlencoded::parse(query_string.as_bytes())
        .into_owned()
        .collect();

    Some(ParsedRequest {
        method: parts[0].to_string(),
        path: path.to_string(),
        query,
        content_type,
        body,
    })
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn body_str<'a>(body: &'a JsonValue, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

fn route(request: &ParsedRequest, state: &mut MockState) -> (u16, JsonValue) {
    let segments: Vec<&str> = request
        .path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", []) => (200, json!({"message": "Bienvenido al backend de Ecotrack."})),
        ("POST", ["api", "users", "register"]) => register(request, state),
        ("POST", ["api", "users", "login"]) => login(request, state),
        ("GET", ["api", "products", "search"]) => search_product(request, state),
        ("GET", ["api", "emissions"]) => emissions(request, state),
        ("GET", ["api", "users", user_id, "favorites"]) => list_favorites(user_id, state),
        ("POST", ["api", "users", user_id, "favorites"]) => {
            add_favorite(user_id, &request.body, state)
        }
        ("DELETE", ["api", "users", user_id, "favorites", barcode]) => {
            remove_favorite(user_id, barcode, state)
        }
        _ => (404, json!({"error": "Endpoint not found"})),
    }
}

fn register(request: &ParsedRequest, state: &mut MockState) -> (u16, JsonValue) {
    let (Some(username), Some(email), Some(password)) = (
        body_str(&request.body, "username"),
        body_str(&request.body, "email"),
        body_str(&request.body, "password"),
    ) else {
        return (
            400,
            json!({"error": "Se requieren nombre de usuario, email y contraseña."}),
        );
    };

    if state.users.iter().any(|u| u.username == username) {
        return (409, json!({"error": "El nombre de usuario ya existe."}));
    }
    if state.users.iter().any(|u| u.email == email) {
        return (409, json!({"error": "El email ya está registrado."}));
    }

    let id = state.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    state.users.push(MockUser {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        favorites: Vec::new(),
    });

    (
        201,
        json!({"message": "Usuario registrado exitosamente.", "user_id": id}),
    )
}

fn login(request: &ParsedRequest, state: &MockState) -> (u16, JsonValue) {
    let (Some(username), Some(password)) = (
        body_str(&request.body, "username"),
        body_str(&request.body, "password"),
    ) else {
        return (
            400,
            json!({"error": "Se requieren nombre de usuario y contraseña."}),
        );
    };

    match state
        .users
        .iter()
        .find(|u| u.username == username && u.password == password)
    {
        Some(user) => (
            200,
            json!({"message": "Inicio de sesión exitoso.", "user_id": user.id}),
        ),
        None => (
            401,
            json!({"error": "Nombre de usuario o contraseña incorrectos."}),
        ),
    }
}

fn search_product(request: &ParsedRequest, state: &MockState) -> (u16, JsonValue) {
    let Some(barcode) = request.query.get("barcode").filter(|b| !b.is_empty()) else {
        return (
            400,
            json!({"error": "Se requiere un código de barras para la búsqueda."}),
        );
    };

    match state.products.get(barcode) {
        Some(product) => (200, product.clone()),
        None => (
            404,
            json!({"message": format!("Producto con código de barras '{}' no encontrado.", barcode)}),
        ),
    }
}

fn emissions(request: &ParsedRequest, state: &MockState) -> (u16, JsonValue) {
    let (Some(region), Some(year)) = (request.query.get("region"), request.query.get("year"))
    else {
        return (
            400,
            json!({"error": "Se requieren los parámetros 'region' y 'year'."}),
        );
    };
    let Ok(year) = year.parse::<i64>() else {
        return (
            400,
            json!({"error": "El parámetro 'year' debe ser un número entero válido."}),
        );
    };

    match state
        .emissions
        .iter()
        .enumerate()
        .find(|(_, (r, y, _))| r == region && *y == year)
    {
        Some((idx, (r, y, total))) => (
            200,
            json!({"id": idx + 1, "region_name": r, "year": y, "total_co2_tonnes": total}),
        ),
        None => (
            404,
            json!({"message": format!(
                "No se encontraron datos de emisión para la región '{}' y el año '{}'.",
                region, year
            )}),
        ),
    }
}

fn find_user<'a>(user_id: &str, state: &'a mut MockState) -> Option<&'a mut MockUser> {
    let id: u64 = user_id.parse().ok()?;
    state.users.iter_mut().find(|u| u.id == id)
}

fn list_favorites(user_id: &str, state: &mut MockState) -> (u16, JsonValue) {
    let products = state.products.clone();
    let Some(user) = find_user(user_id, state) else {
        return (404, json!({"error": "Usuario no encontrado."}));
    };

    let list: Vec<JsonValue> = user
        .favorites
        .iter()
        .filter_map(|b| products.get(b).cloned())
        .collect();
    (200, JsonValue::Array(list))
}

fn add_favorite(user_id: &str, body: &JsonValue, state: &mut MockState) -> (u16, JsonValue) {
    let products = state.products.clone();
    let Some(user) = find_user(user_id, state) else {
        return (404, json!({"error": "Usuario no encontrado."}));
    };
    let Some(barcode) = body_str(body, "barcode") else {
        return (
            400,
            json!({"error": "Se requiere el código de barras del producto."}),
        );
    };
    let Some(product) = products.get(barcode) else {
        return (
            404,
            json!({"error": format!(
                "Producto con código de barras '{}' no encontrado en Open Food Facts.",
                barcode
            )}),
        );
    };

    if user.favorites.iter().any(|b| b == barcode) {
        return (200, json!({"message": "El producto ya está en favoritos."}));
    }
    user.favorites.push(barcode.to_string());
    (
        201,
        json!({"message": "Producto añadido a favoritos.", "product_id": product["id"]}),
    )
}

fn remove_favorite(user_id: &str, barcode: &str, state: &mut MockState) -> (u16, JsonValue) {
    let known_product = state.products.contains_key(barcode);
    let Some(user) = find_user(user_id, state) else {
        return (404, json!({"error": "Usuario no encontrado."}));
    };
    if !known_product {
        return (404, json!({"error": "Producto no encontrado."}));
    }

    let before = user.favorites.len();
    user.favorites.retain(|b| b != barcode);
    if user.favorites.len() == before {
        return (
            404,
            json!({"message": "El producto no está en favoritos de este usuario."}),
        );
    }
    (200, json!({"message": "Producto eliminado de favoritos."}))
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_login_route() {
        let mut state = MockState::seeded();
        let request = ParsedRequest {
            method: "POST".to_string(),
            path: "/api/users/login".to_string(),
            query: HashMap::new(),
            content_type: Some("application/json".to_string()),
            body: json!({"username": "ana", "password": "x"}),
        };
        let (status, body) = route(&request, &mut state);
        assert_eq!(status, 200);
        assert_eq!(body["user_id"], json!(1));
    }

    #[test]
    fn test_remove_then_remove_again() {
        let mut state = MockState::seeded();
        let (status, _) = remove_favorite("1", "3017620422003", &mut state);
        assert_eq!(status, 200);
        let (status, body) = remove_favorite("1", "3017620422003", &mut state);
        assert_eq!(status, 404);
        assert!(body.get("message").is_some());
    }
}

//! Ecotrack API client
//!
//! Implements the `ResourceClient` port over HTTP with reqwest. One request per
//! call: no retries, no caching and no timeout of its own (callers cancel
//! through the view's token when they want a deadline).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::ports::{ApiRequest, Method, ResourceClient};

/// Default API URL (the development server of the original deployment)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// HTTP implementation of the resource client
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: Client,
    base_url: Url,
}

impl HttpResourceClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        let parsed = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of a request, with path segments and query values encoded
    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Config("API base URL cannot carry a path".to_string()))?;
            segments.pop_if_empty();
            segments.extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn request(&self, request: ApiRequest) -> Result<JsonValue> {
        let url = self.url_for(&request)?;
        debug!(method = request.method.as_str(), path = %request.path(), "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(body) = &request.body {
            // Sets Content-Type: application/json
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::Network(format!("No se pudo leer la respuesta del servidor: {}", e))
        })?;

        if status.is_success() {
            debug!(status = status.as_u16(), path = %request.path(), "request succeeded");
            parse_success_body(&body)
        } else {
            let message =
                failure_message(&body, request.fallback_message.as_deref(), status.as_u16());
            warn!(
                status = status.as_u16(),
                path = %request.path(),
                error = %message,
                "request failed"
            );
            Err(Error::api(status.as_u16(), message))
        }
    }
}

/// Map transport errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    warn!(error = %error, "no response from server");
    if error.is_connect() {
        Error::Network("No se pudo conectar con el servidor de Ecotrack.".to_string())
    } else if error.is_timeout() {
        Error::Network("La conexión con el servidor superó el tiempo de espera.".to_string())
    } else {
        Error::Network(format!("Error de red: {}", error))
    }
}

/// Body of a 2xx response. An empty body is `null`.
fn parse_success_body(body: &str) -> Result<JsonValue> {
    if body.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| Error::parse(format!("Respuesta inesperada del servidor: {}", e)))
}

/// Human-readable message of a failed response
///
/// Looks at `error`, then `message`; falls back to the per-call message and
/// finally a generic one naming the status.
fn failure_message(body: &str, fallback: Option<&str>, status: u16) -> String {
    let parsed: Option<JsonValue> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("error")
        .or_else(|| field("message"))
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| format!("Error en la solicitud (HTTP {})", status))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock_api::{MockApiServer, MockConfig};
    use crate::domain::result::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_reject_empty_base_url() {
        let result = HttpResourceClient::new("  ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_reject_invalid_base_url() {
        assert!(HttpResourceClient::new("not a url").is_err());
        assert!(HttpResourceClient::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_url_encoding() {
        let client = HttpResourceClient::new("http://localhost:5000/").unwrap();
        let req = ApiRequest::get(["api", "emissions"])
            .query("year", "2021")
            .query("region", "España");
        let url = client.url_for(&req).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/emissions?year=2021&region=Espa%C3%B1a"
        );
    }

    #[test]
    fn test_url_keeps_base_path_and_encodes_segments() {
        let client = HttpResourceClient::new("http://example.com/eco").unwrap();
        let req = ApiRequest::delete(["api", "users", "42", "favorites", "12/34"]);
        let url = client.url_for(&req).unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/eco/api/users/42/favorites/12%2F34"
        );
    }

    #[test]
    fn test_failure_message_precedence() {
        assert_eq!(
            failure_message(r#"{"error": "a", "message": "b"}"#, Some("c"), 400),
            "a"
        );
        assert_eq!(failure_message(r#"{"message": "b"}"#, Some("c"), 404), "b");
        assert_eq!(failure_message(r#"{"error": ""}"#, Some("c"), 500), "c");
        assert_eq!(failure_message("<html>oops</html>", Some("c"), 502), "c");
        assert_eq!(
            failure_message("{}", None, 503),
            "Error en la solicitud (HTTP 503)"
        );
    }

    #[test]
    fn test_parse_success_body() {
        assert_eq!(parse_success_body("").unwrap(), JsonValue::Null);
        assert_eq!(parse_success_body(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        let err = parse_success_body("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_get_against_mock() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let value = client
            .request(ApiRequest::get(["api", "products", "search"]).query("barcode", "3017620422003"))
            .await
            .unwrap();

        assert_eq!(value["name"], "Nutella");
        assert_eq!(server.requests(), vec!["GET /api/products/search".to_string()]);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let value = client
            .request(
                ApiRequest::post(["api", "users", "login"])
                    .json(json!({"username": "ana", "password": "x"})),
            )
            .await
            .unwrap();

        assert_eq!(value["user_id"], json!(1));
        assert_eq!(server.last_content_type().as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_error_field_is_surfaced_verbatim() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let err = client
            .request(
                ApiRequest::post(["api", "users", "login"])
                    .json(json!({"username": "ana", "password": "wrong"})),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api { status: 401 });
        assert_eq!(err.to_string(), "Nombre de usuario o contraseña incorrectos.");
    }

    #[tokio::test]
    async fn test_message_field_used_when_no_error_field() {
        let server = MockApiServer::start(MockConfig::default()).unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let err = client
            .request(ApiRequest::get(["api", "products", "search"]).query("barcode", "000"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api { status: 404 });
        assert_eq!(
            err.to_string(),
            "Producto con código de barras '000' no encontrado."
        );
    }

    #[tokio::test]
    async fn test_non_json_failure_uses_fallback() {
        let server = MockApiServer::start(MockConfig {
            fixed_response: Some((500, "Internal Server Error".to_string())),
            ..Default::default()
        })
        .unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let err = client
            .request(ApiRequest::get(["api", "emissions"]).fallback("Error al obtener datos"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api { status: 500 });
        assert_eq!(err.to_string(), "Error al obtener datos");
    }

    #[tokio::test]
    async fn test_2xx_with_error_shape_is_still_success() {
        let server = MockApiServer::start(MockConfig {
            fixed_response: Some((200, r#"{"error": "ignored"}"#.to_string())),
            ..Default::default()
        })
        .unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let value = client.request(ApiRequest::get(["api"])).await.unwrap();
        assert_eq!(value["error"], "ignored");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let server = MockApiServer::start(MockConfig {
            fixed_response: Some((200, "{not json".to_string())),
            ..Default::default()
        })
        .unwrap();
        let client = HttpResourceClient::new(&server.base_url()).unwrap();

        let err = client.request(ApiRequest::get(["api"])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = HttpResourceClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();

        let err = client.request(ApiRequest::get(["api"])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}

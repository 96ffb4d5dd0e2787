use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use log::{debug, error, info, warn};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::error::AppError;
use crate::field::Field;
use crate::png_renderer::PngRenderer;
use crate::svg_renderer::SvgRenderer;

const CONTENT_TYPE_SVG: &str = "image/svg+xml";
const CONTENT_TYPE_PNG: &str = "image/png";
const CONTENT_TYPE_JSON: &str = "application/json";

/// An HTTP response before it is handed to tiny_http.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Reply {
            status: 200,
            content_type,
            body: body.into(),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Reply {
            status,
            content_type: CONTENT_TYPE_JSON,
            body: body.into_bytes(),
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let response = Response::from_data(self.body).with_status_code(self.status);
        match Header::from_bytes("Content-Type", self.content_type) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

/// Builds the reply for one request against the finished field.
pub fn route(method: &Method, url: &str, field: &Field) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/rect") => match SvgRenderer::render(field) {
            Ok(svg) => Reply::ok(CONTENT_TYPE_SVG, svg),
            Err(e) => {
                error!("svg render failed: {}", e);
                Reply::error(500, &format!("Render failed: {}", e))
            }
        },
        (Method::Get, "/rect.png") => match PngRenderer::render(field) {
            Ok(png) => Reply::ok(CONTENT_TYPE_PNG, png),
            Err(e) => {
                error!("png render failed: {}", e);
                Reply::error(500, &format!("Render failed: {}", e))
            }
        },
        (Method::Get, "/field") => match serde_json::to_vec(field) {
            Ok(json) => Reply::ok(CONTENT_TYPE_JSON, json),
            Err(e) => Reply::error(500, &format!("Serialization failed: {}", e)),
        },
        (Method::Get, "/health") => Reply::ok(CONTENT_TYPE_JSON, r#"{"status":"ok"}"#),
        _ => Reply::error(404, "Not found"),
    }
}

pub struct FieldServer {
    server: Arc<Server>,
    field: Arc<Field>,
}

impl FieldServer {
    pub fn bind(addr: SocketAddr, field: Field) -> Result<Self, AppError> {
        let server = Server::http(addr)
            .map_err(|e| AppError::Http(format!("Failed to bind {}: {}", addr, e)))?;
        Ok(FieldServer {
            server: Arc::new(server),
            field: Arc::new(field),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests on `workers` threads until the listener fails.
    pub fn run(self, workers: usize) -> Result<(), AppError> {
        match self.local_addr() {
            Some(addr) => info!("serving field on http://{} ({} workers)", addr, workers),
            None => info!("serving field ({} workers)", workers),
        }

        let handles: Vec<_> = (0..workers.max(1))
            .map(|id| {
                let server = Arc::clone(&self.server);
                let field = Arc::clone(&self.field);
                thread::Builder::new()
                    .name(format!("groupmap-worker-{}", id))
                    .spawn(move || worker_loop(&server, &field))
            })
            .collect::<Result<_, _>>()?;

        for handle in handles {
            if handle.join().is_err() {
                return Err(AppError::Http("worker thread panicked".to_string()));
            }
        }
        Ok(())
    }
}

fn worker_loop(server: &Server, field: &Field) {
    for request in server.incoming_requests() {
        respond(request, field);
    }
}

fn respond(request: Request, field: &Field) {
    let reply = route(request.method(), request.url(), field);
    debug!(
        "{} {} -> {} ({} bytes)",
        request.method(),
        request.url(),
        reply.status,
        reply.body.len()
    );
    if let Err(e) = request.respond(reply.into_response()) {
        warn!("failed to write response: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Color::{Green, Red};
    use crate::field::Coord;

    fn sample_field() -> Field {
        let mut field = Field::from_colors(&[vec![Red, Green], vec![Green, Green]]).unwrap();
        field.mark_group(&[Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]);
        field
    }

    #[test]
    fn test_rect_returns_svg() {
        let field = sample_field();
        let reply = route(&Method::Get, "/rect", &field);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "image/svg+xml");
        assert_eq!(reply.body, SvgRenderer::render(&field).unwrap().into_bytes());
    }

    #[test]
    fn test_rect_ignores_query() {
        let field = sample_field();
        let plain = route(&Method::Get, "/rect", &field);
        let with_query = route(&Method::Get, "/rect?size=big", &field);
        assert_eq!(plain, with_query);
    }

    #[test]
    fn test_png_route() {
        let reply = route(&Method::Get, "/rect.png", &sample_field());
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "image/png");
        assert!(reply.body.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_field_route_is_json() {
        let field = sample_field();
        let reply = route(&Method::Get, "/field", &field);
        assert_eq!(reply.content_type, "application/json");
        let decoded: Field = serde_json::from_slice(&reply.body).unwrap();
        assert_eq!(decoded, field);
    }

    #[test]
    fn test_unknown_route() {
        let field = sample_field();
        assert_eq!(route(&Method::Get, "/nope", &field).status, 404);
        assert_eq!(route(&Method::Post, "/rect", &field).status, 404);
    }

    #[test]
    fn test_health() {
        let reply = route(&Method::Get, "/health", &sample_field());
        assert_eq!(reply.body, br#"{"status":"ok"}"#.to_vec());
    }
}

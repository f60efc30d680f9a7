//! HTTP host for server-rendered pages.

use std::convert::Infallible;
use std::future::{Future, Ready, ready};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{Method, StatusCode, Uri};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use tracing::{debug, error, info, warn};
use vitrine_pages::DocumentTemplate;
use vitrine_urls::{Query, strip_base};

use crate::render::Renderer;

pub type HttpResponse = hyper::Response<Full<Bytes>>;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Turns request targets into assembled documents.
#[derive(Debug, Clone)]
pub struct ShopService {
	renderer: Arc<Renderer>,
	template: Arc<DocumentTemplate>,
}

impl ShopService {
	pub fn new(renderer: Arc<Renderer>, template: Arc<DocumentTemplate>) -> Self {
		Self { renderer, template }
	}

	/// Renders the page for `uri`.
	///
	/// The base path is stripped before routing. Unknown pages still answer
	/// `200` with the not-found document; only render faults give `500`.
	pub fn respond(&self, method: &Method, uri: &Uri) -> HttpResponse {
		if *method != Method::GET && *method != Method::HEAD {
			return plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
				.map(|mut response| {
					response.headers_mut().insert(ALLOW, http::HeaderValue::from_static("GET, HEAD"));
					response
				})
				.unwrap_or_else(fallback);
		}

		let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
		let url = strip_base(self.renderer.base(), target);
		let query: Query = match serde_urlencoded::from_str(uri.query().unwrap_or_default()) {
			Ok(query) => query,
			Err(err) => {
				warn!(target, error = %err, "malformed query string");
				return plain(StatusCode::BAD_REQUEST, "Bad Request").unwrap_or_else(fallback);
			}
		};

		match self.renderer.render(&url, &query) {
			Ok(output) => {
				let html = self.template.assemble(&output);
				debug!(url = %url, bytes = html.len(), "page served");
				hyper::Response::builder()
					.status(StatusCode::OK)
					.header(CONTENT_TYPE, HTML_CONTENT_TYPE)
					.body(Full::new(Bytes::from(html)))
					.unwrap_or_else(fallback)
			}
			Err(err) => {
				error!(url = %url, error = %err, "SSR error");
				plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").unwrap_or_else(fallback)
			}
		}
	}
}

fn plain(status: StatusCode, body: &'static str) -> http::Result<HttpResponse> {
	hyper::Response::builder()
		.status(status)
		.header(CONTENT_TYPE, "text/plain; charset=utf-8")
		.body(Full::new(Bytes::from_static(body.as_bytes())))
}

fn fallback(err: http::Error) -> HttpResponse {
	error!(error = %err, "failed to build response");
	let mut response = hyper::Response::new(Full::new(Bytes::new()));
	*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
	response
}

/// Service implementation for hyper
struct RequestService {
	service: Arc<ShopService>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = HttpResponse;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		debug!(remote = %self.remote_addr, method = %req.method(), uri = %req.uri(), "request");
		ready(Ok(self.service.respond(req.method(), req.uri())))
	}
}

/// A bound HTTP/1 listener serving a [`ShopService`].
pub struct ShopServer {
	listener: tokio::net::TcpListener,
	service: Arc<ShopService>,
}

impl ShopServer {
	pub async fn bind(addr: SocketAddr, service: ShopService) -> io::Result<Self> {
		let listener = tokio::net::TcpListener::bind(addr).await?;
		Ok(Self {
			listener,
			service: Arc::new(service),
		})
	}

	pub fn local_addr(&self) -> io::Result<SocketAddr> {
		self.listener.local_addr()
	}

	/// Serves connections until the process ends.
	pub async fn serve(self) -> io::Result<()> {
		self.serve_until(std::future::pending()).await
	}

	/// Serves connections until `shutdown` completes. Connections already
	/// accepted run to completion on their own tasks.
	pub async fn serve_until<F>(self, shutdown: F) -> io::Result<()>
	where
		F: Future<Output = ()>,
	{
		info!(addr = %self.local_addr()?, "server listening");
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				result = self.listener.accept() => {
					let (stream, remote_addr) = result?;
					let service = Arc::clone(&self.service);
					tokio::task::spawn(async move {
						let io = TokioIo::new(stream);
						let service = RequestService { service, remote_addr };
						if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
							debug!(remote = %remote_addr, error = %err, "connection closed with error");
						}
					});
				}
				_ = &mut shutdown => {
					info!("shutdown signal received, stopping server");
					break;
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Catalog, Product};
	use http_body_util::BodyExt;
	use rstest::{fixture, rstest};

	#[fixture]
	fn service() -> ShopService {
		let catalog = Catalog::new(vec![Product {
			product_id: "1".to_string(),
			title: "Desk lamp".to_string(),
			..Product::default()
		}]);
		let renderer = Renderer::new(Arc::new(catalog)).with_base("/shop/");
		let template = DocumentTemplate::new("<head><!--app-head--></head><body><!--app-html--></body>");
		ShopService::new(Arc::new(renderer), Arc::new(template))
	}

	async fn body_text(response: HttpResponse) -> String {
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_detail_under_base_path(service: ShopService) {
		// Act
		let response = service.respond(&Method::GET, &"/shop/product/1/".parse().unwrap());

		// Assert
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()[CONTENT_TYPE], HTML_CONTENT_TYPE);
		let html = body_text(response).await;
		assert!(html.contains("<title>Desk lamp - Shop</title>"));
		assert!(html.contains("window.__INITIAL_DATA__"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_page_is_not_found_document(service: ShopService) {
		// Act
		let response = service.respond(&Method::GET, &"/shop/elsewhere".parse().unwrap());

		// Assert
		assert_eq!(response.status(), StatusCode::OK);
		let html = body_text(response).await;
		assert!(html.contains("<title>404 - Not Found</title>"));
		assert!(!html.contains("__INITIAL_DATA__"));
	}

	#[rstest]
	fn test_other_methods_rejected(service: ShopService) {
		let response = service.respond(&Method::POST, &"/shop/".parse().unwrap());
		assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(response.headers()[ALLOW], "GET, HEAD");
	}
}

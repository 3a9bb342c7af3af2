pub mod client;
mod error;
pub mod health;
mod models;

pub use client::AnalysisClient;
pub use error::AnalysisError;
pub use health::HealthProber;
pub use models::{AnalysisRequest, AnalysisResponse, HealthStatus};

/// HTTP stub of the analysis service, for client tests.
#[cfg(test)]
pub(crate) mod stub {
    use std::sync::mpsc;
    use std::time::Duration;

    /// What the stub saw.
    #[derive(Debug)]
    pub struct RecordedRequest {
        pub method: String,
        pub url: String,
        pub body: String,
        pub content_type: Option<String>,
        pub cache_control: Option<String>,
    }

    pub struct StubService {
        pub base: String,
        requests: mpsc::Receiver<RecordedRequest>,
    }

    impl StubService {
        pub fn recorded(&self) -> RecordedRequest {
            self.requests
                .recv_timeout(Duration::from_secs(5))
                .expect("stub service saw no request")
        }
    }

    /// Answer exactly one request with `status` and `body`.
    pub fn serve_once(status: u16, body: &str) -> StubService {
        spawn(vec![(None, status, body.to_string())], Duration::ZERO)
    }

    /// Like [`serve_once`], but hold the response back for `delay`.
    pub fn serve_delayed(status: u16, body: &str, delay: Duration) -> StubService {
        spawn(vec![(None, status, body.to_string())], delay)
    }

    /// Answer one request per route, each matched on its URL path.
    /// Requests for any other path get a 404.
    pub fn serve_routes(routes: &[(&str, u16, &str)]) -> StubService {
        spawn(
            routes
                .iter()
                .map(|(path, status, body)| (Some(path.to_string()), *status, body.to_string()))
                .collect(),
            Duration::ZERO,
        )
    }

    fn spawn(routes: Vec<(Option<String>, u16, String)>, delay: Duration) -> StubService {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub service");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("stub service has an IP address");
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            for _ in 0..routes.len() {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let header = |name: &str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
                        .map(|h| h.value.as_str().to_string())
                };
                let content_type = header("Content-Type");
                let cache_control = header("Cache-Control");
                let mut sent = String::new();
                let _ = request.as_reader().read_to_string(&mut sent);
                let recorded = RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body: sent,
                    content_type,
                    cache_control,
                };

                let route = routes
                    .iter()
                    .find(|(path, _, _)| path.as_deref().map_or(true, |p| p == recorded.url));
                let response = match route {
                    Some((_, status, body)) => {
                        tiny_http::Response::from_string(body.clone()).with_status_code(*status)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                std::thread::sleep(delay);
                let _ = request.respond(response);
                let _ = tx.send(recorded);
            }
        });

        StubService {
            base: format!("http://{}", addr),
            requests: rx,
        }
    }

    /// A base URL nothing is listening on.
    pub fn refused_base() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        format!("http://{}", addr)
    }
}

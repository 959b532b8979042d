use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// One log line per request: method, path, status and latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    if status.is_server_error() {
        log::error!("{} {} -> {} ({:?})", method, path, status.as_u16(), started.elapsed());
    } else {
        log::info!("{} {} -> {} ({:?})", method, path, status.as_u16(), started.elapsed());
    }
    response
}

//! Request dispatch module
//!
//! Entry point for HTTP request processing: serve the target, map failures
//! to their status, write the access log line.

use crate::config::AppState;
use crate::handler::error::ServeError;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::header::{ACCEPT_ENCODING, REFERER, USER_AGENT};
use hyper::http::uri::PathAndQuery;
use hyper::{HeaderMap, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The method and body are ignored; every request is answered as a GET of
/// its target.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let target = req
        .uri()
        .path_and_query()
        .map_or("/", PathAndQuery::as_str);
    let accept_encoding = joined_header(req.headers(), ACCEPT_ENCODING);

    let (response, body_bytes) = match static_files::open_target(&state.root, target).await {
        Ok(served) => {
            let len = served.len;
            let response = http::build_file_response(
                http::file_body(served.file),
                served.content,
                http::accepts_gzip(accept_encoding.as_deref()),
            );
            (response, len)
        }
        Err(err) => {
            log_serve_error(target, &err);
            (http::build_status_response(err.status()), 0)
        }
    };

    if state.access_log {
        let mut entry = AccessLogEntry::new(remote_addr, req.method().as_str(), target);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes;
        entry.referer = header_str(req.headers(), REFERER).map(ToString::to_string);
        entry.user_agent = header_str(req.headers(), USER_AGENT).map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry);
    }

    Ok(response)
}

fn header_str(headers: &HeaderMap, name: hyper::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Every field of a repeatable header, joined with `", "`
fn joined_header(headers: &HeaderMap, name: hyper::header::HeaderName) -> Option<String> {
    let values: Vec<_> = headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn log_serve_error(target: &str, err: &ServeError) {
    match err {
        ServeError::Forbidden => logger::log_warning(&format!("Forbidden: {target}")),
        ServeError::NotFound => logger::log_debug(&format!("Not found: {target}")),
        ServeError::Io(e) => logger::log_error(&format!("Failed to open '{target}': {e}")),
    }
}

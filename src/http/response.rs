//! HTTP response building module
//!
//! Every response is either an empty-bodied status or a file streamed from
//! disk; both share one boxed body type.

use futures_util::TryStreamExt;
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Empty, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::header::{HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use std::io;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::mime::{ContentDescriptor, PRECOMPRESSED_CONTENT_TYPE};

/// Body of every response: empty, or a single-pass stream of file chunks
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

pub fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Stream `file` chunk by chunk; the file is never read whole
pub fn file_body(file: File) -> ResponseBody {
    let frames = ReaderStream::new(file).map_ok(Frame::data);
    StreamBody::new(frames).boxed_unsync()
}

/// Build a response with `status` and no headers or body
pub fn build_status_response(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(empty_body());
    *response.status_mut() = status;
    response
}

/// Build the 200 response for an opened file
///
/// A precompressed file sent to a gzip-capable client is declared as
/// `text/plain` with `Content-Encoding: gzip`. Otherwise the classified type
/// is sent, or no `Content-Type` at all. The bytes are never transformed.
pub fn build_file_response(
    body: ResponseBody,
    content: ContentDescriptor,
    accepts_gzip: bool,
) -> Response<ResponseBody> {
    let mut response = Response::new(body);
    let headers = response.headers_mut();

    if content.precompressed && accepts_gzip {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(PRECOMPRESSED_CONTENT_TYPE),
        );
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    } else if let Some(mime) = content.mime_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
    }

    response
}

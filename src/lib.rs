//! Static file server with path-traversal guarding and precompressed
//! (`.gz`) content negotiation.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

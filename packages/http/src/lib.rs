//! Static file serving with timestamp-based conditional caching.
//!
//! [`FileServer`] turns any shimfs source into an HTTP handler:
//! - `Last-Modified` is synthesized from each file's reported
//!   modification time
//! - `If-Modified-Since` requests at or after that time get
//!   `304 Not Modified` with no body
//! - filesystem errors map onto status codes without being reclassified
//!   along the way
//!
//! The crate works on in-process `http` request/response values; wiring
//! them to a socket is the embedding server's job.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use shimfs_http::FileServer;
//! use shimfs_memfs::MemFs;
//! use shimfs_modtime::with_mod_time;
//!
//! let assets = MemFs::builder().file("app.css", "body {}").build().unwrap();
//! let built_at = UNIX_EPOCH + Duration::from_secs(1_727_600_261);
//! let server = FileServer::new(with_mod_time(assets, built_at));
//!
//! let req = http::Request::builder().uri("/app.css").body(()).unwrap();
//! let resp = server.respond(&req).unwrap();
//! assert_eq!(resp.status(), http::StatusCode::OK);
//! assert!(resp.headers().contains_key(http::header::LAST_MODIFIED));
//! ```

mod error;
mod fmt;
mod server;

pub use error::Error;
pub use fmt::{format_http_date, parse_http_date, truncate_to_seconds};
pub use server::FileServer;

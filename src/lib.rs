//! # burphttp
//!
//! Raw HTTP transactions as editable data, for intercept-edit-replay work.
//!
//! ## Features
//! - Parse raw request text (as shown by an intercepting proxy) into an `HttpRequest`
//! - Edit method, path, headers, cookie, host, body and repeated query parameters
//! - Serialize back to raw text, or to a curl command
//! - Import a browser "Copy as cURL (bash)" command
//! - Replay through an optional proxy, TLS verification off
//! - Save the full response or just its body
//!
//! ## Layout
//! - `models` - header store, query params, request and response
//! - `curl` - curl import/export
//! - `network` - transport seam and the reqwest implementation
//! - `storage`, `config`, `logging` - file output, user settings, tracing setup
//!
//! ```no_run
//! use burphttp::HttpRequest;
//!
//! let mut req = HttpRequest::parse("GET /search?q=a HTTP/1.1\nHost: example.com\n\n")?;
//! req.add_param("q", vec!["a", "b"]);
//! req.set_proxy("http://127.0.0.1:8080");
//! let resp = req.send()?;
//! resp.save_response_body("out/body.html");
//! # Ok::<(), burphttp::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod curl;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, LogConfig};
pub use curl::{parse_curl, to_curl};
pub use error::{Error, Result};
pub use models::{ConnectionOptions, HeaderStore, HttpRequest, HttpResponse, ParamValue, QueryParams};
pub use network::{ReqwestTransport, Transport};

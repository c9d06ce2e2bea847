//! Request/response data model
//!
//! Both messages round-trip through the raw text form an intercepting proxy
//! shows: start line, `Name: Value` headers, blank line, body.

pub mod headers;
pub mod params;
pub mod request;
pub mod response;

pub use headers::HeaderStore;
pub use params::{ParamValue, QueryParams};
pub use request::{ConnectionOptions, HttpRequest};
pub use response::HttpResponse;

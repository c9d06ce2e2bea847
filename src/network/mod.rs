//! Network layer - request replay over a real HTTP client
//!
//! The model never talks to the network itself; it hands a request to a
//! `Transport` and gets back a populated `HttpResponse`.

pub mod client;

pub use client::{create_client, ReqwestTransport, Transport};

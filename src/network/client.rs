//! HTTP client wrapper - replays a request and captures the response

use std::time::{Duration, Instant};

use hyper::ext::ReasonPhrase;
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy};

use crate::error::{Error, Result};
use crate::models::{ConnectionOptions, HeaderStore, HttpRequest, HttpResponse};

/// Performs one request/response exchange
pub trait Transport {
    fn exchange(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest transport.
///
/// Certificate verification is always off so traffic can be routed through an
/// intercepting proxy. No timeout and no retries. Response header names arrive
/// lowercased (`content-length`), as the HTTP stack normalizes them; the reason
/// phrase is the one the server sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransport;

/// Create an HTTP client for the given connection options
pub fn create_client(options: &ConnectionOptions) -> Result<Client> {
    let builder = Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(None::<Duration>);
    let builder = match &options.proxy {
        Some(proxy) => builder.proxy(Proxy::all(proxy)?),
        None => builder.no_proxy(),
    };
    Ok(builder.build()?)
}

/// Collapse a header map to one value per name, joining repeats with ", "
fn collect_headers(map: &HeaderMap) -> HeaderStore {
    let mut headers = HeaderStore::new();
    for name in map.keys() {
        let joined = map
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        headers.set(name.as_str(), joined);
    }
    headers
}

/// Reason phrase from the status line, or the canonical one when the server
/// sent the standard phrase (hyper only records non-canonical phrases)
fn reason_phrase(resp: &Response) -> String {
    match resp.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => resp.status().canonical_reason().unwrap_or("").to_string(),
    }
}

impl Transport for ReqwestTransport {
    fn exchange(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::InvalidMethod(request.method.clone()))?;
        let url = request.full_url();
        let client = create_client(&request.options)?;

        let mut req_builder = client.request(method, &url);
        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name, value);
        }
        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body.clone());
        }

        tracing::info!(method = %request.method, url = %url, proxy = ?request.options.proxy, "Executing request");
        let start = Instant::now();
        let resp = req_builder.send()?;

        let status = resp.status();
        let reason = reason_phrase(&resp);
        let headers = collect_headers(resp.headers());
        let body = resp.text()?;
        tracing::info!(
            status = status.as_u16(),
            time_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            status_reason: reason,
            headers,
            body,
        })
    }
}

impl HttpRequest {
    /// Send with the default blocking transport
    pub fn send(&self) -> Result<HttpResponse> {
        self.send_with(&ReqwestTransport)
    }

    pub fn send_with<T: Transport + ?Sized>(&self, transport: &T) -> Result<HttpResponse> {
        transport.exchange(self)
    }
}

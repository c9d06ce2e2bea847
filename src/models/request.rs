//! Editable raw HTTP request and its text form
//!
//! The text form is newline delimited: a `METHOD TARGET PROTOCOL` request line,
//! `Name: Value` header lines, then a blank line and the body.

use serde::{Deserialize, Serialize};

use crate::constants::{ACCEPT_ENCODING, COOKIE, DEFAULT_SCHEME, HOST};
use crate::error::{Error, Result};
use crate::models::headers::HeaderStore;
use crate::models::params::{ParamValue, QueryParams};

/// Per-request connection settings handed to the transport
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Proxy for both http and https traffic, e.g. `http://127.0.0.1:8080`
    #[serde(default)]
    pub proxy: Option<String>,
}

/// A single HTTP request.
///
/// Once a request has been parsed from text, `path` holds no query string:
/// the query lives in `params` and is rebuilt on serialization, so a round
/// trip keeps values but not necessarily the original bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub headers: HeaderStore,
    /// Empty means no body
    pub body: String,
    params: QueryParams,
    pub options: ConnectionOptions,
}

/// Split raw text at the first blank line into (head, body)
fn split_head_body(text: &str) -> (&str, &str) {
    let lf = text.find("\n\n").map(|i| (i, 2));
    let crlf = text.find("\r\n\r\n").map(|i| (i, 4));
    let split = match (lf, crlf) {
        (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
        (a, b) => a.or(b),
    };
    match split {
        Some((index, len)) => (&text[..index], &text[index + len..]),
        None => (text, ""),
    }
}

/// Strip any `?query` suffix
fn without_query(target: &str) -> &str {
    target.split_once('?').map_or(target, |(base, _)| base)
}

impl HttpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw request text into a new request
    pub fn parse(text: &str) -> Result<Self> {
        let (head, body) = split_head_body(text);
        let mut lines = head.lines();

        let request_line = lines.next().unwrap_or("").trim();
        let parts: Vec<&str> = request_line.split(' ').collect();
        let &[method, target, protocol] = parts.as_slice() else {
            return Err(Error::MalformedRequestLine(request_line.to_string()));
        };

        let (path, params) = match target.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (target, QueryParams::new()),
        };

        let mut headers = HeaderStore::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::MalformedHeaderLine(line.to_string()))?;
            headers.set(name.trim(), value.trim());
        }

        tracing::debug!(method, path, headers = headers.len(), "Parsed raw request");

        Ok(HttpRequest {
            method: method.to_string(),
            path: path.to_string(),
            protocol: protocol.to_string(),
            headers,
            body: body.to_string(),
            params,
            options: ConnectionOptions::default(),
        })
    }

    /// Replace every field except the connection options with those parsed
    /// from `text`. On error the request is left untouched.
    pub fn parse_request(&mut self, text: &str) -> Result<()> {
        let parsed = HttpRequest::parse(text)?;
        let options = std::mem::take(&mut self.options);
        *self = HttpRequest { options, ..parsed };
        Ok(())
    }

    /// Request target as written on the request line: `path` plus the query
    /// rebuilt from `params`
    pub fn target(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", without_query(&self.path), self.params.to_query_string())
        }
    }

    /// Serialize to raw request text.
    ///
    /// The output always contains the blank line separating headers from the
    /// body, even when the body is empty.
    pub fn to_raw(&self) -> String {
        let mut raw = format!("{} {} {}", self.method, self.target(), self.protocol);
        for (name, value) in self.headers.iter() {
            raw.push('\n');
            raw.push_str(name);
            raw.push_str(": ");
            raw.push_str(value);
        }
        raw.push_str("\n\n");
        raw.push_str(&self.body);
        raw
    }

    /// Absolute URL for the transport.
    ///
    /// A relative path is prefixed with `http://` and the `Host` header; the
    /// scheme is never inferred from the protocol label. When `params` is
    /// non-empty it replaces any query already on the path.
    pub fn full_url(&self) -> String {
        let base = if self.path.starts_with(DEFAULT_SCHEME) {
            self.path.clone()
        } else {
            let host = self.headers.get(HOST).unwrap_or("");
            format!("{}://{}{}", DEFAULT_SCHEME, host, self.path)
        };

        if self.params.is_empty() {
            base
        } else {
            format!("{}?{}", without_query(&base), self.params.to_query_string())
        }
    }

    /// Replace all query parameters
    pub fn set_params<I, K, V>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.params = params.into_iter().collect();
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Set `key` to `value`, discarding any values it had
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key, value);
    }

    /// Proxy used for both http and https. An empty string leaves the current
    /// setting alone.
    pub fn set_proxy(&mut self, proxy_url: &str) {
        if !proxy_url.is_empty() {
            self.options.proxy = Some(proxy_url.to_string());
        }
    }

    pub fn set_host(&mut self, host: &str) {
        self.headers.remove(HOST);
        self.headers.set(HOST, host);
    }

    /// Overwrite the `Cookie` header with `cookie`, e.g. `"a=1; b=2"`
    pub fn set_cookie(&mut self, cookie: &str) {
        self.headers.set(COOKIE, cookie.trim_matches('\n'));
    }

    /// Drop `Accept-Encoding` so the server answers uncompressed
    pub fn remove_accept_encoding(&mut self) {
        self.headers.remove(ACCEPT_ENCODING);
    }
}

impl std::str::FromStr for HttpRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HttpRequest::parse(s)
    }
}

impl std::fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_raw())
    }
}

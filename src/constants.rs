//! Protocol labels, header names and other fixed strings.

/// Protocol label written by the curl importer and used for response status lines
pub const HTTP_1_1: &str = "HTTP/1.1";

pub const HOST: &str = "Host";
pub const COOKIE: &str = "Cookie";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";

/// Content type assumed for a curl body when the command sets none
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Scheme used when the request path is relative
pub const DEFAULT_SCHEME: &str = "http";

/// Directory under the home directory holding `config.yaml`
pub const CONFIG_DIR: &str = ".burphttp";
pub const CONFIG_FILE: &str = "config.yaml";

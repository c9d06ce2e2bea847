//! "Copy as cURL (bash)" import and export
//!
//! The command is tokenized with shell quoting rules first (single, double and
//! `$'...'` quotes, backslash escapes, line continuations), then flags are
//! matched by position. Precedence follows what browsers emit:
//!
//! - the first positional `http(s)://` token (or `--url`) is the target;
//! - `-X` sets the method, otherwise a body implies `POST` and `GET` is the default;
//! - bodies rank, whatever their order on the line: `--data '...'` (also `-d`,
//!   `--data-ascii`), then `--data-raw '...'` (also `--data-binary`), then an
//!   unquoted `--data {...}`, then an unquoted `--data-raw {...}`; the unquoted
//!   `{...}` forms are taken exactly as typed;
//! - a body without a `Content-Type` header gets `application/x-www-form-urlencoded`.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::OnceLock;

use regex::Regex;

use crate::constants::{CONTENT_TYPE, COOKIE, FORM_URLENCODED, HOST, HTTP_1_1};
use crate::error::{Error, Result};
use crate::models::{HeaderStore, HttpRequest};

/// Flags whose value is consumed but not translated
const IGNORED_WITH_VALUE: &[&str] = &[
    "-u", "--user", "-o", "--output", "-m", "--max-time", "--connect-timeout",
    "-w", "--write-out", "--cacert", "--cert", "--key", "-F", "--form",
    "-T", "--upload-file", "-r", "--range", "--resolve", "--data-urlencode",
];

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://\S+$").unwrap())
}

fn method_pattern() -> &'static Regex {
    static METHOD: OnceLock<Regex> = OnceLock::new();
    METHOD.get_or_init(|| Regex::new(r"^[A-Za-z]+$").unwrap())
}

/// Flags pulled out of a tokenized curl command
#[derive(Debug, Default)]
struct CurlCommand {
    url: Option<String>,
    method: Option<String>,
    headers: Vec<(String, String)>,
    data: Option<String>,
    data_raw: Option<String>,
    data_json: Option<String>,
    data_raw_json: Option<String>,
    proxy: Option<String>,
}

impl CurlCommand {
    fn body(&self) -> Option<&str> {
        self.data
            .as_deref()
            .or(self.data_raw.as_deref())
            .or(self.data_json.as_deref())
            .or(self.data_raw_json.as_deref())
    }
}

/// Translate a curl command into a new request
pub fn parse_curl(input: &str) -> Result<HttpRequest> {
    let mut request = HttpRequest::new();
    request.apply_curl(input)?;
    Ok(request)
}

impl HttpRequest {
    pub fn from_curl(input: &str) -> Result<Self> {
        parse_curl(input)
    }

    /// Replace this request with the one described by a curl command and
    /// return its raw text.
    ///
    /// `path` is set to the complete URL, including any query string; `params`
    /// is cleared. A `-x` proxy replaces the current one, otherwise the
    /// connection options are kept. On error the request is left untouched.
    pub fn apply_curl(&mut self, input: &str) -> Result<String> {
        let command = parse_tokens(&tokenize(input)?)?;
        let url = command.url.clone().ok_or(Error::MissingUrl)?;

        let mut headers = HeaderStore::new();
        headers.set(HOST, netloc(&url));
        for (name, value) in &command.headers {
            headers.set(name.as_str(), value.as_str());
        }

        let body = command.body().map(str::to_string);
        let method = match (&command.method, &body) {
            (Some(method), _) => method.clone(),
            (None, Some(_)) => "POST".to_string(),
            (None, None) => "GET".to_string(),
        };
        if body.is_some() && !headers.contains(CONTENT_TYPE) {
            headers.set(CONTENT_TYPE, FORM_URLENCODED);
        }

        let mut request = HttpRequest::new();
        request.method = method;
        request.path = url;
        // Label only; https targets are sent over whatever the transport negotiates
        request.protocol = HTTP_1_1.to_string();
        request.headers = headers;
        request.body = body.unwrap_or_default();
        request.options = std::mem::take(&mut self.options);
        if command.proxy.is_some() {
            request.options.proxy = command.proxy;
        }
        *self = request;

        tracing::debug!(method = %self.method, url = %self.path, headers = self.headers.len(), "Imported curl command");
        Ok(self.to_raw())
    }

    /// Export as a single-quoted bash curl command
    pub fn to_curl(&self) -> String {
        to_curl(self)
    }
}

/// Network location of a URL: everything between `://` and the path
fn netloc(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

fn parse_tokens(tokens: &[Token]) -> Result<CurlCommand> {
    let mut command = CurlCommand::default();
    let mut i = 0;

    // Skip 'curl' command if present
    if tokens.first().map(|t| t.text.as_str()) == Some("curl") {
        i = 1;
    }

    while i < tokens.len() {
        // --flag=value
        let word = tokens[i].text.as_str();
        let (flag, inline_value) = match word.split_once('=') {
            Some((flag, value)) if word.starts_with("--") => {
                (flag, Some(Token::quoted(value.to_string())))
            }
            _ => (word, None),
        };
        let takes_value = matches!(
            flag,
            "-X" | "--request" | "-H" | "--header" | "-d" | "--data" | "--data-ascii"
                | "--data-raw" | "--data-binary" | "-b" | "--cookie" | "-A" | "--user-agent"
                | "-e" | "--referer" | "-x" | "--proxy" | "--url"
        ) || IGNORED_WITH_VALUE.contains(&flag);

        let value = if !takes_value {
            None
        } else if inline_value.is_some() {
            inline_value
        } else {
            i += 1;
            tokens.get(i).cloned()
        };

        match (flag, value) {
            ("-X" | "--request", Some(Token { text: method, .. })) => {
                if !method_pattern().is_match(&method) {
                    return Err(Error::InvalidMethod(method));
                }
                command.method = Some(method.to_uppercase());
            }
            ("-H" | "--header", Some(Token { text: header, .. })) => {
                if let Some((name, value)) = header.split_once(':') {
                    command.headers.push((name.trim().to_string(), value.trim().to_string()));
                }
            }
            ("-d" | "--data" | "--data-ascii", Some(Token { text, bare_json })) => {
                let slot = if bare_json { &mut command.data_json } else { &mut command.data };
                slot.get_or_insert(text);
            }
            ("--data-raw" | "--data-binary", Some(Token { text, bare_json })) => {
                let slot = if bare_json {
                    &mut command.data_raw_json
                } else {
                    &mut command.data_raw
                };
                slot.get_or_insert(text);
            }
            ("-b" | "--cookie", Some(Token { text: cookie, .. })) => {
                command.headers.push((COOKIE.to_string(), cookie));
            }
            ("-A" | "--user-agent", Some(Token { text: agent, .. })) => {
                command.headers.push(("User-Agent".to_string(), agent));
            }
            ("-e" | "--referer", Some(Token { text: referer, .. })) => {
                command.headers.push(("Referer".to_string(), referer));
            }
            ("-x" | "--proxy", Some(Token { text: proxy, .. })) => command.proxy = Some(proxy),
            ("--url", Some(Token { text: url, .. })) => {
                command.url.get_or_insert(url);
            }
            (token, None) if !takes_value && !token.starts_with('-') => {
                if command.url.is_none() && url_pattern().is_match(token) {
                    command.url = Some(token.to_string());
                }
            }
            // Unknown flags (--compressed, -k, -sSL, ...) and dangling flags
            _ => {}
        }
        i += 1;
    }

    Ok(command)
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
    AnsiC,
}

/// One shell word. `bare_json` marks a word typed as an unquoted `{...}`, whose
/// text is kept exactly as written instead of going through quote removal.
#[derive(Clone, Debug, Default)]
struct Token {
    text: String,
    bare_json: bool,
}

impl Token {
    fn quoted(text: String) -> Self {
        Token { text, bare_json: false }
    }
}

/// Consume a newline (LF or CRLF) directly after a backslash
fn eat_newline(chars: &mut Peekable<Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    match ahead.next() {
        Some('\n') => {}
        Some('\r') if ahead.next() == Some('\n') => {}
        _ => return false,
    }
    *chars = ahead;
    true
}

/// Tokenize a curl command, respecting quotes
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' if eat_newline(&mut chars) => {}
                '\\' => match chars.peek() {
                    Some(&next @ ('"' | '\\' | '$' | '`')) => {
                        chars.next();
                        current.push(next);
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::AnsiC => match c {
                '\'' => quote = Quote::None,
                '\\' => push_ansi_escape(&mut chars, &mut current),
                _ => current.push(c),
            },
            Quote::None => match c {
                // Line continuation
                '\\' if eat_newline(&mut chars) => {}
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_token = true;
                }
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '$' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    quote = Quote::AnsiC;
                    in_token = true;
                }
                '{' if !in_token => {
                    let mut text = String::from('{');
                    while let Some(&next) = chars.peek() {
                        if next.is_whitespace() {
                            break;
                        }
                        text.push(next);
                        chars.next();
                    }
                    tokens.push(Token { text, bare_json: true });
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(Token::quoted(std::mem::take(&mut current)));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err(Error::UnterminatedQuote);
    }
    if in_token {
        tokens.push(Token::quoted(current));
    }

    Ok(tokens)
}

/// Decode one backslash escape inside `$'...'`
fn push_ansi_escape(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    match chars.next() {
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('t') => out.push('\t'),
        Some(c @ ('\\' | '\'' | '"' | '?')) => out.push(c),
        Some(marker @ 'x') => push_hex_escape(chars, out, marker, 2),
        Some(marker @ 'u') => push_hex_escape(chars, out, marker, 4),
        Some(other) => {
            out.push('\\');
            out.push(other);
        }
        None => out.push('\\'),
    }
}

fn push_hex_escape(chars: &mut Peekable<Chars<'_>>, out: &mut String, marker: char, max: usize) {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
        Some(decoded) => out.push(decoded),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Format request as cURL command
pub fn to_curl(request: &HttpRequest) -> String {
    let mut parts = vec!["curl".to_string()];

    // Method, unless curl would pick the same one on its own
    let implied = if request.body.is_empty() { "GET" } else { "POST" };
    if !request.method.is_empty() && request.method != implied {
        parts.push(format!("-X {}", request.method));
    }

    parts.push(shell_quote(&request.full_url()));

    for (name, value) in request.headers.iter() {
        parts.push(format!("-H {}", shell_quote(&format!("{}: {}", name, value))));
    }

    if let Some(proxy) = &request.options.proxy {
        parts.push(format!("-x {}", shell_quote(proxy)));
    }

    if !request.body.is_empty() {
        parts.push(format!("--data-raw {}", shell_quote(&request.body)));
    }

    parts.join(" \\\n  ")
}

use burphttp::{Error, HttpRequest, HttpResponse, ParamValue};

const SAMPLES: &[&str] = &[
    "GET / HTTP/1.1\nHost: example.com",
    "GET /search?q=rust+lang&page=2 HTTP/1.1\nHost: example.com\nAccept: */*\n\n",
    "POST /api/v2/users?tag=a&tag=b&tag=c HTTP/2\nHost: api.example.com\nContent-Type: application/json\n\n{\"name\": \"admin\",\n \"role\": \"root\"}",
    "PUT /upload HTTP/1.1\r\nHost: files.example.com\r\nContent-Length: 5\r\n\r\nhello",
    "OPTIONS * HTTP/1.1\nHost: example.com\nOrigin: https://a.example\nAccess-Control-Request-Method: DELETE\n\n",
];

#[test]
fn serialize_then_parse_keeps_values() {
    for sample in SAMPLES {
        let parsed = HttpRequest::parse(sample).unwrap();
        let reparsed = HttpRequest::parse(&parsed.to_raw()).unwrap();
        assert_eq!(reparsed.method, parsed.method, "{sample}");
        assert_eq!(reparsed.path, parsed.path, "{sample}");
        assert_eq!(reparsed.protocol, parsed.protocol, "{sample}");
        assert_eq!(reparsed.headers, parsed.headers, "{sample}");
        assert_eq!(reparsed.body, parsed.body, "{sample}");
        assert_eq!(reparsed.params(), parsed.params(), "{sample}");
    }
}

#[test]
fn serialized_text_always_has_header_body_boundary() {
    for sample in SAMPLES {
        let parsed = HttpRequest::parse(sample).unwrap();
        let raw = parsed.to_raw();
        let (head, body) = raw.split_once("\n\n").unwrap();
        assert!(!head.is_empty());
        assert_eq!(body, parsed.body);
    }
}

#[test]
fn query_is_rebuilt_not_copied() {
    let req = HttpRequest::parse("GET /p?b=%7e&a=1 HTTP/1.1\nHost: h").unwrap();
    assert_eq!(req.path, "/p");
    let raw = req.to_raw();
    assert!(raw.starts_with("GET /p?"));
    let line = raw.lines().next().unwrap();
    let query = line.split(' ').nth(1).unwrap().split_once('?').unwrap().1;
    let mut pairs: Vec<&str> = query.split('&').collect();
    pairs.sort();
    assert_eq!(pairs, ["a=1", "b=%7E"]);
}

#[test]
fn multi_valued_params_keep_their_order() {
    let mut req = HttpRequest::parse("GET /list HTTP/1.1\nHost: example.com").unwrap();
    req.set_params([
        ("a", ParamValue::from(vec!["1".to_string(), "2".to_string()])),
        ("b", ParamValue::from("x")),
    ]);
    let url = req.full_url();
    let (base, query) = url.split_once('?').unwrap();
    assert_eq!(base, "http://example.com/list");
    let pairs: Vec<&str> = query.split('&').collect();
    assert_eq!(pairs.len(), 3);
    assert!(pairs.contains(&"b=x"));
    let a_values: Vec<&str> = pairs.iter().copied().filter(|p| p.starts_with("a=")).collect();
    assert_eq!(a_values, ["a=1", "a=2"]);
}

#[test]
fn add_param_scalar_and_list() {
    let mut req = HttpRequest::new();
    req.add_param("k", "v");
    assert_eq!(req.params().get("k").unwrap(), ["v"]);
    req.add_param("k", vec!["x", "y"]);
    assert_eq!(req.params().get("k").unwrap(), ["x", "y"]);
}

#[test]
fn edits_show_up_in_raw_text() {
    let mut req = HttpRequest::parse(
        "GET /account HTTP/1.1\nHost: old.example\nCookie: sid=1\nAccept-Encoding: gzip, br",
    )
    .unwrap();
    req.set_host("new.example");
    req.set_cookie("sid=2; admin=true\n");
    req.remove_accept_encoding();
    req.body = "x=1".to_string();
    req.method = "POST".to_string();
    assert_eq!(
        req.to_raw(),
        "POST /account HTTP/1.1\nCookie: sid=2; admin=true\nHost: new.example\n\nx=1"
    );
}

#[test]
fn parse_errors_are_typed() {
    assert!(matches!(
        HttpRequest::parse(""),
        Err(Error::MalformedRequestLine(_))
    ));
    assert!(matches!(
        HttpRequest::parse("GET / HTTP/1.1 extra"),
        Err(Error::MalformedRequestLine(_))
    ));
    assert!(matches!(
        HttpRequest::parse("GET / HTTP/1.1\nHost example.com"),
        Err(Error::MalformedHeaderLine(_))
    ));
    // A missing colon after the blank line is body, not a header
    assert!(HttpRequest::parse("GET / HTTP/1.1\n\nno colon here").is_ok());
}

#[test]
fn response_raw_text_with_empty_body() {
    let resp = HttpResponse {
        status_code: 200,
        status_reason: "OK".to_string(),
        headers: [("Content-Length", "0")].into_iter().collect(),
        body: String::new(),
    };
    assert_eq!(resp.to_raw(), "HTTP/1.1 200 OK\nContent-Length: 0\n\n");
    assert_eq!(resp.to_string(), resp.to_raw());
}

// src/server/routes.rs
//
// Routing as a pure function of (context, request) so it is testable without
// sockets. `server::mod` adapts tiny_http requests to this and back.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::store;

const INDEX_HTML: &str = include_str!("../../web/index.html");

const JSON: &str = "application/json";
const HTML: &str = "text/html; charset=utf-8";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Options,
    Other,
}

#[derive(Clone, Copy, Debug)]
pub struct Request<'a> {
    pub method: Method,
    /// Raw request target, query string included.
    pub url: &'a str,
}

/// What a handler needs to answer; borrowed from `ServeOptions`.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    pub data_file: &'a Path,
    /// Roster keys in page order, for `/cast`.
    pub cast: &'a [String],
    pub service_name: &'a str,
    pub cache_max_age: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    fn new(status: u16) -> Self {
        Self { status, headers: Vec::new(), body: Vec::new() }
    }

    fn json(status: u16, value: serde_json::Value) -> Self {
        Self::new(status)
            .header("Content-Type", JSON)
            .body(value.to_string().into_bytes())
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    // Allow any website (the Netlify page included) to call this API
    fn with_cors(self) -> Self {
        self.header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Path without query string and trailing slashes ("/" becomes "").
pub fn clean_path(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/')
}

pub fn handle(ctx: &Context<'_>, req: &Request<'_>) -> Reply {
    let reply = match req.method {
        Method::Options => Reply::new(200),
        Method::Get => get(ctx, clean_path(req.url)),
        Method::Other => Reply::json(405, json!({ "error": "method not allowed" })),
    };
    reply.with_cors()
}

fn get(ctx: &Context<'_>, path: &str) -> Reply {
    match path {
        "" | "/health" => health(ctx),
        "/data" => data(ctx),
        "/cast" => Reply::json(200, json!({ "cast": ctx.cast })),
        "/index.html" => Reply::new(200)
            .header("Content-Type", HTML)
            .body(INDEX_HTML.as_bytes().to_vec()),
        _ => Reply::json(404, json!({ "error": "not found" })),
    }
}

fn health(ctx: &Context<'_>) -> Reply {
    Reply::json(
        200,
        json!({
            "status": "ok",
            "service": ctx.service_name,
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }),
    )
}

fn data(ctx: &Context<'_>) -> Reply {
    let d = store::load_or_default(ctx.data_file);
    match serde_json::to_vec(&d) {
        Ok(body) => {
            logf!("/data served: ep {}, {} eliminated", d.episode, d.eliminated.len());
            Reply::new(200)
                .header("Content-Type", JSON)
                .header("Cache-Control", format!("public, max-age={}", ctx.cache_max_age))
                .body(body)
        }
        Err(e) => {
            loge!("/data: encode failed: {e}");
            Reply::json(500, json!({ "error": "internal error" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PoolData, ScrapeStatus};

    const CAST: &[String] = &[];

    fn ctx(path: &Path) -> Context<'_> {
        Context { data_file: path, cast: CAST, service_name: "Test Pool API", cache_max_age: 3600 }
    }

    fn get_req(url: &str) -> Request<'_> {
        Request { method: Method::Get, url }
    }

    fn body_json(r: &Reply) -> serde_json::Value {
        serde_json::from_slice(&r.body).unwrap()
    }

    #[test]
    fn clean_path_variants() {
        assert_eq!(clean_path("/"), "");
        assert_eq!(clean_path("/data/"), "/data");
        assert_eq!(clean_path("/data?cb=123"), "/data");
        assert_eq!(clean_path("/health/?x=1"), "/health");
    }

    #[test]
    fn health_on_root_and_health() {
        let dir = tempfile::tempdir().unwrap();
        let c = ctx(dir.path());
        for url in ["", "/", "/health", "/health/"] {
            let r = handle(&c, &get_req(url));
            assert_eq!(r.status, 200, "{url}");
            let v = body_json(&r);
            assert_eq!(v["status"], "ok");
            assert_eq!(v["service"], "Test Pool API");
            assert!(v["time"].as_str().unwrap().ends_with("+00:00"));
        }
    }

    #[test]
    fn data_serves_file_with_cache_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("survivor_data.json");
        let d = PoolData {
            episode: 2,
            eliminated: strings!["Jenna"],
            scrape_status: ScrapeStatus::Ok,
            ..Default::default()
        };
        store::save(&p, &d).unwrap();

        let r = handle(&ctx(&p), &get_req("/data?t=1"));
        assert_eq!(r.status, 200);
        assert_eq!(r.header_value("content-type"), Some(JSON));
        assert_eq!(r.header_value("Cache-Control"), Some("public, max-age=3600"));
        let back: PoolData = serde_json::from_slice(&r.body).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn data_without_file_is_the_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let r = handle(&ctx(&dir.path().join("missing.json")), &get_req("/data"));
        let v = body_json(&r);
        assert_eq!(v["scrape_status"], "no_data");
        assert_eq!(v["episode"], 0);
    }

    #[test]
    fn unknown_path_404_and_cors_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let c = ctx(dir.path());
        let r = handle(&c, &get_req("/nope"));
        assert_eq!(r.status, 404);
        assert_eq!(body_json(&r)["error"], "not found");
        assert_eq!(r.header_value("Access-Control-Allow-Origin"), Some("*"));

        let r = handle(&c, &Request { method: Method::Options, url: "/data" });
        assert_eq!(r.status, 200);
        assert!(r.body.is_empty());
        assert_eq!(r.header_value("Access-Control-Allow-Methods"), Some("GET, OPTIONS"));

        let r = handle(&c, &Request { method: Method::Other, url: "/data" });
        assert_eq!(r.status, 405);
    }

    #[test]
    fn cast_lists_roster_keys() {
        let dir = tempfile::tempdir().unwrap();
        let keys = strings!["Jeff", "Q"];
        let c = Context { cast: &keys, ..ctx(dir.path()) };
        let r = handle(&c, &get_req("/cast/"));
        assert_eq!(r.status, 200);
        assert_eq!(body_json(&r), json!({ "cast": ["Jeff", "Q"] }));
    }

    #[test]
    fn index_page_is_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let r = handle(&ctx(dir.path()), &get_req("/index.html"));
        assert_eq!(r.status, 200);
        assert!(String::from_utf8_lossy(&r.body).contains("/data"));
    }
}

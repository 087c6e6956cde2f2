// src/core/net.rs
//
// HTTPS GET for the wiki. Blocking on purpose: one request per run, called
// from the CLI, a server startup hook or a GUI worker thread.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

pub fn client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub fn http_get(url: &str, timeout: Duration) -> Result<String> {
    let resp = client(timeout)?.get(url).send()?.error_for_status()?;
    let body = resp.text()?;
    logd!("GET {url} -> {} bytes", body.len());
    Ok(body)
}

// src/server/mod.rs
//
// Minimal HTTP API over tiny_http. A few worker threads share one listener;
// every request re-reads the data file, so a cron-written update shows up on
// the next hit without any signalling.

pub mod routes;

use std::{
    net::SocketAddr,
    sync::{mpsc, Arc},
    thread::{self, JoinHandle},
    time::Duration,
};

use tiny_http::{Header, Response};

use crate::config::options::AppOptions;
use crate::error::{Error, Result};
use crate::progress::LogProgress;
use crate::scrape;

use routes::{Context, Method, Reply, Request};

pub struct Server {
    http: Arc<tiny_http::Server>,
    opts: Arc<AppOptions>,
    /// Lives as long as the server; dropping it stops the refresher.
    refresher: Option<Refresher>,
}

impl Server {
    pub fn bind(opts: AppOptions) -> Result<Self> {
        let addr = opts.server.bind_addr();
        let http = tiny_http::Server::http(&addr)
            .map_err(|e| Error::Server(format!("bind {addr}: {e}")))?;
        Ok(Self { http: Arc::new(http), opts: Arc::new(opts), refresher: None })
    }

    /// Actual bound address (useful with port 0).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    /// Serve until the process is killed.
    pub fn run(mut self) -> Result<()> {
        let workers = self.opts.server.workers.max(1);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(workers);

        for i in 0..workers {
            let http = Arc::clone(&self.http);
            let opts = Arc::clone(&self.opts);
            let handle = thread::Builder::new()
                .name(format!("http-{i}"))
                .spawn(move || worker_loop(&http, &opts))
                .map_err(|e| Error::Server(format!("spawn worker: {e}")))?;
            handles.push(handle);
        }

        for h in handles {
            if h.join().is_err() {
                loge!("HTTP worker panicked");
            }
        }
        if let Some(r) = self.refresher.take() {
            r.shutdown();
        }
        Ok(())
    }
}

fn worker_loop(http: &tiny_http::Server, opts: &AppOptions) {
    let cast: Vec<String> = opts.roster().keys().map(String::from).collect();
    let ctx = Context {
        data_file: &opts.scrape.data_file,
        cast: &cast,
        service_name: &opts.server.service_name,
        cache_max_age: opts.server.cache_max_age,
    };

    for rq in http.incoming_requests() {
        let method = match rq.method() {
            tiny_http::Method::Get => Method::Get,
            tiny_http::Method::Options => Method::Options,
            _ => Method::Other,
        };
        let reply = routes::handle(&ctx, &Request { method, url: rq.url() });
        respond(rq, reply);
    }
}

fn respond(rq: tiny_http::Request, reply: Reply) {
    let mut resp = Response::from_data(reply.body).with_status_code(reply.status);
    for (name, value) in &reply.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(h) => resp.add_header(h),
            Err(()) => logw!("Dropping invalid header {name}"),
        }
    }
    if let Err(e) = rq.respond(resp) {
        logd!("Client went away: {e}");
    }
}

/// Bind, optionally scrape once, optionally start the refresher. The returned
/// server is ready for `run`.
pub fn start(opts: AppOptions) -> Result<Server> {
    let mut server = Server::bind(opts.clone())?;
    let port = server.local_addr().map_or(opts.server.port, |a| a.port());
    logf!("{} running on port {port}", opts.server.service_name);
    logf!("Data file: {}", opts.scrape.data_file.display());

    // Run the scraper once on startup to ensure data is fresh
    if opts.server.initial_scrape {
        logf!("Running initial scrape on startup...");
        let mut prog = LogProgress::default();
        if let Err(e) = scrape::run(&opts, Some(&mut prog)) {
            logw!("Startup scrape failed (non-fatal): {e}");
        }
    }

    let hours = opts.server.refresh_hours;
    if hours > 0 {
        logf!("Refresher: re-scraping every {hours}h");
        server.refresher = Refresher::spawn(opts, Duration::from_secs(hours.saturating_mul(3600)));
    }
    Ok(server)
}

/// `start`, then serve until the process is killed.
pub fn serve(opts: AppOptions) -> Result<()> {
    start(opts)?.run()
}

/// Background re-scrape every `period`. Off by default; the platform cron is
/// the normal trigger.
struct Refresher {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Refresher {
    fn spawn(opts: AppOptions, period: Duration) -> Option<Self> {
        let (stop, rx) = mpsc::channel::<()>();
        let spawned = thread::Builder::new().name(s!("refresher")).spawn(move || {
            // A message or a dropped sender both mean stop
            while let Err(mpsc::RecvTimeoutError::Timeout) = rx.recv_timeout(period) {
                let mut prog = LogProgress::default();
                if let Err(e) = scrape::run(&opts, Some(&mut prog)) {
                    loge!("Refresher: scrape failed: {e}");
                }
            }
            logd!("Refresher: stopped");
        });
        match spawned {
            Ok(handle) => Some(Self { stop, handle }),
            Err(e) => {
                loge!("Refresher: could not start: {e}");
                None
            }
        }
    }

    /// Stop and wait for an in-flight scrape to finish.
    fn shutdown(self) {
        drop(self.stop);
        if self.handle.join().is_err() {
            loge!("Refresher panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScrapeStatus;
    use crate::store;
    use std::fs;
    use std::time::Instant;

    #[test]
    fn refresher_rewrites_the_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        fs::write(&page, "<title>Survivor 50</title><p>Episode 6</p>").unwrap();

        let mut opts = AppOptions::default();
        opts.scrape.data_file = dir.path().join("survivor_data.json");
        opts.scrape.html_file = Some(page);

        let refresher = Refresher::spawn(opts.clone(), Duration::from_millis(20)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let data = loop {
            if let Ok(Some(d)) = store::load(&opts.scrape.data_file) {
                break d;
            }
            assert!(Instant::now() < deadline, "refresher never wrote the file");
            thread::sleep(Duration::from_millis(10));
        };
        refresher.shutdown();

        assert_eq!(data.episode, 6);
        assert_eq!(data.scrape_status, ScrapeStatus::Ok);
    }
}

// tests/config_options.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use survivor_pool::config::options::AppOptions;
use survivor_pool::Error;

#[test]
fn toml_overrides_defaults_and_cast() {
    let text = r#"
        [scrape]
        season = 51
        wiki_url = "https://survivor.fandom.com/wiki/Survivor_51"
        data_file = "/var/data/pool.json"

        [server]
        port = 9000
        refresh_hours = 24

        [[cast]]
        key = "Jeff"
        aliases = ["Jeff Probst"]

        [[cast]]
        key = "Q"
    "#;
    let opts = AppOptions::from_toml_str(text, Path::new("pool.toml")).unwrap();

    assert_eq!(opts.scrape.season, 51);
    assert_eq!(opts.scrape.data_file, PathBuf::from("/var/data/pool.json"));
    assert_eq!(opts.scrape.episode_cap, 26);
    assert_eq!(opts.server.port, 9000);
    assert_eq!(opts.server.refresh_hours, 24);
    assert!(opts.server.initial_scrape);

    let roster = opts.roster();
    assert_eq!(roster.keys().collect::<Vec<_>>(), vec!["Jeff", "Q"]);
    assert_eq!(roster.normalize("jeff probst"), Some("Jeff"));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = AppOptions::from_toml_str("[server]\nprot = 1\n", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, Error::Config { ref path, .. } if path == Path::new("bad.toml")));
}

#[test]
fn env_wins_over_file() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("PORT", "10000"),
        ("SURVIVOR_DATA_FILE", "/srv/survivor_data.json"),
        ("SURVIVOR_MANUAL_OVERRIDE", "yes"),
    ]);
    let mut opts = AppOptions::from_toml_str("[server]\nport = 9000\n", Path::new("x.toml")).unwrap();
    opts.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();

    assert_eq!(opts.server.port, 10000);
    assert_eq!(opts.scrape.data_file, PathBuf::from("/srv/survivor_data.json"));
    assert!(opts.scrape.use_manual_override);
    assert_eq!(opts.server.bind_addr(), "0.0.0.0:10000");
}

#[test]
fn bad_env_values_are_errors() {
    let mut opts = AppOptions::default();
    let err = opts.apply_env(|k| (k == "PORT").then(|| "eighty".to_string())).unwrap_err();
    assert!(matches!(err, Error::Env { key: "PORT", ref value } if value == "eighty"));

    let err = opts
        .apply_env(|k| (k == "SURVIVOR_MANUAL_OVERRIDE").then(|| "maybe".to_string()))
        .unwrap_err();
    assert!(matches!(err, Error::Env { key: "SURVIVOR_MANUAL_OVERRIDE", .. }));
}

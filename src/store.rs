// src/store.rs
//
// The JSON flat file. One writer at a time (cron or the server's startup
// scrape); readers only ever see a complete file thanks to temp + rename.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::data::PoolData;
use crate::error::{Error, Result};

/// `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> Result<Option<PoolData>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    let data = serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
    Ok(Some(data))
}

/// Whatever is on disk, or the "no data" document if that is missing or broken.
pub fn load_or_default(path: &Path) -> PoolData {
    match load(path) {
        Ok(Some(d)) => d,
        Ok(None) => PoolData::default(),
        Err(e) => {
            logw!("Store: {e}; serving defaults");
            PoolData::default()
        }
    }
}

pub fn save(path: &Path, data: &PoolData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    let mut text = data.to_json_pretty().map_err(|e| Error::json(path, e))?;
    text.push('\n');

    let tmp = tmp_path(path);
    fs::write(&tmp, text).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScrapeStatus;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn corrupt_file_errors_but_defaults_for_readers() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("survivor_data.json");
        fs::write(&p, "{ not json").unwrap();
        assert!(matches!(load(&p), Err(Error::Json { .. })));
        assert_eq!(load_or_default(&p), PoolData::default());
    }

    #[test]
    fn save_creates_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nested/deeper/survivor_data.json");
        let data = PoolData {
            episode: 3,
            eliminated: strings!["Jenna"],
            scrape_status: ScrapeStatus::Ok,
            ..Default::default()
        };
        save(&p, &data).unwrap();

        let text = fs::read_to_string(&p).unwrap();
        assert!(text.contains("\n  \"episode\": 3,"), "2-space pretty JSON: {text}");
        assert!(!tmp_path(&p).exists());
        assert_eq!(load(&p).unwrap(), Some(data));
    }
}

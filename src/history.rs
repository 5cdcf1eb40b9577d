//! Last visited line per file, kept between sessions.
//!
//! The store is a flat TOML table mapping absolute paths to 1-based line
//! numbers. It is read once at start-up and rewritten on save and on quit.
//! A store that is missing or can't be parsed is treated as empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Store {
    #[serde(default)]
    locations: BTreeMap<String, usize>,
}

#[derive(Debug, Default)]
pub struct LocationHistory {
    /// Where the store is written. `None` keeps it in memory only.
    path: Option<PathBuf>,
    locations: BTreeMap<String, usize>,
}

impl LocationHistory {
    /// `<cache dir>/favicon/locations.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("favicon").join("locations.toml"))
    }

    /// A history that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Reads the store at `path`, starting empty if that fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let locations = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Store>(&content) {
                Ok(store) => store.locations,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring corrupt location history");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read location history");
                BTreeMap::new()
            }
        };
        debug!(entries = locations.len(), "location history loaded");
        Self {
            path: Some(path),
            locations,
        }
    }

    pub fn get(&self, file: &Path) -> Option<usize> {
        self.locations.get(&key(file)).copied()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Remembers `line` for `file` and writes the store.
    pub fn record(&mut self, file: &Path, line: usize) -> Result<()> {
        self.locations.insert(key(file), line);
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let store = Store {
            locations: self.locations.clone(),
        };
        let content = toml::to_string(&store)?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "location history saved");
        Ok(())
    }
}

fn key(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ElementSetError;
use super::parsing::parse_multi_tle;
use super::{ElementSet, ElementSetProvider};

/// Offline provider reading every `.tle`/`.txt` file in a directory.
/// Files are read on each fetch, so edits are picked up without a restart.
pub struct TleDirectory {
    tle_dir: PathBuf,
}

impl TleDirectory {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self { tle_dir }
    }

    fn find(&self, catalog_id: u32) -> Result<ElementSet, ElementSetError> {
        if !self.tle_dir.is_dir() {
            return Err(ElementSetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("TLE directory not found: {}", self.tle_dir.display()),
            )));
        }

        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            if !is_tle_file(&path) {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Failed to read TLE file {}: {}", path.display(), e);
                    continue;
                }
            };

            for (name, line1, line2) in parse_multi_tle(&content) {
                match ElementSet::from_lines(name, &line1, &line2) {
                    Ok(set) if set.catalog_id == catalog_id => return Ok(set),
                    Ok(_) => {}
                    Err(e) => log::warn!("Skipping bad record in {}: {}", path.display(), e),
                }
            }
        }

        Err(ElementSetError::NotFound(catalog_id))
    }
}

fn is_tle_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext == "tle" || ext == "txt")
            .unwrap_or(false)
}

#[async_trait]
impl ElementSetProvider for TleDirectory {
    async fn fetch(&self, catalog_id: u32) -> Result<ElementSet, ElementSetError> {
        self.find(catalog_id)
    }
}

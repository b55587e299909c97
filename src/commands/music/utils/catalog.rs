//! The track catalog: every playable file in the configured songs directory.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::music_manager::{MusicError, MusicResult};

/// A playable file, named after its file stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub path: PathBuf,
}

/// Read-only view over a flat directory of audio files sharing one extension
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    dir: PathBuf,
    extension: String,
}

impl TrackCatalog {
    /// Open the catalog, failing if the directory is missing or unreadable.
    pub fn open(dir: impl Into<PathBuf>, extension: impl Into<String>) -> MusicResult<Self> {
        let dir = dir.into();
        let extension = extension.into().trim_start_matches('.').to_string();

        if !dir.is_dir() {
            return Err(MusicError::ConfigError(format!(
                "Track directory {} does not exist",
                dir.display()
            )));
        }

        std::fs::read_dir(&dir).map_err(|e| {
            MusicError::ConfigError(format!(
                "Track directory {} is not readable: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self { dir, extension })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of every available track, sorted by file name
    pub fn list_available(&self) -> MusicResult<Vec<String>> {
        Ok(self
            .list_available_paths()?
            .into_iter()
            .map(|track| track.name)
            .collect())
    }

    /// Every available track with its full location, sorted by file name
    pub fn list_available_paths(&self) -> MusicResult<Vec<Track>> {
        let mut tracks = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(MusicError::CatalogError(e.to_string()));
                }
                Err(e) => {
                    warn!("Skipping unreadable catalog entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(track) = self.track_for(entry.path()) {
                tracks.push(track);
            }
        }

        debug!("Catalog scan found {} tracks in {:?}", tracks.len(), self.dir);
        Ok(tracks)
    }

    /// Look a track up by name. A missing file is `None`, not an error.
    pub fn resolve(&self, name: &str) -> Option<Track> {
        if !is_plain_name(name) {
            return None;
        }

        let path = self.dir.join(format!("{}.{}", name, self.extension));
        path.is_file().then(|| Track {
            name: name.to_string(),
            path,
        })
    }

    fn track_for(&self, path: &Path) -> Option<Track> {
        if path.extension()?.to_str()? != self.extension {
            return None;
        }
        let name = path.file_stem()?.to_str()?.to_string();

        Some(Track {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// A single file-name component; rejects separators, `.` and `..`
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

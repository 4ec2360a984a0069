use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::collector::{CollectorError, FrenCollector};
use super::domain::{Account, Snapshot, SnapshotKey};

/// Read-only access to weekly snapshots, so trend reconstruction can run
/// against the filesystem or an in-memory fake.
pub trait SnapshotReader {
    /// Return the snapshot for `key`, or `None` when there is no usable data
    /// for that week. Never creates anything.
    fn get(&self, key: SnapshotKey) -> Result<Option<Snapshot>, SnapshotError>;
}

/// Outcome of reading a snapshot file from disk.
#[derive(Debug)]
pub enum SnapshotLoad {
    Loaded(Snapshot),
    Missing,
    /// A file exists but does not match the current account schema, e.g. an
    /// older capture that predates a field.
    SchemaMismatch { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to encode snapshot for {key}: {source}")]
    Encode {
        key: SnapshotKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot for {0} was created by another writer")]
    AlreadyExists(SnapshotKey),
    #[error(transparent)]
    Collector(#[from] CollectorError),
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    frens: &'a [Account],
}

#[derive(Deserialize)]
struct SnapshotFile {
    frens: Vec<Account>,
}

/// Flat-file store holding one `frens_<week>_<year>.json` per week.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Parse the file for `key`, reporting schema drift as a normal outcome.
    pub fn load(&self, key: SnapshotKey) -> Result<SnapshotLoad, SnapshotError> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(SnapshotLoad::Missing),
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        match serde_json::from_reader::<_, SnapshotFile>(BufReader::new(file)) {
            Ok(parsed) => Ok(SnapshotLoad::Loaded(Snapshot {
                key,
                frens: parsed.frens,
            })),
            Err(err) if err.is_io() => Err(SnapshotError::Io {
                path,
                source: err.into(),
            }),
            Err(err) => Ok(SnapshotLoad::SchemaMismatch {
                reason: err.to_string(),
            }),
        }
    }

    /// Return the week's snapshot, collecting and persisting it on first use.
    pub fn get_or_create<C>(
        &self,
        key: SnapshotKey,
        collector: &C,
    ) -> Result<Snapshot, SnapshotError>
    where
        C: FrenCollector + ?Sized,
    {
        let outdated = match self.load(key)? {
            SnapshotLoad::Loaded(snapshot) => return Ok(snapshot),
            SnapshotLoad::Missing => false,
            SnapshotLoad::SchemaMismatch { reason } => {
                warn!(%key, %reason, "snapshot does not match current schema, recollecting");
                true
            }
        };

        info!(%key, "creating fren snapshot from collector");
        let frens = collector.collect()?;
        // The outdated file stays in place until there is something to replace it.
        if outdated {
            let stale = self.set_aside(key)?;
            info!(%key, stale = %stale.display(), "outdated snapshot set aside");
        }
        self.persist(key, &frens)?;
        info!(%key, frens = frens.len(), "fren snapshot persisted");

        Ok(Snapshot { key, frens })
    }

    fn persist(&self, key: SnapshotKey, frens: &[Account]) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.root).map_err(|source| SnapshotError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(SnapshotError::AlreadyExists(key))
            }
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &SnapshotFileRef { frens })
            .map_err(|source| SnapshotError::Encode { key, source })?;
        writer
            .flush()
            .map_err(|source| SnapshotError::Io { path, source })
    }

    /// Move the file for `key` to the first free `.stale`, `.stale.1`, ...
    /// name so earlier set-aside captures are never replaced.
    fn set_aside(&self, key: SnapshotKey) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(key);
        let mut attempt = 0u32;
        let stale = loop {
            let mut candidate = path.clone().into_os_string();
            candidate.push(".stale");
            if attempt > 0 {
                candidate.push(format!(".{attempt}"));
            }
            let candidate = PathBuf::from(candidate);
            match candidate.try_exists() {
                Ok(false) => break candidate,
                Ok(true) => attempt += 1,
                Err(source) => {
                    return Err(SnapshotError::Io {
                        path: candidate,
                        source,
                    })
                }
            }
        };

        fs::rename(&path, &stale).map_err(|source| SnapshotError::Io { path, source })?;
        Ok(stale)
    }
}

impl SnapshotReader for FileSnapshotStore {
    fn get(&self, key: SnapshotKey) -> Result<Option<Snapshot>, SnapshotError> {
        match self.load(key)? {
            SnapshotLoad::Loaded(snapshot) => Ok(Some(snapshot)),
            SnapshotLoad::Missing => Ok(None),
            SnapshotLoad::SchemaMismatch { reason } => {
                warn!(%key, %reason, "ignoring snapshot with outdated schema");
                Ok(None)
            }
        }
    }
}

impl<T: SnapshotReader + ?Sized> SnapshotReader for &T {
    fn get(&self, key: SnapshotKey) -> Result<Option<Snapshot>, SnapshotError> {
        (**self).get(key)
    }
}

//! JSON-file adapter for the progress repository: one document per learner.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::domain::{CertificateBook, CertificateRecord, LearnerId};
use super::repository::{LearnerRecord, ProgressRepository, RepositoryError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LearnerDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    record: Option<LearnerRecord>,
    #[serde(default)]
    certificates: CertificateBook,
}

/// Stores each learner as `<dir>/<learner_id>.json`, replacing files atomically on write.
pub struct JsonFileProgressRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProgressRepository {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| unavailable(&dir, err))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &LearnerId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }

    fn load(&self, id: &LearnerId) -> Result<LearnerDocument, RepositoryError> {
        let path = self.path_for(id);
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                RepositoryError::Unavailable(format!("corrupt learner file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(LearnerDocument::default()),
            Err(err) => Err(unavailable(&path, err)),
        }
    }

    fn save(&self, id: &LearnerId, document: &LearnerDocument) -> Result<(), RepositoryError> {
        let path = self.path_for(id);
        let staging = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        let mut file = fs::File::create(&staging).map_err(|err| unavailable(&staging, err))?;
        file.write_all(&bytes)
            .and_then(|_| file.sync_all())
            .map_err(|err| unavailable(&staging, err))?;
        fs::rename(&staging, &path).map_err(|err| unavailable(&path, err))
    }

    /// Serialize read-modify-write cycles within this process.
    fn modify<T>(
        &self,
        id: &LearnerId,
        change: impl FnOnce(&mut LearnerDocument) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))?;
        let mut document = self.load(id)?;
        let outcome = change(&mut document)?;
        self.save(id, &document)?;
        Ok(outcome)
    }
}

fn unavailable(path: &Path, err: io::Error) -> RepositoryError {
    RepositoryError::Unavailable(format!("{}: {err}", path.display()))
}

impl ProgressRepository for JsonFileProgressRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let id = record.learner_id.clone();
        self.modify(&id, |document| {
            if document.record.is_some() {
                return Err(RepositoryError::Conflict);
            }
            document.record = Some(record.clone());
            Ok(record)
        })
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        let id = record.learner_id.clone();
        self.modify(&id, |document| match document.record.as_mut() {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        Ok(self.load(id)?.record)
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        self.modify(id, |document| {
            document
                .record
                .take()
                .map(|_| ())
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        Ok(self.load(id)?.certificates)
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        self.modify(id, |document| Ok(document.certificates.issue(record)))
    }
}

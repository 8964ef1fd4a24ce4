//! JSON file repository for the advisor registry.
//!
//! The registry lives in a single pretty-printed JSON document holding the
//! ordered advisor list. Every save rewrites the whole document.

mod models;

pub use models::{AdvisorRecord, RegistryDocument};

use crate::advisor::{
    domain::Advisor,
    ports::{AdvisorRepository, AdvisorRepositoryError, AdvisorRepositoryResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

/// Default registry file name inside the data directory.
pub const REGISTRY_FILE_NAME: &str = "advisors.json";

/// Advisor repository persisted as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileAdvisorRepository {
    dir: Arc<Dir>,
    file_name: String,
}

impl JsonFileAdvisorRepository {
    /// Opens the repository rooted at `root`, creating the directory when
    /// needed. The registry is stored as [`REGISTRY_FILE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRepositoryError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(root: &Utf8Path) -> AdvisorRepositoryResult<Self> {
        Self::open_with_file_name(root, REGISTRY_FILE_NAME)
    }

    /// Opens the repository with a custom registry file name.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorRepositoryError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open_with_file_name(
        root: &Utf8Path,
        file_name: impl Into<String>,
    ) -> AdvisorRepositoryResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(AdvisorRepositoryError::persistence)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(AdvisorRepositoryError::persistence)?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> AdvisorRepositoryResult<T>
    where
        F: FnOnce(&Dir, &str) -> AdvisorRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(AdvisorRepositoryError::persistence)?
    }
}

#[async_trait]
impl AdvisorRepository for JsonFileAdvisorRepository {
    async fn load(&self) -> AdvisorRepositoryResult<Option<Vec<Advisor>>> {
        self.run_blocking(|dir, file_name| {
            let raw = match dir.read_to_string(file_name) {
                Ok(raw) => raw,
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(AdvisorRepositoryError::persistence(err)),
            };

            let document: RegistryDocument = serde_json::from_str(&raw)
                .map_err(AdvisorRepositoryError::invalid_persisted_data)?;
            let advisors = document
                .advisors
                .into_iter()
                .map(Advisor::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(AdvisorRepositoryError::invalid_persisted_data)?;
            Ok(Some(advisors))
        })
        .await
    }

    async fn save(&self, advisors: &[Advisor]) -> AdvisorRepositoryResult<()> {
        let document = RegistryDocument {
            advisors: advisors.iter().map(AdvisorRecord::from).collect(),
        };
        self.run_blocking(move |dir, file_name| {
            let mut payload = serde_json::to_string_pretty(&document)
                .map_err(AdvisorRepositoryError::persistence)?;
            payload.push('\n');
            dir.write(file_name, payload)
                .map_err(AdvisorRepositoryError::persistence)
        })
        .await
    }
}

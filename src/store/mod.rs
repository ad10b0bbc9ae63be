//! Client-side state containers.
//!
//! Every store is an explicit value handed to the code that needs it; there
//! are no process-wide singletons, so each test builds its own [`AppState`].

pub mod analysis;
pub mod local;
pub mod progress;
pub mod risks;
pub mod session;
pub mod snapshot;
pub mod ui;
pub mod uploads;

pub use analysis::AnalysisCache;
pub use local::LocalStorage;
pub use progress::WizardProgress;
pub use risks::{RiskCache, RiskPatch};
pub use session::{SessionState, SessionStore};
pub use ui::{UiFlags, UiSnapshot};
pub use uploads::UploadStore;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;

/// Everything a page needs: the HTTP client, the config, and the stores.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionStore,
    pub uploads: UploadStore,
    pub analysis: AnalysisCache,
    pub risks: RiskCache,
    pub progress: WizardProgress,
    pub ui: UiFlags,
    pub storage: LocalStorage,
}

impl AppState {
    /// Build the state on top of an existing local storage.
    pub fn new(config: Config, storage: LocalStorage) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let session = SessionStore::new(api.clone(), storage.clone());
        session.initialize_from_storage()?;
        let progress = WizardProgress::load(storage.clone())?;
        Ok(Self {
            config,
            api,
            session,
            uploads: UploadStore::new(),
            analysis: AnalysisCache::new(),
            risks: RiskCache::new(),
            progress,
            ui: UiFlags::new(),
            storage,
        })
    }

    /// State persisted under the configured state directory.
    pub fn open(config: Config) -> Result<Self> {
        let storage = LocalStorage::open(&config.state_dir())?;
        Self::new(config, storage)
    }

    /// Isolated, non-persistent state.
    pub fn ephemeral(config: Config) -> Result<Self> {
        Self::new(config, LocalStorage::in_memory()?)
    }
}

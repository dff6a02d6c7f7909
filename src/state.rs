use crate::config::Config;
use crate::models::LogDocument;
use crate::profile::Profile;
use crate::store::LogStore;
use crate::summary::Goals;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub profile_path: PathBuf,
    pub goals: Goals,
    pub store: Arc<Mutex<LogStore>>,
    pub profile: Arc<Mutex<Profile>>,
}

impl AppState {
    pub fn new(config: &Config, document: LogDocument, profile: Profile) -> Self {
        Self {
            data_path: config.data_path.clone(),
            profile_path: config.profile_path.clone(),
            goals: config.goals,
            store: Arc::new(Mutex::new(LogStore::with_undo_window(
                document,
                config.undo_window,
            ))),
            profile: Arc::new(Mutex::new(profile)),
        }
    }
}

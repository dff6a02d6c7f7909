use crate::errors::AppError;
use crate::models::LogDocument;
use crate::profile::Profile;
use std::{path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const DEFAULT_DATA_PATH: &str = "data/log.json";
pub const DEFAULT_PROFILE_PATH: &str = "data/profile.json";

pub fn resolve_data_path(value: Option<String>) -> PathBuf {
    resolve_path(value, DEFAULT_DATA_PATH)
}

pub fn resolve_profile_path(value: Option<String>) -> PathBuf {
    resolve_path(value, DEFAULT_PROFILE_PATH)
}

fn resolve_path(value: Option<String>, default: &str) -> PathBuf {
    value
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Absent files are seeded and written back; unreadable ones are left alone.
pub async fn load_document(path: &Path) -> LogDocument {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(err) => {
                error!("failed to parse log file: {err}");
                LogDocument::seed()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let document = LogDocument::seed();
            if let Err(err) = persist_document(path, &document).await {
                warn!("failed to write seeded log: {err}");
            }
            document
        }
        Err(err) => {
            error!("failed to read log file: {err}");
            LogDocument::seed()
        }
    }
}

pub async fn persist_document(path: &Path, document: &LogDocument) -> Result<(), AppError> {
    write_json(path, document).await
}

pub async fn reset_document(path: &Path) -> Result<LogDocument, AppError> {
    remove_if_present(path).await?;
    info!(path = %path.display(), "log reset");
    Ok(load_document(path).await)
}

pub async fn load_profile(path: &Path) -> Profile {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(profile) => profile,
            Err(err) => {
                error!("failed to parse profile file: {err}");
                Profile::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Profile::default(),
        Err(err) => {
            error!("failed to read profile file: {err}");
            Profile::default()
        }
    }
}

pub async fn persist_profile(path: &Path, profile: &Profile) -> Result<(), AppError> {
    write_json(path, profile).await
}

pub async fn reset_profile(path: &Path) -> Result<Profile, AppError> {
    remove_if_present(path).await?;
    info!(path = %path.display(), "profile reset");
    Ok(Profile::default())
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let payload = serde_json::to_vec_pretty(value)?;
    fs::write(path, payload).await?;
    Ok(())
}

async fn remove_if_present(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

use crate::storage::{resolve_data_path, resolve_profile_path};
use crate::store::DEFAULT_UNDO_WINDOW_SECS;
use crate::summary::Goals;
use chrono::Duration;
use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
const MAX_UNDO_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub profile_path: PathBuf,
    pub port: u16,
    pub goals: Goals,
    pub undo_window: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Goals::default();
        let calories = parse_or(&lookup, "CALORIE_GOAL", defaults.calories);
        let water = parse_or(&lookup, "WATER_GOAL", defaults.water);
        let undo_secs = parse_or(&lookup, "UNDO_WINDOW_SECS", DEFAULT_UNDO_WINDOW_SECS);

        Self {
            data_path: resolve_data_path(lookup("APP_DATA_PATH")),
            profile_path: resolve_profile_path(lookup("PROFILE_PATH")),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            goals: Goals {
                calories: if calories > 0.0 { calories } else { defaults.calories },
                water: if water > 0.0 { water } else { defaults.water },
            },
            undo_window: Duration::seconds(undo_secs.clamp(0, MAX_UNDO_WINDOW_SECS)),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={value}");
            default
        }),
        None => default,
    }
}

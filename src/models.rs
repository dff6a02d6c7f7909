use crate::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub completed: u32,
    pub total: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<bool>,
}

impl Workout {
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hydration {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogDocument {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub hydration: Vec<Hydration>,
}

impl LogDocument {
    pub fn seed() -> Self {
        Self {
            activities: vec![
                Activity {
                    id: 1,
                    name: "Walking".into(),
                    detail: "6:00 AM-7:00 AM - Moderate".into(),
                    calories: 210,
                },
                Activity {
                    id: 2,
                    name: "Biking".into(),
                    detail: "4:00 PM-5:30 PM - High intensity".into(),
                    calories: 260,
                },
            ],
            workouts: vec![
                Workout {
                    id: 3,
                    name: "Bicep Curls".into(),
                    detail: "15 reps - Moderate intensity".into(),
                    completed: 2,
                    total: 5,
                    notes: "Felt good".into(),
                    warning: None,
                },
                Workout {
                    id: 4,
                    name: "Chest Flies".into(),
                    detail: "10 reps - Low intensity".into(),
                    completed: 3,
                    total: 3,
                    notes: String::new(),
                    warning: None,
                },
                Workout {
                    id: 5,
                    name: "Push-ups".into(),
                    detail: "15 reps - High intensity".into(),
                    completed: 0,
                    total: 3,
                    notes: String::new(),
                    warning: Some(true),
                },
            ],
            hydration: vec![Hydration {
                id: 6,
                name: "2.0 L".into(),
                detail: "Morning".into(),
                amount: 2.0,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.workouts.is_empty() && self.hydration.is_empty()
    }

    pub(crate) fn max_id(&self) -> i64 {
        let activities = self.activities.iter().map(|item| item.id);
        let workouts = self.workouts.iter().map(|item| item.id);
        let hydration = self.hydration.iter().map(|item| item.id);
        activities.chain(workouts).chain(hydration).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Activities,
    Workouts,
    Hydration,
}

impl CollectionType {
    pub fn display_name(self) -> &'static str {
        match self {
            CollectionType::Activities => "Activity",
            CollectionType::Workouts => "Workout",
            CollectionType::Hydration => "Hydration entry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collection", content = "item")]
pub enum Entry {
    #[serde(rename = "activities")]
    Activity(Activity),
    #[serde(rename = "workouts")]
    Workout(Workout),
    #[serde(rename = "hydration")]
    Hydration(Hydration),
}

impl Entry {
    pub fn id(&self) -> i64 {
        match self {
            Entry::Activity(item) => item.id,
            Entry::Workout(item) => item.id,
            Entry::Hydration(item) => item.id,
        }
    }

    pub fn collection(&self) -> CollectionType {
        match self {
            Entry::Activity(_) => CollectionType::Activities,
            Entry::Workout(_) => CollectionType::Workouts,
            Entry::Hydration(_) => CollectionType::Hydration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Totals {
    pub total_calories: u64,
    pub completed_sets: u64,
    pub total_sets: u64,
    pub total_water: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetChange {
    pub workout: Workout,
    pub changed: bool,
    pub just_completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModifySetRequest {
    pub delta: i32,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub calorie_progress: f64,
    pub workout_progress: f64,
    pub water_progress: f64,
    pub overall_progress: f64,
    pub message: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub totals: Totals,
    pub progress: ProgressResponse,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub date: String,
    pub label: String,
    pub empty_message: Option<&'static str>,
    pub log: LogDocument,
    pub totals: Totals,
    pub progress: ProgressResponse,
    pub undo_available: bool,
}

#[derive(Debug, Serialize)]
pub struct SetChangeResponse {
    pub workout: Option<SetChange>,
    pub celebration: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: Option<Entry>,
    pub message: Option<String>,
    pub undo_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct UndoResponse {
    pub restored: Option<Entry>,
    pub celebration: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub log: LogDocument,
    pub profile: Profile,
    pub message: &'static str,
}

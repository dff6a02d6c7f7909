use crate::models::{LogDocument, ProgressResponse, SummaryResponse, Totals};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const DEFAULT_CALORIE_GOAL: f64 = 500.0;
pub const DEFAULT_WATER_GOAL: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Goals {
    pub calories: f64,
    pub water: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIE_GOAL,
            water: DEFAULT_WATER_GOAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Outstanding,
    Great,
    Halfway,
    GoodStart,
    FirstStep,
}

impl ProgressTier {
    pub fn from_progress(overall: f64) -> Self {
        if overall >= 0.9 {
            ProgressTier::Outstanding
        } else if overall >= 0.7 {
            ProgressTier::Great
        } else if overall >= 0.5 {
            ProgressTier::Halfway
        } else if overall >= 0.25 {
            ProgressTier::GoodStart
        } else {
            ProgressTier::FirstStep
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ProgressTier::Outstanding => "Outstanding! You crushed it today!",
            ProgressTier::Great => "Great progress! Almost there!",
            ProgressTier::Halfway => "You're halfway there! Keep going!",
            ProgressTier::GoodStart => "Good start! Let's build momentum!",
            ProgressTier::FirstStep => "Every journey starts with a step!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ProgressTier::Outstanding => "🏆",
            ProgressTier::Great => "🔥",
            ProgressTier::Halfway => "💪",
            ProgressTier::GoodStart => "🚀",
            ProgressTier::FirstStep => "✨",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub calories: f64,
    pub workouts: f64,
    pub water: f64,
    pub overall: f64,
    pub tier: ProgressTier,
}

pub fn compute_totals(document: &LogDocument) -> Totals {
    Totals {
        total_calories: document
            .activities
            .iter()
            .map(|item| u64::from(item.calories))
            .sum(),
        completed_sets: document
            .workouts
            .iter()
            .map(|item| u64::from(item.completed))
            .sum(),
        total_sets: document
            .workouts
            .iter()
            .map(|item| u64::from(item.total))
            .sum(),
        total_water: document
            .hydration
            .iter()
            .fold(0.0, |acc, item| acc + item.amount),
    }
}

pub fn compute_progress(totals: &Totals, goals: &Goals) -> Progress {
    let calories = ratio(totals.total_calories as f64, goals.calories);
    let workouts = if totals.total_sets == 0 {
        0.0
    } else {
        totals.completed_sets as f64 / totals.total_sets as f64
    };
    let water = ratio(totals.total_water, goals.water);
    let overall = (calories + workouts + water) / 3.0;

    Progress {
        calories,
        workouts,
        water,
        overall,
        tier: ProgressTier::from_progress(overall),
    }
}

pub fn build_summary(totals: Totals, goals: &Goals) -> SummaryResponse {
    SummaryResponse {
        progress: to_response(compute_progress(&totals, goals)),
        totals,
    }
}

pub fn to_response(progress: Progress) -> ProgressResponse {
    ProgressResponse {
        calorie_progress: progress.calories,
        workout_progress: progress.workouts,
        water_progress: progress.water,
        overall_progress: progress.overall,
        message: progress.tier.message(),
        emoji: progress.tier.emoji(),
    }
}

fn ratio(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 1.0;
    }
    (value / goal).min(1.0)
}

pub fn empty_day_message(date: NaiveDate, today: NaiveDate) -> Option<&'static str> {
    if date == today {
        None
    } else if date > today {
        Some("Nothing scheduled yet")
    } else {
        Some("No entries logged")
    }
}

pub fn date_label_at(today: NaiveDate, date: NaiveDate) -> String {
    if date == today {
        "TODAY".to_string()
    } else if date == today - Duration::days(1) {
        "YESTERDAY".to_string()
    } else if date == today + Duration::days(1) {
        "TOMORROW".to_string()
    } else {
        format!("{} {}", date.format("%b").to_string().to_uppercase(), date.day())
    }
}

use crate::errors::AppError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "User";
pub const DEFAULT_BIO: &str = "💪 Fitness enthusiast";
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileGoals {
    pub steps: u32,
    pub calories: u32,
    pub water: f64,
    pub workouts: u32,
    pub weight: f64,
}

impl Default for ProfileGoals {
    fn default() -> Self {
        Self {
            steps: 10_000,
            calories: 500,
            water: 2.5,
            workouts: 5,
            weight: 55.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub unit: Unit,
    pub notifications: bool,
    pub dark_mode: bool,
    pub reminders: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            unit: Unit::Metric,
            notifications: true,
            dark_mode: true,
            reminders: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub sex: String,
    pub height: f64,
    pub weight: f64,
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub goals: ProfileGoals,
    #[serde(default)]
    pub settings: ProfileSettings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Marc Santiago".into(),
            bio: DEFAULT_BIO.into(),
            sex: "Male".into(),
            height: 167.0,
            weight: 85.0,
            dob: NaiveDate::from_ymd_opt(2005, 6, 24),
            goals: ProfileGoals::default(),
            settings: ProfileSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalsUpdate {
    pub steps: Option<u32>,
    pub calories: Option<u32>,
    pub water: Option<f64>,
    pub workouts: Option<u32>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub unit: Option<Unit>,
    pub notifications: Option<bool>,
    pub reminders: Option<bool>,
}

/// Fields left out keep their stored value; blank or non-positive ones reset
/// to the form defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub goals: GoalsUpdate,
    #[serde(default)]
    pub settings: SettingsUpdate,
}

impl ProfileUpdate {
    pub fn apply_at(self, today: NaiveDate, current: &Profile) -> Result<Profile, AppError> {
        if let Some(dob) = self.dob {
            if dob > today {
                return Err(AppError::bad_request("date of birth is in the future"));
            }
        }

        let defaults = ProfileGoals::default();
        let goals = &self.goals;
        let settings = &self.settings;

        Ok(Profile {
            name: text_or(self.name, &current.name, DEFAULT_NAME),
            bio: text_or(self.bio, &current.bio, DEFAULT_BIO),
            sex: self
                .sex
                .map(|sex| sex.trim().to_string())
                .filter(|sex| !sex.is_empty())
                .unwrap_or_else(|| current.sex.clone()),
            height: positive_or(self.height, current.height, DEFAULT_HEIGHT_CM),
            weight: positive_or(self.weight, current.weight, DEFAULT_WEIGHT_KG),
            dob: self.dob.or(current.dob),
            goals: ProfileGoals {
                steps: count_or(goals.steps, current.goals.steps, defaults.steps),
                calories: count_or(goals.calories, current.goals.calories, defaults.calories),
                water: positive_or(goals.water, current.goals.water, defaults.water),
                workouts: count_or(goals.workouts, current.goals.workouts, defaults.workouts),
                weight: positive_or(goals.weight, current.goals.weight, defaults.weight),
            },
            settings: ProfileSettings {
                unit: settings.unit.unwrap_or(current.settings.unit),
                notifications: settings
                    .notifications
                    .unwrap_or(current.settings.notifications),
                dark_mode: true,
                reminders: settings.reminders.unwrap_or(current.settings.reminders),
            },
        })
    }
}

fn text_or(value: Option<String>, current: &str, fallback: &str) -> String {
    match value {
        Some(value) if value.trim().is_empty() => fallback.to_string(),
        Some(value) => value.trim().to_string(),
        None => current.to_string(),
    }
}

fn positive_or(value: Option<f64>, current: f64, fallback: f64) -> f64 {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => value,
        Some(_) => fallback,
        None => current,
    }
}

fn count_or(value: Option<u32>, current: u32, fallback: u32) -> u32 {
    match value {
        Some(0) => fallback,
        Some(value) => value,
        None => current,
    }
}

pub fn calculate_age_at(today: NaiveDate, dob: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Rounded to one decimal; 0 when the height is unusable.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    if !value.is_finite() || height_cm <= 0.0 {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(value: f64) -> Self {
        if value < 18.5 {
            BmiCategory::Underweight
        } else if value < 25.0 {
            BmiCategory::Normal
        } else if value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    VeryActive,
    Active,
    Moderate,
    Sedentary,
}

impl ActivityLevel {
    pub fn from_workouts_per_week(workouts: u32) -> Self {
        match workouts {
            6.. => ActivityLevel::VeryActive,
            4..=5 => ActivityLevel::Active,
            2..=3 => ActivityLevel::Moderate,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::VeryActive => "🔥 Very Active",
            ActivityLevel::Active => "💪 Active",
            ActivityLevel::Moderate => "🚶 Moderate",
            ActivityLevel::Sedentary => "😴 Sedentary",
        }
    }
}

pub fn weight_goal_message(weight: f64, goal: f64) -> String {
    let diff = ((weight - goal) * 10.0).round() / 10.0;
    if diff > 0.0 {
        format!("{diff} kg to go!")
    } else if diff < 0.0 {
        format!("{} kg to gain!", diff.abs())
    } else {
        "Goal reached! 🎉".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub profile: Profile,
    pub age: Option<i32>,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub activity_level: ActivityLevel,
    pub activity_label: &'static str,
    pub weight_goal: String,
}

impl ProfileView {
    pub fn at(today: NaiveDate, profile: Profile) -> Self {
        let bmi = bmi(profile.height, profile.weight);
        let activity_level = ActivityLevel::from_workouts_per_week(profile.goals.workouts);
        Self {
            age: profile.dob.map(|dob| calculate_age_at(today, dob)),
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            activity_level,
            activity_label: activity_level.label(),
            weight_goal: weight_goal_message(profile.weight, profile.goals.weight),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_birthdays() {
        let dob = date(2005, 6, 24);
        assert_eq!(calculate_age_at(date(2026, 6, 23), dob), 20);
        assert_eq!(calculate_age_at(date(2026, 6, 24), dob), 21);
        assert_eq!(calculate_age_at(date(2026, 1, 5), dob), 20);
    }

    #[test]
    fn bmi_rounds_to_one_decimal() {
        assert_eq!(bmi(167.0, 85.0), 30.5);
        assert_eq!(bmi(180.0, 72.0), 22.2);
        assert_eq!(bmi(0.0, 70.0), 0.0);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn activity_level_from_weekly_workouts() {
        assert_eq!(ActivityLevel::from_workouts_per_week(7), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_workouts_per_week(5), ActivityLevel::Active);
        assert_eq!(ActivityLevel::from_workouts_per_week(2), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_workouts_per_week(1), ActivityLevel::Sedentary);
    }

    #[test]
    fn weight_goal_messages() {
        assert_eq!(weight_goal_message(85.0, 55.0), "30 kg to go!");
        assert_eq!(weight_goal_message(50.5, 55.0), "4.5 kg to gain!");
        assert_eq!(weight_goal_message(55.0, 55.0), "Goal reached! 🎉");
    }

    #[test]
    fn default_profile_view() {
        let view = ProfileView::at(date(2026, 1, 5), Profile::default());
        assert_eq!(view.age, Some(20));
        assert_eq!(view.bmi, 30.5);
        assert_eq!(view.bmi_category, BmiCategory::Obese);
        assert_eq!(view.activity_level, ActivityLevel::Active);
    }

    #[test]
    fn update_keeps_missing_and_defaults_blank_fields() {
        let current = Profile::default();
        let update = ProfileUpdate {
            name: Some("  ".into()),
            weight: Some(-3.0),
            goals: GoalsUpdate {
                calories: Some(750),
                steps: Some(0),
                ..GoalsUpdate::default()
            },
            ..ProfileUpdate::default()
        };

        let updated = update.apply_at(date(2026, 1, 5), &current).unwrap();
        assert_eq!(updated.name, DEFAULT_NAME);
        assert_eq!(updated.weight, DEFAULT_WEIGHT_KG);
        assert_eq!(updated.height, current.height);
        assert_eq!(updated.goals.calories, 750);
        assert_eq!(updated.goals.steps, 10_000);
        assert_eq!(updated.dob, current.dob);
        assert!(updated.settings.dark_mode);
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let update = ProfileUpdate {
            dob: Some(date(2030, 1, 1)),
            ..ProfileUpdate::default()
        };
        let err = update
            .apply_at(date(2026, 1, 5), &Profile::default())
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn profile_json_uses_camel_case_settings() {
        let json = serde_json::to_string(&Profile::default()).unwrap();
        assert!(json.contains(r#""darkMode":true"#));
        assert!(json.contains(r#""dob":"2005-06-24""#));
        assert!(json.contains(r#""unit":"metric""#));
    }
}

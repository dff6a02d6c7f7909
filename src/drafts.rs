use crate::errors::AppError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const HEAVY_WEIGHT_KG: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Intensity {
    /// Approximate kcal burned per minute.
    pub fn kcal_per_minute(self) -> u32 {
        match self {
            Intensity::Low => 4,
            Intensity::Moderate => 8,
            Intensity::High => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub duration_mins: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub name: String,
    pub detail: String,
    pub calories: u32,
}

impl ActivityDraft {
    pub fn validate(self) -> Result<NewActivity, AppError> {
        let name = required_name(&self.name, "activity")?;
        if self.duration_mins == 0 {
            return Err(AppError::bad_request("please enter a duration"));
        }

        Ok(NewActivity {
            detail: format!("{} · {} mins", self.intensity.as_str(), self.duration_mins),
            calories: self
                .duration_mins
                .saturating_mul(self.intensity.kcal_per_minute()),
            name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutDraft {
    #[serde(default)]
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight_kg: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub detail: String,
    pub total_sets: u32,
    pub heavy: bool,
}

impl WorkoutDraft {
    pub fn validate(self) -> Result<NewWorkout, AppError> {
        let name = required_name(&self.name, "exercise")?;
        let sets = self.sets.filter(|sets| *sets > 0).unwrap_or(DEFAULT_SETS);
        let reps = self.reps.filter(|reps| *reps > 0).unwrap_or(DEFAULT_REPS);
        let weight = self.weight_kg.filter(|weight| *weight > 0);

        let mut detail = format!("{sets} sets · {reps} reps");
        if let Some(weight) = weight {
            detail.push_str(&format!(" · {weight}kg"));
        }

        Ok(NewWorkout {
            name,
            detail,
            total_sets: sets,
            heavy: weight.is_some_and(|weight| weight > HEAVY_WEIGHT_KG),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HydrationDraft {
    pub amount: f64,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHydration {
    pub name: String,
    pub detail: String,
    pub amount: f64,
}

impl HydrationDraft {
    pub fn validate(self) -> Result<NewHydration, AppError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AppError::bad_request("please enter an amount of water"));
        }

        Ok(NewHydration {
            name: format!("{:.1} L", self.amount),
            detail: self.detail.trim().to_string(),
            amount: self.amount,
        })
    }
}

fn required_name(name: &str, kind: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(format!("please select an {kind} first")));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn activity_calories_scale_with_intensity() {
        let draft = ActivityDraft {
            name: "Running".into(),
            intensity: Intensity::High,
            duration_mins: 30,
        };
        let activity = draft.validate().unwrap();
        assert_eq!(activity.calories, 360);
        assert_eq!(activity.detail, "High · 30 mins");
    }

    #[test]
    fn activity_requires_name_and_duration() {
        let missing_name = ActivityDraft {
            name: "  ".into(),
            intensity: Intensity::Low,
            duration_mins: 10,
        };
        let err = missing_name.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let missing_duration = ActivityDraft {
            name: "Yoga".into(),
            intensity: Intensity::Low,
            duration_mins: 0,
        };
        let err = missing_duration.validate().unwrap_err();
        assert_eq!(err.message, "please enter a duration");
    }

    #[test]
    fn workout_defaults_and_weight() {
        let plain = WorkoutDraft {
            name: "Squats".into(),
            sets: None,
            reps: Some(0),
            weight_kg: None,
        }
        .validate()
        .unwrap();
        assert_eq!(plain.total_sets, 3);
        assert_eq!(plain.detail, "3 sets · 10 reps");
        assert!(!plain.heavy);

        let heavy = WorkoutDraft {
            name: "Leg Press".into(),
            sets: Some(4),
            reps: Some(8),
            weight_kg: Some(90),
        }
        .validate()
        .unwrap();
        assert_eq!(heavy.detail, "4 sets · 8 reps · 90kg");
        assert!(heavy.heavy);
    }

    #[test]
    fn hydration_rejects_non_positive() {
        let draft = HydrationDraft {
            amount: 0.0,
            detail: String::new(),
        };
        assert!(draft.validate().is_err());

        let ok = HydrationDraft {
            amount: 0.5,
            detail: " Lunch ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.name, "0.5 L");
        assert_eq!(ok.detail, "Lunch");
    }

    #[test]
    fn intensity_parses_from_json() {
        let draft: ActivityDraft =
            serde_json::from_str(r#"{"name":"Cycling","intensity":"Low","duration_mins":60}"#)
                .unwrap();
        assert_eq!(draft.intensity, Intensity::Low);
        assert_eq!(draft.validate().unwrap().calories, 240);
    }
}

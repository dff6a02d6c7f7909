use crate::drafts::{ActivityDraft, HydrationDraft, WorkoutDraft};
use crate::errors::AppError;
use crate::models::{
    Activity, CollectionType, DeleteResponse, Hydration, LogDocument, LogQuery, LogResponse,
    ModifySetRequest, NoteRequest, ResetResponse, SetChange, SetChangeResponse, SummaryResponse,
    Totals, UndoResponse, Workout,
};
use crate::profile::{ProfileUpdate, ProfileView};
use crate::state::AppState;
use crate::storage::{persist_document, persist_profile, reset_document, reset_profile};
use crate::summary::{build_summary, date_label_at, empty_day_message};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

pub async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogResponse>, AppError> {
    let today = Local::now().date_naive();
    let date = match query.date.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => NaiveDate::parse_from_str(value, "%Y-%m-%d")?,
        _ => today,
    };

    let store = state.store.lock().await;
    let empty_message = empty_day_message(date, today);
    let (log, totals) = if empty_message.is_some() {
        (LogDocument::default(), Totals::default())
    } else {
        (store.document().clone(), store.totals())
    };
    let summary = build_summary(totals, &state.goals);

    Ok(Json(LogResponse {
        date: date.to_string(),
        label: date_label_at(today, date),
        empty_message,
        log,
        totals: summary.totals,
        progress: summary.progress,
        undo_available: empty_message.is_none() && store.undo_available(),
    }))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let store = state.store.lock().await;
    Json(build_summary(store.totals(), &state.goals))
}

pub async fn add_activity(
    State(state): State<AppState>,
    Json(draft): Json<ActivityDraft>,
) -> Result<Json<Activity>, AppError> {
    let new = draft.validate()?;
    let mut store = state.store.lock().await;
    let activity = store.add_activity(new.name, new.detail, new.calories);
    persist_document(&state.data_path, store.document()).await?;
    Ok(Json(activity))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Json(draft): Json<WorkoutDraft>,
) -> Result<Json<Workout>, AppError> {
    let new = draft.validate()?;
    let mut store = state.store.lock().await;
    let mut workout = store.add_workout(new.name, new.detail, new.total_sets);
    if new.heavy {
        if let Some(flagged) = store.mark_warning(workout.id) {
            workout = flagged;
        }
    }
    persist_document(&state.data_path, store.document()).await?;
    Ok(Json(workout))
}

pub async fn add_hydration(
    State(state): State<AppState>,
    Json(draft): Json<HydrationDraft>,
) -> Result<Json<Hydration>, AppError> {
    let new = draft.validate()?;
    let mut store = state.store.lock().await;
    let hydration = store.add_hydration(new.name, new.detail, new.amount);
    persist_document(&state.data_path, store.document()).await?;
    Ok(Json(hydration))
}

pub async fn toggle_set(
    State(state): State<AppState>,
    Path((id, index)): Path<(i64, u32)>,
) -> Result<Json<SetChangeResponse>, AppError> {
    let mut store = state.store.lock().await;
    let change = store.toggle_set(id, index);
    if change.as_ref().is_some_and(|change| change.changed) {
        persist_document(&state.data_path, store.document()).await?;
    }
    Ok(Json(to_set_response(change)))
}

pub async fn modify_set(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ModifySetRequest>,
) -> Result<Json<SetChangeResponse>, AppError> {
    if !matches!(payload.delta, 1 | -1) {
        return Err(AppError::bad_request("delta must be 1 or -1"));
    }

    let mut store = state.store.lock().await;
    let change = store.modify_set(id, payload.delta);
    if change.as_ref().is_some_and(|change| change.changed) {
        persist_document(&state.data_path, store.document()).await?;
    }
    Ok(Json(to_set_response(change)))
}

pub async fn set_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<Option<Workout>>, AppError> {
    let mut store = state.store.lock().await;
    let workout = store.set_note(id, payload.notes);
    if workout.is_some() {
        persist_document(&state.data_path, store.document()).await?;
    }
    Ok(Json(workout))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(CollectionType, i64)>,
) -> Result<Json<DeleteResponse>, AppError> {
    let now = Utc::now();
    let mut store = state.store.lock().await;
    let Some(deleted) = store.delete_item_at(now, collection, id) else {
        return Ok(Json(DeleteResponse {
            deleted: None,
            message: None,
            undo_expires_at: None,
        }));
    };

    persist_document(&state.data_path, store.document()).await?;
    let undo_expires_at = store.pending_undo_at(now).map(|backup| backup.expires_at);

    Ok(Json(DeleteResponse {
        message: Some(format!("{} deleted", collection.display_name())),
        deleted: Some(deleted),
        undo_expires_at,
    }))
}

pub async fn undo_delete(State(state): State<AppState>) -> Result<Json<UndoResponse>, AppError> {
    let mut store = state.store.lock().await;
    let restored = store.undo_last_delete();
    if restored.is_some() {
        persist_document(&state.data_path, store.document()).await?;
    }

    Ok(Json(UndoResponse {
        celebration: restored.as_ref().map(|_| "✅ Restored!"),
        restored,
    }))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileView> {
    let profile = state.profile.lock().await;
    Json(ProfileView::at(Local::now().date_naive(), profile.clone()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileView>, AppError> {
    let today = Local::now().date_naive();
    let mut profile = state.profile.lock().await;
    let updated = update.apply_at(today, &profile)?;
    persist_profile(&state.profile_path, &updated).await?;
    *profile = updated.clone();
    Ok(Json(ProfileView::at(today, updated)))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let mut store = state.store.lock().await;
    let mut profile = state.profile.lock().await;
    let document = reset_document(&state.data_path).await?;
    store.replace(document.clone());
    *profile = reset_profile(&state.profile_path).await?;
    info!("all log and profile data reset");
    Ok(Json(ResetResponse {
        log: document,
        profile: profile.clone(),
        message: "🗑️ All data has been reset",
    }))
}

fn to_set_response(change: Option<SetChange>) -> SetChangeResponse {
    let celebration = change
        .as_ref()
        .filter(|change| change.just_completed && change.workout.completed > 0)
        .map(|change| format!("🎉 {} Complete!", change.workout.name));
    SetChangeResponse {
        workout: change,
        celebration,
    }
}

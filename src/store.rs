use crate::models::{
    Activity, CollectionType, Entry, Hydration, LogDocument, SetChange, Totals, Workout,
};
use crate::summary::compute_totals;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

pub const DEFAULT_UNDO_WINDOW_SECS: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DeletedItemBackup {
    pub entry: Entry,
    pub expires_at: DateTime<Utc>,
}

impl DeletedItemBackup {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct LogStore {
    document: LogDocument,
    backup: Option<DeletedItemBackup>,
    last_id: i64,
    undo_window: Duration,
}

impl LogStore {
    pub fn new(document: LogDocument) -> Self {
        Self::with_undo_window(document, Duration::seconds(DEFAULT_UNDO_WINDOW_SECS))
    }

    pub fn with_undo_window(mut document: LogDocument, undo_window: Duration) -> Self {
        clamp_completed(&mut document);
        let last_id = document.max_id();
        Self {
            document,
            backup: None,
            last_id,
            undo_window,
        }
    }

    pub fn document(&self) -> &LogDocument {
        &self.document
    }

    pub fn replace(&mut self, mut document: LogDocument) {
        clamp_completed(&mut document);
        self.last_id = self.last_id.max(document.max_id());
        self.document = document;
        self.backup = None;
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.document)
    }

    pub fn add_activity(&mut self, name: String, detail: String, calories: u32) -> Activity {
        let activity = Activity {
            id: self.next_id(Utc::now()),
            name,
            detail,
            calories,
        };
        self.document.activities.push(activity.clone());
        debug!(id = activity.id, "activity added");
        activity
    }

    pub fn add_workout(&mut self, name: String, detail: String, total_sets: u32) -> Workout {
        let workout = Workout {
            id: self.next_id(Utc::now()),
            name,
            detail,
            completed: 0,
            total: total_sets,
            notes: String::new(),
            warning: None,
        };
        self.document.workouts.push(workout.clone());
        debug!(id = workout.id, "workout added");
        workout
    }

    pub fn add_hydration(&mut self, name: String, detail: String, amount: f64) -> Hydration {
        let hydration = Hydration {
            id: self.next_id(Utc::now()),
            name,
            detail,
            amount: amount.max(0.0),
        };
        self.document.hydration.push(hydration.clone());
        debug!(id = hydration.id, "hydration added");
        hydration
    }

    pub fn mark_warning(&mut self, workout_id: i64) -> Option<Workout> {
        let workout = self.workout_mut(workout_id)?;
        workout.warning = Some(true);
        Some(workout.clone())
    }

    // Clicking the bubble for the current count steps back one set.
    pub fn toggle_set(&mut self, workout_id: i64, set_index: u32) -> Option<SetChange> {
        let workout = self.workout_mut(workout_id)?;
        let target = if workout.completed == set_index {
            set_index.saturating_sub(1)
        } else {
            set_index
        };
        Some(apply_completed(workout, target))
    }

    pub fn modify_set(&mut self, workout_id: i64, delta: i32) -> Option<SetChange> {
        let workout = self.workout_mut(workout_id)?;
        let next = i64::from(workout.completed) + i64::from(delta);
        if next < 0 || next > i64::from(workout.total) {
            debug!(workout_id, delta, "set change out of range");
            return Some(SetChange {
                workout: workout.clone(),
                changed: false,
                just_completed: false,
            });
        }
        Some(apply_completed(workout, next as u32))
    }

    pub fn set_note(&mut self, workout_id: i64, text: String) -> Option<Workout> {
        let workout = self.workout_mut(workout_id)?;
        workout.notes = text;
        Some(workout.clone())
    }

    pub fn delete_item(&mut self, collection: CollectionType, id: i64) -> Option<Entry> {
        self.delete_item_at(Utc::now(), collection, id)
    }

    pub fn delete_item_at(
        &mut self,
        now: DateTime<Utc>,
        collection: CollectionType,
        id: i64,
    ) -> Option<Entry> {
        let entry = match collection {
            CollectionType::Activities => {
                remove_by_id(&mut self.document.activities, |item| item.id == id)
                    .map(Entry::Activity)
            }
            CollectionType::Workouts => {
                remove_by_id(&mut self.document.workouts, |item| item.id == id)
                    .map(Entry::Workout)
            }
            CollectionType::Hydration => {
                remove_by_id(&mut self.document.hydration, |item| item.id == id)
                    .map(Entry::Hydration)
            }
        }?;

        self.backup = Some(DeletedItemBackup {
            entry: entry.clone(),
            expires_at: now + self.undo_window,
        });
        debug!(id, ?collection, "entry deleted");
        Some(entry)
    }

    pub fn undo_last_delete(&mut self) -> Option<Entry> {
        self.undo_last_delete_at(Utc::now())
    }

    pub fn undo_last_delete_at(&mut self, now: DateTime<Utc>) -> Option<Entry> {
        let backup = self.backup.take()?;
        if !backup.is_live_at(now) {
            debug!(id = backup.entry.id(), "undo window elapsed");
            return None;
        }

        match backup.entry.clone() {
            Entry::Activity(item) => self.document.activities.push(item),
            Entry::Workout(item) => self.document.workouts.push(item),
            Entry::Hydration(item) => self.document.hydration.push(item),
        }
        debug!(id = backup.entry.id(), "entry restored");
        Some(backup.entry)
    }

    pub fn pending_undo_at(&self, now: DateTime<Utc>) -> Option<&DeletedItemBackup> {
        self.backup.as_ref().filter(|backup| backup.is_live_at(now))
    }

    pub fn undo_available(&self) -> bool {
        self.pending_undo_at(Utc::now()).is_some()
    }

    fn workout_mut(&mut self, id: i64) -> Option<&mut Workout> {
        self.document.workouts.iter_mut().find(|item| item.id == id)
    }

    // Millisecond timestamps, bumped when two entries land in the same tick.
    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

fn apply_completed(workout: &mut Workout, completed: u32) -> SetChange {
    let was_complete = workout.is_complete();
    let before = workout.completed;
    workout.completed = completed.min(workout.total);
    SetChange {
        changed: workout.completed != before,
        just_completed: !was_complete && workout.is_complete(),
        workout: workout.clone(),
    }
}

fn clamp_completed(document: &mut LogDocument) {
    for workout in &mut document.workouts {
        if workout.completed > workout.total {
            warn!(id = workout.id, "clamping over-full workout");
            workout.completed = workout.total;
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(matches)?;
    Some(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_600_000 + secs, 0).unwrap()
    }

    fn workout(id: i64, completed: u32, total: u32) -> Workout {
        Workout {
            id,
            name: format!("Workout {id}"),
            detail: String::new(),
            completed,
            total,
            notes: String::new(),
            warning: None,
        }
    }

    fn store_with_workouts(workouts: Vec<Workout>) -> LogStore {
        LogStore::new(LogDocument {
            workouts,
            ..LogDocument::default()
        })
    }

    fn completed(store: &LogStore, id: i64) -> u32 {
        store
            .document()
            .workouts
            .iter()
            .find(|item| item.id == id)
            .expect("missing workout")
            .completed
    }

    #[test]
    fn toggle_set_steps_back_then_forward() {
        let mut store = store_with_workouts(vec![workout(5, 2, 5)]);

        let change = store.toggle_set(5, 2).expect("workout exists");
        assert_eq!(change.workout.completed, 1);
        assert!(change.changed);

        let change = store.toggle_set(5, 2).expect("workout exists");
        assert_eq!(change.workout.completed, 2);
    }

    #[test]
    fn toggle_set_fills_up_to_index() {
        let mut store = store_with_workouts(vec![workout(5, 0, 4)]);
        store.toggle_set(5, 3);
        assert_eq!(completed(&store, 5), 3);
    }

    #[test]
    fn toggle_set_clamps_to_total() {
        let mut store = store_with_workouts(vec![workout(1, 1, 3)]);
        let change = store.toggle_set(1, 9).expect("workout exists");
        assert_eq!(change.workout.completed, 3);
        assert!(change.just_completed);
    }

    #[test]
    fn toggle_set_first_bubble_clears_all() {
        let mut store = store_with_workouts(vec![workout(1, 1, 3)]);
        store.toggle_set(1, 1);
        assert_eq!(completed(&store, 1), 0);
    }

    #[test]
    fn just_completed_fires_once_per_transition() {
        let mut store = store_with_workouts(vec![workout(1, 2, 3)]);

        let change = store.modify_set(1, 1).expect("workout exists");
        assert!(change.just_completed);

        let change = store.toggle_set(1, 2).expect("workout exists");
        assert!(!change.just_completed);
        assert_eq!(change.workout.completed, 2);

        let change = store.toggle_set(1, 3).expect("workout exists");
        assert!(change.just_completed);

        let change = store.modify_set(1, 1).expect("workout exists");
        assert!(!change.changed);
        assert!(!change.just_completed);
    }

    #[test]
    fn modify_set_rejects_out_of_range() {
        let mut store = store_with_workouts(vec![workout(1, 0, 2)]);

        let change = store.modify_set(1, -1).expect("workout exists");
        assert!(!change.changed);
        assert_eq!(change.workout.completed, 0);

        store.modify_set(1, 1);
        store.modify_set(1, 1);
        let change = store.modify_set(1, 1).expect("workout exists");
        assert!(!change.changed);
        assert_eq!(completed(&store, 1), 2);
    }

    #[test]
    fn modify_set_up_then_down_restores() {
        for start in 0..3 {
            let mut store = store_with_workouts(vec![workout(1, start, 3)]);
            store.modify_set(1, 1);
            store.modify_set(1, -1);
            assert_eq!(completed(&store, 1), start);
        }
    }

    #[test]
    fn set_counts_stay_in_range() {
        let mut store = store_with_workouts(vec![workout(1, 0, 3)]);
        let steps: [(bool, i64); 10] = [
            (true, 2),
            (false, 1),
            (false, 1),
            (false, 1),
            (true, 3),
            (true, 0),
            (false, -1),
            (false, -1),
            (true, 7),
            (false, 1),
        ];
        for (toggle, value) in steps {
            if toggle {
                store.toggle_set(1, value as u32);
            } else {
                store.modify_set(1, value as i32);
            }
            assert!(completed(&store, 1) <= 3);
        }
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut store = LogStore::new(LogDocument::seed());
        let before = store.document().clone();

        assert!(store.toggle_set(999, 1).is_none());
        assert!(store.modify_set(999, 1).is_none());
        assert!(store.set_note(999, "hi".into()).is_none());
        assert!(store.delete_item(CollectionType::Activities, 999).is_none());
        assert!(store.delete_item(CollectionType::Hydration, 3).is_none());
        assert_eq!(store.document(), &before);
        assert!(!store.undo_available());
    }

    #[test]
    fn set_note_overwrites_and_clears() {
        let mut store = LogStore::new(LogDocument::seed());
        let updated = store.set_note(4, "Heavy today".into()).expect("seeded workout");
        assert_eq!(updated.notes, "Heavy today");

        let cleared = store.set_note(4, String::new()).expect("seeded workout");
        assert!(cleared.notes.is_empty());
    }

    #[test]
    fn delete_then_undo_restores_entry_at_end() {
        let mut store = LogStore::new(LogDocument::seed());

        let deleted = store
            .delete_item_at(at(0), CollectionType::Activities, 1)
            .expect("seeded activity");
        assert_eq!(deleted.collection(), CollectionType::Activities);
        assert_eq!(store.document().activities.len(), 1);

        let restored = store.undo_last_delete_at(at(4)).expect("within window");
        assert_eq!(restored, deleted);
        let ids: Vec<i64> = store.document().activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn undo_after_window_is_no_op() {
        let mut store = LogStore::new(LogDocument::seed());
        store.delete_item_at(at(0), CollectionType::Hydration, 6);

        assert!(store.pending_undo_at(at(4)).is_some());
        assert!(store.undo_last_delete_at(at(5)).is_none());
        assert!(store.document().hydration.is_empty());
    }

    #[test]
    fn second_undo_is_no_op() {
        let mut store = LogStore::new(LogDocument::seed());
        store.delete_item_at(at(0), CollectionType::Workouts, 3);

        assert!(store.undo_last_delete_at(at(1)).is_some());
        let snapshot = store.document().clone();
        assert!(store.undo_last_delete_at(at(2)).is_none());
        assert_eq!(store.document(), &snapshot);
    }

    #[test]
    fn newer_delete_replaces_backup() {
        let mut store = LogStore::new(LogDocument::seed());
        store.delete_item_at(at(0), CollectionType::Activities, 1);
        store.delete_item_at(at(1), CollectionType::Workouts, 5);

        let restored = store.undo_last_delete_at(at(2)).expect("within window");
        assert_eq!(restored.id(), 5);
        assert_eq!(store.document().activities.len(), 1);
        assert!(store.undo_last_delete_at(at(2)).is_none());
    }

    #[test]
    fn backup_window_follows_latest_delete() {
        let mut store =
            LogStore::with_undo_window(LogDocument::seed(), Duration::seconds(DEFAULT_UNDO_WINDOW_SECS));
        store.delete_item_at(at(0), CollectionType::Activities, 1);
        store.delete_item_at(at(4), CollectionType::Activities, 2);
        assert!(store.undo_last_delete_at(at(8)).is_some());
    }

    #[test]
    fn added_entries_get_unique_increasing_ids() {
        let mut store = LogStore::new(LogDocument::default());
        let first = store.add_activity("Running".into(), "High · 30 mins".into(), 360);
        let second = store.add_workout("Squats".into(), "4 sets · 12 reps".into(), 4);
        let third = store.add_hydration("0.5 L".into(), "Lunch".into(), 0.5);

        assert!(first.id < second.id);
        assert!(second.id < third.id);
        assert_eq!(second.completed, 0);
        assert_eq!(second.total, 4);
        assert_eq!(store.totals().total_calories, 360);
    }

    #[test]
    fn ids_never_collide_with_loaded_entries() {
        let mut document = LogDocument::seed();
        document.activities[0].id = i64::MAX - 10;
        let mut store = LogStore::new(document);
        let added = store.add_activity("Yoga".into(), "Low · 45 mins".into(), 180);
        assert_eq!(added.id, i64::MAX - 9);
    }

    #[test]
    fn over_full_workouts_are_clamped_on_load() {
        let document: LogDocument = serde_json::from_str(
            r#"{"workouts":[{"id":1,"name":"Rows","detail":"","completed":9,"total":3}]}"#,
        )
        .unwrap();
        let mut store = LogStore::new(document.clone());

        assert_eq!(completed(&store, 1), 3);
        let totals = store.totals();
        assert_eq!(totals.completed_sets, totals.total_sets);

        let change = store.modify_set(1, -1).expect("workout exists");
        assert!(change.changed);
        assert_eq!(change.workout.completed, 2);

        store.replace(document);
        assert_eq!(completed(&store, 1), 3);
    }

    #[test]
    fn replace_drops_pending_undo() {
        let mut store = LogStore::new(LogDocument::seed());
        store.delete_item(CollectionType::Activities, 1);
        store.replace(LogDocument::seed());
        assert!(!store.undo_available());
        assert_eq!(store.document(), &LogDocument::seed());
    }
}

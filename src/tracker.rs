use crate::calendar::date_key;
use crate::errors::TrackerError;
use crate::models::{CompletionRecord, Habit};
use chrono::NaiveDate;

/// Which persisted collections a mutation touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub habits: bool,
    pub completions: bool,
}

impl Dirty {
    pub const NONE: Dirty = Dirty {
        habits: false,
        completions: false,
    };

    pub fn any(self) -> bool {
        self.habits || self.completions
    }
}

/// Owns the habit list and the completion record. Every mutation goes
/// through here; callers persist whatever the returned [`Dirty`] names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitTracker {
    habits: Vec<Habit>,
    completions: CompletionRecord,
}

impl HabitTracker {
    pub fn new(habits: Vec<Habit>, completions: CompletionRecord) -> Self {
        Self {
            habits,
            completions,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn completions(&self) -> &CompletionRecord {
        &self.completions
    }

    pub fn has_habit(&self, name: &str) -> bool {
        self.habits.iter().any(|habit| habit.name == name)
    }

    pub fn add_habit(&mut self, habit: Habit) -> Result<Dirty, TrackerError> {
        if self.has_habit(&habit.name) {
            return Err(TrackerError::DuplicateName(habit.name));
        }
        self.habits.push(habit);
        Ok(Dirty {
            habits: true,
            completions: false,
        })
    }

    /// Drops the habit and its completion entries together. Unknown names
    /// change nothing.
    pub fn remove_habit(&mut self, name: &str) -> Dirty {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.name != name);
        Dirty {
            habits: self.habits.len() != before,
            completions: self.completions.remove_habit(name),
        }
    }

    /// Flips `[habit][date]`. Returns the new value, or `None` when the habit
    /// is not tracked.
    pub fn toggle_completion(&mut self, habit: &str, date: NaiveDate) -> Option<bool> {
        if !self.has_habit(habit) {
            return None;
        }
        Some(self.completions.toggle(habit, &date_key(date)))
    }

    pub fn is_completed(&self, habit: &str, date: NaiveDate) -> bool {
        self.completions.is_completed(habit, &date_key(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Icon;

    fn habit(name: &str) -> Habit {
        Habit::new(name, Icon::default()).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn remove_cascades_to_completions() {
        let mut tracker = HabitTracker::default();
        tracker.add_habit(habit("A")).unwrap();
        tracker.add_habit(habit("B")).unwrap();
        tracker.toggle_completion("A", day(1));
        tracker.toggle_completion("B", day(1));

        let dirty = tracker.remove_habit("A");
        assert!(dirty.habits && dirty.completions);

        let names: Vec<&str> = tracker.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["B"]);
        assert!(!tracker.completions().contains_habit("A"));
        assert!(tracker.is_completed("B", day(1)));
        assert_eq!(tracker.completions().habits().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn remove_unknown_habit_is_noop() {
        let mut tracker = HabitTracker::default();
        tracker.add_habit(habit("A")).unwrap();
        let before = tracker.clone();

        assert_eq!(tracker.remove_habit("Z"), Dirty::NONE);
        assert_eq!(tracker, before);
    }

    #[test]
    fn remove_habit_without_completions_only_touches_habits() {
        let mut tracker = HabitTracker::default();
        tracker.add_habit(habit("A")).unwrap();
        let dirty = tracker.remove_habit("A");
        assert!(dirty.habits);
        assert!(!dirty.completions);
    }

    #[test]
    fn double_toggle_restores_state_and_leaves_others_alone() {
        let mut tracker = HabitTracker::default();
        tracker.add_habit(habit("A")).unwrap();
        tracker.add_habit(habit("B")).unwrap();
        tracker.toggle_completion("B", day(2));
        tracker.toggle_completion("A", day(3));
        let before = tracker.clone();

        assert_eq!(tracker.toggle_completion("A", day(2)), Some(true));
        assert!(tracker.is_completed("A", day(2)));
        assert!(tracker.is_completed("A", day(3)));
        assert!(tracker.is_completed("B", day(2)));
        assert!(!tracker.is_completed("B", day(3)));

        assert_eq!(tracker.toggle_completion("A", day(2)), Some(false));
        assert!(!tracker.is_completed("A", day(2)));
        assert!(tracker.is_completed("A", day(3)));
        assert!(tracker.is_completed("B", day(2)));
        for d in 1..=5 {
            for name in ["A", "B"] {
                assert_eq!(tracker.is_completed(name, day(d)), before.is_completed(name, day(d)));
            }
        }
    }

    #[test]
    fn toggle_for_unknown_habit_is_noop() {
        let mut tracker = HabitTracker::default();
        assert_eq!(tracker.toggle_completion("Ghost", day(1)), None);
        assert!(tracker.completions().is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut tracker = HabitTracker::default();
        tracker.add_habit(habit("Read")).unwrap();
        let err = tracker.add_habit(habit("Read")).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName(name) if name == "Read"));
        assert_eq!(tracker.habits().len(), 1);
    }

    #[test]
    fn habits_keep_insertion_order() {
        let mut tracker = HabitTracker::default();
        for name in ["Water", "Read", "Stretch"] {
            tracker.add_habit(habit(name)).unwrap();
        }
        let names: Vec<&str> = tracker.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Water", "Read", "Stretch"]);
    }
}

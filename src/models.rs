use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed set of glyph icons offered by the editor, in display order.
pub const GLYPH_OPTIONS: [&str; 10] = [
    "💧", "🏃‍♂️", "📚", "🧘‍♂️", "🍎", "🛏️", "🦷", "☀️", "📝", "💪",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorIcon {
    Star,
    Heart,
    Check,
}

impl VectorIcon {
    pub const ALL: [VectorIcon; 3] = [VectorIcon::Star, VectorIcon::Heart, VectorIcon::Check];

    pub fn label(self) -> &'static str {
        match self {
            VectorIcon::Star => "Star",
            VectorIcon::Heart => "Heart",
            VectorIcon::Check => "Check",
        }
    }
}

/// A habit's icon. Glyphs persist as a bare string, vector templates as
/// `{ "svg": "<id>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Glyph(String),
    Vector { svg: VectorIcon },
}

impl Default for Icon {
    fn default() -> Self {
        Icon::Glyph(GLYPH_OPTIONS[0].to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub icon: Icon,
}

impl Habit {
    /// Builds a habit from raw input. Returns `None` when the name is empty
    /// after trimming.
    pub fn new(name: &str, icon: Icon) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            icon,
        })
    }
}

/// habit name -> canonical date key -> completed.
///
/// A missing habit or date entry means "not completed"; lookups go through
/// [`CompletionRecord::is_completed`] rather than the raw maps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRecord(BTreeMap<String, BTreeMap<String, bool>>);

impl CompletionRecord {
    pub fn is_completed(&self, habit: &str, date_key: &str) -> bool {
        self.0
            .get(habit)
            .and_then(|days| days.get(date_key))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the entry and returns the new value.
    pub fn toggle(&mut self, habit: &str, date_key: &str) -> bool {
        let entry = self
            .0
            .entry(habit.to_string())
            .or_default()
            .entry(date_key.to_string())
            .or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn remove_habit(&mut self, habit: &str) -> bool {
        self.0.remove(habit).is_some()
    }
}

#[cfg(test)]
impl CompletionRecord {
    pub fn contains_habit(&self, habit: &str) -> bool {
        self.0.contains_key(habit)
    }

    pub fn habits(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
}

#[derive(Debug, Deserialize)]
pub struct RemoveHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub habit: String,
    pub date: String,
    pub completed: bool,
    pub changed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub habits: Vec<Habit>,
    pub completions: CompletionRecord,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DayCellResponse {
    pub day: u32,
    pub date: String,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub today: String,
    pub weeks: Vec<Vec<Option<DayCellResponse>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_json_shapes() {
        let glyph = serde_json::to_value(Icon::Glyph("📚".into())).unwrap();
        assert_eq!(glyph, serde_json::json!("📚"));

        let vector = serde_json::to_value(Icon::Vector {
            svg: VectorIcon::Heart,
        })
        .unwrap();
        assert_eq!(vector, serde_json::json!({ "svg": "heart" }));

        let parsed: Icon = serde_json::from_value(serde_json::json!({ "svg": "star" })).unwrap();
        assert_eq!(parsed, Icon::Vector { svg: VectorIcon::Star });
    }

    #[test]
    fn habit_name_is_trimmed_and_required() {
        let habit = Habit::new("  Read  ", Icon::default()).expect("valid name");
        assert_eq!(habit.name, "Read");
        assert!(Habit::new("", Icon::default()).is_none());
        assert!(Habit::new("   ", Icon::default()).is_none());
    }

    #[test]
    fn missing_entries_default_to_not_completed() {
        let mut record = CompletionRecord::default();
        assert!(!record.is_completed("Read", "2024-03-05"));

        assert!(record.toggle("Read", "2024-03-05"));
        assert!(record.is_completed("Read", "2024-03-05"));
        assert!(!record.is_completed("Read", "2024-03-06"));
        assert!(!record.is_completed("Run", "2024-03-05"));
    }
}

use crate::errors::TrackerError;
use crate::models::{GLYPH_OPTIONS, Habit, Icon, VectorIcon};
use crate::tracker::{Dirty, HabitTracker};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    #[default]
    Glyph,
    Vector,
}

impl IconMode {
    pub fn first_option(self) -> Icon {
        match self {
            IconMode::Glyph => Icon::default(),
            IconMode::Vector => Icon::Vector {
                svg: VectorIcon::ALL[0],
            },
        }
    }

    pub fn options(self) -> Vec<Icon> {
        match self {
            IconMode::Glyph => GLYPH_OPTIONS
                .iter()
                .map(|glyph| Icon::Glyph((*glyph).to_string()))
                .collect(),
            IconMode::Vector => VectorIcon::ALL
                .iter()
                .map(|svg| Icon::Vector { svg: *svg })
                .collect(),
        }
    }
}

/// Draft state for the "new habit" form.
#[derive(Debug, Clone, Default)]
pub struct HabitEditor {
    name: String,
    mode: IconMode,
    selected: Icon,
}

impl HabitEditor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    pub fn selected(&self) -> &Icon {
        &self.selected
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Switching modes always resets the selection to the mode's first option.
    pub fn set_mode(&mut self, mode: IconMode) {
        self.mode = mode;
        self.selected = mode.first_option();
    }

    /// Selects option `index` of the current mode. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: usize) -> bool {
        match self.mode.options().into_iter().nth(index) {
            Some(icon) => {
                self.selected = icon;
                true
            }
            None => false,
        }
    }

    /// Hands the draft to the tracker. Blank names are dropped without a
    /// mutation; the draft resets only after the tracker accepts the habit.
    pub fn submit(&mut self, tracker: &mut HabitTracker) -> Result<Dirty, TrackerError> {
        let Some(habit) = Habit::new(&self.name, self.selected.clone()) else {
            return Ok(Dirty::NONE);
        };
        let dirty = tracker.add_habit(habit)?;
        self.reset();
        Ok(dirty)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

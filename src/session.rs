use crate::calendar::CalendarCursor;
use crate::editor::HabitEditor;
use crate::tracker::HabitTracker;
use chrono::NaiveDate;

/// Calendar navigation plus the optional per-day dialog.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub cursor: CalendarCursor,
    modal: Option<NaiveDate>,
}

impl CalendarView {
    pub fn new(cursor: CalendarCursor) -> Self {
        Self {
            cursor,
            modal: None,
        }
    }

    pub fn modal_date(&self) -> Option<NaiveDate> {
        self.modal
    }

    pub fn open_modal(&mut self, date: NaiveDate) {
        self.modal = Some(date);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }
}

/// Everything one browser session sees. Only `tracker` is persisted; the
/// editor draft, cursor and dialog start fresh on every process start.
#[derive(Debug, Clone)]
pub struct Session {
    pub tracker: HabitTracker,
    pub editor: HabitEditor,
    pub calendar: CalendarView,
}

impl Session {
    pub fn new(tracker: HabitTracker) -> Self {
        Self::starting_at(tracker, CalendarCursor::current())
    }

    pub fn starting_at(tracker: HabitTracker, cursor: CalendarCursor) -> Self {
        Self {
            tracker,
            editor: HabitEditor::default(),
            calendar: CalendarView::new(cursor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_opens_and_closes_without_touching_tracker() {
        let cursor = CalendarCursor::new(2024, 2).unwrap();
        let mut session = Session::starting_at(HabitTracker::default(), cursor);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        session.calendar.open_modal(date);
        assert_eq!(session.calendar.modal_date(), Some(date));

        session.calendar.close_modal();
        assert_eq!(session.calendar.modal_date(), None);
        assert_eq!(session.tracker, HabitTracker::default());
    }
}

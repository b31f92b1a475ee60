use crate::calendar::{DayCell, MONTH_NAMES, MonthGrid, SELECTABLE_YEARS, WEEKDAY_NAMES, date_key};
use crate::editor::{HabitEditor, IconMode};
use crate::models::{Habit, Icon, VectorIcon};
use crate::session::Session;
use crate::tracker::HabitTracker;
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};

pub fn render_index(session: &Session, grid: &MonthGrid) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Habit Tracker" }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app {
                    h1 { "Habit Tracker" }
                    div.layout {
                        section.sidebar {
                            (render_editor(&session.editor))
                            (render_habit_list(session.tracker.habits()))
                        }
                        section.calendar {
                            (render_calendar(&session.tracker, grid))
                        }
                    }
                    @if let Some(date) = session.calendar.modal_date() {
                        (render_modal(&session.tracker, date))
                    }
                }
            }
        }
    }
}

/// Resolves an icon to markup. Vector templates are only drawn here.
pub fn render_icon(icon: &Icon) -> Markup {
    match icon {
        Icon::Glyph(glyph) => html! { (glyph) },
        Icon::Vector { svg } => PreEscaped(vector_svg(*svg).to_string()),
    }
}

fn vector_svg(icon: VectorIcon) -> &'static str {
    match icon {
        VectorIcon::Star => {
            r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="gold"><polygon points="10,2 12,7.5 18,7.5 13,11.5 15,17 10,13.5 5,17 7,11.5 2,7.5 8,7.5" /></svg>"#
        }
        VectorIcon::Heart => {
            r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="red"><path d="M10 17s-6-4.35-6-8.5A3.5 3.5 0 0 1 10 5a3.5 3.5 0 0 1 6 3.5C16 12.65 10 17 10 17z" /></svg>"#
        }
        VectorIcon::Check => {
            r#"<svg width="20" height="20" viewBox="0 0 20 20"><polyline points="4,11 8,15 16,6" stroke="green" stroke-width="2" fill="none" /></svg>"#
        }
    }
}

fn render_editor(editor: &HabitEditor) -> Markup {
    let mode = editor.mode();
    let modes = [("glyph", "Emoji", IconMode::Glyph), ("vector", "SVG", IconMode::Vector)];

    // Add comes first in source order so Enter in the name field submits it.
    html! {
        form.editor method="post" action="/habits" {
            button.btn-add type="submit" { "Add Habit" }
            label.field-label for="habit-input" {
                "Habit Name " span.required { "*" }
            }
            input #habit-input name="name" type="text" placeholder="Enter habit name" value=(editor.name()) autocomplete="off";
            div.modes {
                span.field-label { "Icon:" }
                @for (value, label, option) in modes {
                    button.mode.active[option == mode] type="submit" formaction="/editor/mode" name="mode" value=(value) { (label) }
                }
            }
            div.icons {
                @for (index, icon) in mode.options().iter().enumerate() {
                    button.icon-option.selected[icon == editor.selected()] type="submit" formaction="/editor/icon" name="index" value=(index) title=(icon_title(icon)) {
                        (render_icon(icon))
                    }
                }
            }
        }
    }
}

fn icon_title(icon: &Icon) -> &str {
    match icon {
        Icon::Glyph(glyph) => glyph,
        Icon::Vector { svg } => svg.label(),
    }
}

fn render_habit_list(habits: &[Habit]) -> Markup {
    html! {
        ul.habit-list {
            @for habit in habits {
                li {
                    span.habit-label { (render_icon(&habit.icon)) " " (habit.name) }
                    form method="post" action="/habits/remove" {
                        input type="hidden" name="name" value=(habit.name);
                        button.remove type="submit" title="Remove habit" aria-label={ "Remove " (habit.name) } { "×" }
                    }
                }
            }
        }
    }
}

fn render_calendar(tracker: &HabitTracker, grid: &MonthGrid) -> Markup {
    let cursor = grid.cursor;
    html! {
        div.cal-nav {
            form method="post" action="/calendar/prev" {
                button.nav type="submit" { "Previous Month" }
            }
            div.cal-title {
                form.pickers method="post" action="/calendar/select" {
                    select name="month" onchange="this.form.submit()" {
                        @for (idx, name) in MONTH_NAMES.iter().enumerate() {
                            option value=(idx) selected[idx as u32 == cursor.month()] { (name) }
                        }
                    }
                    select name="year" onchange="this.form.submit()" {
                        @if !SELECTABLE_YEARS.contains(&cursor.year()) {
                            option value=(cursor.year()) selected { (cursor.year()) }
                        }
                        @for year in SELECTABLE_YEARS {
                            option value=(year) selected[year == cursor.year()] { (year) }
                        }
                    }
                    noscript { button type="submit" { "Go" } }
                }
                h2 { (cursor.month_name()) " " (cursor.year()) }
            }
            form method="post" action="/calendar/next" {
                button.nav type="submit" { "Next Month" }
            }
        }
        div.weekdays {
            @for name in WEEKDAY_NAMES {
                div { (name) }
            }
        }
        div.grid {
            @for cell in grid.weeks.iter().flatten() {
                @match cell {
                    Some(cell) => { (render_day(tracker, cell)) },
                    None => { div.cell.empty {} },
                }
            }
        }
    }
}

fn render_day(tracker: &HabitTracker, cell: &DayCell) -> Markup {
    html! {
        div.cell.today[cell.is_today] {
            form method="post" action="/modal/open" {
                input type="hidden" name="date" value=(cell.key);
                button.day-number type="submit" title={ "Open " (cell.key) } { (cell.day) }
            }
            (render_checklist(tracker, cell.date))
        }
    }
}

fn render_checklist(tracker: &HabitTracker, date: NaiveDate) -> Markup {
    let key = date_key(date);
    html! {
        @if tracker.habits().is_empty() {
            span.no-habits { "No habits" }
        } @else {
            div.checklist {
                @for habit in tracker.habits() {
                    form method="post" action="/completions/toggle" {
                        input type="hidden" name="habit" value=(habit.name);
                        input type="hidden" name="date" value=(key);
                        label {
                            input type="checkbox" onchange="this.form.submit()" checked[tracker.is_completed(&habit.name, date)];
                            span { (render_icon(&habit.icon)) }
                            (habit.name)
                        }
                        noscript { button type="submit" { "Toggle" } }
                    }
                }
            }
        }
    }
}

fn render_modal(tracker: &HabitTracker, date: NaiveDate) -> Markup {
    html! {
        div.modal {
            form.backdrop method="post" action="/modal/close" {
                button type="submit" aria-label="Close" {}
            }
            div.modal-content {
                h3 { "Select Habits for " (date_key(date)) }
                (render_checklist(tracker, date))
                form.modal-actions method="post" action="/modal/close" {
                    button type="submit" { "Close" }
                }
            }
        }
    }
}

const CSS: &str = r#"
:root {
  --ink: #222;
  --muted: #aaa;
  --accent: #3498f3;
  --danger: #e74c3c;
  --line: #e3e7ee;
  --today: #eaf6fd;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  min-height: 100vh;
  background: #fff;
  color: var(--ink);
  font-family: system-ui, "Segoe UI", sans-serif;
  padding: 32px 0;
}

.app {
  max-width: 1300px;
  margin: 0 auto;
  padding: 0 24px;
}

h1 {
  text-align: center;
  margin: 0 0 40px;
  font-size: 48px;
  letter-spacing: 1px;
}

.layout {
  display: flex;
  justify-content: center;
  align-items: flex-start;
  gap: 56px;
}

.sidebar {
  min-width: 320px;
  max-width: 350px;
  margin-top: 24px;
}

.editor {
  display: flex;
  flex-direction: column;
  gap: 12px;
  margin-bottom: 24px;
}

.editor .btn-add {
  order: 10;
}

.field-label {
  font-weight: 500;
  font-size: 18px;
}

.required {
  color: red;
}

#habit-input {
  width: 100%;
  padding: 10px 12px;
  border-radius: 6px;
  border: 1px solid #d1d5db;
  font-size: 16px;
}

button {
  cursor: pointer;
  font: inherit;
}

.modes,
.icons {
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
  align-items: center;
}

.mode {
  background: none;
  border: 1px solid #d1d5db;
  border-radius: 999px;
  padding: 4px 12px;
}

.mode.active {
  border-color: var(--accent);
  color: var(--accent);
}

.icon-option {
  font-size: 22px;
  padding: 4px;
  min-width: 38px;
  border: 1px solid #d1d5db;
  border-radius: 6px;
  background: #fff;
  display: flex;
  align-items: center;
  justify-content: center;
}

.icon-option.selected {
  border: 2px solid var(--accent);
}

.btn-add {
  width: 100%;
  background: var(--accent);
  color: #fff;
  border: none;
  border-radius: 6px;
  padding: 12px 0;
  font-size: 18px;
  font-weight: 600;
}

.habit-list {
  list-style: none;
  padding: 0;
  margin: 0;
}

.habit-list li {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 8px;
}

.habit-label {
  display: inline-flex;
  align-items: center;
  gap: 6px;
}

.remove {
  background: none;
  border: none;
  color: var(--danger);
  font-size: 22px;
  line-height: 1;
  width: 28px;
  height: 28px;
  border-radius: 50%;
  padding: 0;
}

.calendar {
  flex: 1;
  max-width: 950px;
}

.cal-nav {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 32px;
  margin-bottom: 16px;
}

.nav {
  background: #f3f6fa;
  border: none;
  border-radius: 8px;
  padding: 10px 28px;
  font-weight: 500;
  font-size: 18px;
  box-shadow: 0 1px 4px rgba(0, 0, 0, 0.04);
}

.cal-title {
  display: flex;
  flex-direction: column;
  align-items: center;
  min-width: 220px;
}

.pickers {
  display: flex;
  gap: 12px;
}

.pickers select {
  font-size: 18px;
  padding: 4px 8px;
  border-radius: 6px;
}

.cal-title h2 {
  margin: 0;
  font-size: 32px;
  letter-spacing: 1px;
}

.weekdays,
.grid {
  display: grid;
  grid-template-columns: repeat(7, 1fr);
}

.weekdays {
  gap: 8px;
  margin-bottom: 8px;
  font-weight: 600;
  text-align: center;
  font-size: 18px;
}

.grid {
  gap: 16px;
}

.cell {
  min-height: 120px;
  border: 1px solid var(--line);
  border-radius: 12px;
  padding: 12px;
  background: #fff;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.04);
  display: flex;
  flex-direction: column;
  align-items: flex-start;
}

.cell.today {
  background: var(--today);
}

.day-number {
  background: none;
  border: none;
  padding: 0;
  font-weight: 700;
  font-size: 20px;
  margin-bottom: 8px;
}

.checklist {
  display: flex;
  flex-direction: column;
  gap: 4px;
  width: 100%;
}

.checklist label {
  font-size: 13px;
  display: flex;
  align-items: center;
  gap: 5px;
}

.no-habits {
  color: var(--muted);
  font-size: 14px;
}

.modal {
  position: fixed;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 1000;
}

.backdrop,
.backdrop button {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  margin: 0;
  border: none;
  background: rgba(0, 0, 0, 0.3);
}

.modal-content {
  position: relative;
  background: #fff;
  padding: 24px;
  border-radius: 8px;
  min-width: 240px;
}

.modal-content h3 {
  margin-top: 0;
}

.modal-actions {
  margin-top: 16px;
  text-align: right;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarCursor, build_grid_at};

    fn session_with(names: &[&str]) -> Session {
        let mut tracker = HabitTracker::default();
        for name in names {
            tracker
                .add_habit(Habit::new(name, Icon::default()).unwrap())
                .unwrap();
        }
        Session::starting_at(tracker, CalendarCursor::new(2024, 2).unwrap())
    }

    fn render(session: &Session) -> String {
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        render_index(session, &build_grid_at(today, session.calendar.cursor)).into_string()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn empty_habit_list_shows_indicator() {
        let html = render(&session_with(&[]));
        assert!(html.contains("No habits"));
        assert!(html.contains("<h2>March 2024</h2>"));
        assert!(!html.contains(r#"class="modal""#));
    }

    #[test]
    fn checkbox_reflects_completion() {
        let mut session = session_with(&["Read"]);
        session.tracker.toggle_completion("Read", day(5));

        let html = render_checklist(&session.tracker, day(5)).into_string();
        assert!(html.contains(" checked"));
        let html = render_checklist(&session.tracker, day(6)).into_string();
        assert!(!html.contains(" checked"));
    }

    #[test]
    fn today_cell_is_marked() {
        let html = render(&session_with(&["Read"]));
        assert_eq!(html.matches(r#"class="cell today""#).count(), 1);
        assert!(html.contains(r#"value="2024-03-14""#));
    }

    #[test]
    fn habit_names_are_escaped() {
        let html = render(&session_with(&["<b>\"Run\"</b>"]));
        assert!(!html.contains("<b>\"Run\""));
        assert!(html.contains("&lt;b&gt;&quot;Run&quot;&lt;/b&gt;"));
    }

    #[test]
    fn placeholder_like_names_render_literally() {
        let html = render(&session_with(&["{{CALENDAR}}"]));
        assert!(html.contains("{{CALENDAR}}"));
        assert_eq!(html.matches("<h2>March 2024</h2>").count(), 1);
    }

    #[test]
    fn glyph_icons_are_escaped() {
        let html = render_icon(&Icon::Glyph("<script>".into())).into_string();
        assert_eq!(html, "&lt;script&gt;");
    }

    #[test]
    fn modal_renders_for_open_day() {
        let mut session = session_with(&["Read"]);
        session.calendar.open_modal(day(9));
        let html = render(&session);
        assert!(html.contains("Select Habits for 2024-03-09"));
    }

    #[test]
    fn vector_icons_render_as_svg() {
        let html = render_icon(&Icon::Vector {
            svg: VectorIcon::Heart,
        })
        .into_string();
        assert!(html.starts_with("<svg"));
        assert_eq!(render_icon(&Icon::Glyph("📚".into())).into_string(), "📚");
    }
}

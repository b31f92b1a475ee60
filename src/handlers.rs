use crate::calendar::{CalendarCursor, build_grid, parse_date_key, today_key};
use crate::editor::IconMode;
use crate::errors::AppError;
use crate::models::{
    AddHabitRequest, CalendarQuery, CalendarResponse, CompletionRecord, DayCellResponse, Habit,
    RemoveHabitRequest, ToggleRequest, ToggleResponse, TrackerSnapshot,
};
use crate::state::AppState;
use crate::tracker::Dirty;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct EditorForm {
    #[serde(default)]
    pub name: String,
    pub mode: Option<IconMode>,
    pub index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub habit: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct DateForm {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectMonthForm {
    pub month: u32,
    pub year: i32,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    let grid = build_grid(session.calendar.cursor);
    Html(render_index(&session, &grid).into_string())
}

pub async fn add_habit(
    State(state): State<AppState>,
    Form(form): Form<EditorForm>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    let session_ref = &mut *session;
    session_ref.editor.set_name(form.name);
    match session_ref.editor.submit(&mut session_ref.tracker) {
        Ok(dirty) => {
            if dirty.habits {
                info!(habits = session.tracker.habits().len(), "habit added");
            }
            state.commit(&session, dirty).await?;
        }
        Err(err) => warn!("habit not added: {err}"),
    }
    Ok(Redirect::to("/"))
}

pub async fn set_icon_mode(
    State(state): State<AppState>,
    Form(form): Form<EditorForm>,
) -> Redirect {
    let mut session = state.session.lock().await;
    session.editor.set_name(form.name);
    if let Some(mode) = form.mode {
        session.editor.set_mode(mode);
    }
    Redirect::to("/")
}

pub async fn select_icon(State(state): State<AppState>, Form(form): Form<EditorForm>) -> Redirect {
    let mut session = state.session.lock().await;
    session.editor.set_name(form.name);
    if let Some(index) = form.index {
        session.editor.select(index);
    }
    Redirect::to("/")
}

pub async fn remove_habit(
    State(state): State<AppState>,
    Form(form): Form<NameForm>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    let dirty = session.tracker.remove_habit(&form.name);
    if dirty.any() {
        info!(habit = %form.name, "habit removed");
    }
    state.commit(&session, dirty).await?;
    Ok(Redirect::to("/"))
}

pub async fn previous_month(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    session.calendar.cursor = session.calendar.cursor.previous();
    Redirect::to("/")
}

pub async fn next_month(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    session.calendar.cursor = session.calendar.cursor.next();
    Redirect::to("/")
}

pub async fn select_month(
    State(state): State<AppState>,
    Form(form): Form<SelectMonthForm>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    let current = session.calendar.cursor;
    let cursor = current
        .with_month(form.month)
        .and_then(|cursor| {
            // An out-of-range year reached by stepping stays put when only
            // the month changes.
            if form.year == current.year() {
                Some(cursor)
            } else {
                cursor.with_year(form.year)
            }
        })
        .ok_or_else(|| AppError::bad_request("month must be 0-11 and year within the selectable range"))?;
    session.calendar.cursor = cursor;
    Ok(Redirect::to("/"))
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, &form.habit, &form.date).await?;
    Ok(Redirect::to("/"))
}

pub async fn open_day(
    State(state): State<AppState>,
    Form(form): Form<DateForm>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&form.date)?;
    state.session.lock().await.calendar.open_modal(date);
    Ok(Redirect::to("/"))
}

pub async fn close_day(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.calendar.close_modal();
    Redirect::to("/")
}

pub async fn get_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    let session = state.session.lock().await;
    Json(session.tracker.habits().to_vec())
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<Vec<Habit>>, AppError> {
    let mut session = state.session.lock().await;
    if let Some(habit) = Habit::new(&payload.name, payload.icon) {
        let dirty = session.tracker.add_habit(habit)?;
        info!(habits = session.tracker.habits().len(), "habit added");
        state.commit(&session, dirty).await?;
    }
    Ok(Json(session.tracker.habits().to_vec()))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Json(payload): Json<RemoveHabitRequest>,
) -> Result<Json<TrackerSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    let dirty = session.tracker.remove_habit(&payload.name);
    if dirty.any() {
        info!(habit = %payload.name, "habit removed");
    }
    state.commit(&session, dirty).await?;
    Ok(Json(TrackerSnapshot {
        habits: session.tracker.habits().to_vec(),
        completions: session.tracker.completions().clone(),
    }))
}

pub async fn get_completions(State(state): State<AppState>) -> Json<CompletionRecord> {
    let session = state.session.lock().await;
    Json(session.tracker.completions().clone())
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response = apply_toggle(&state, &payload.habit, &payload.date).await?;
    Ok(Json(response))
}

pub async fn get_calendar(Query(query): Query<CalendarQuery>) -> Result<Json<CalendarResponse>, AppError> {
    let current = CalendarCursor::current();
    let cursor = CalendarCursor::new(
        query.year.unwrap_or_else(|| current.year()),
        query.month.unwrap_or_else(|| current.month()),
    )
    .ok_or_else(|| AppError::bad_request("month must be 0-11 and year a valid calendar year"))?;

    let grid = build_grid(cursor);
    let weeks = grid
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| {
                    cell.as_ref().map(|cell| DayCellResponse {
                        day: cell.day,
                        date: cell.key.clone(),
                        is_today: cell.is_today,
                    })
                })
                .collect()
        })
        .collect();

    Ok(Json(CalendarResponse {
        year: cursor.year(),
        month: cursor.month(),
        today: today_key(),
        weeks,
    }))
}

async fn apply_toggle(state: &AppState, habit: &str, date: &str) -> Result<ToggleResponse, AppError> {
    let day = parse_date(date)?;
    let mut session = state.session.lock().await;
    let changed = session.tracker.toggle_completion(habit, day);

    if let Some(completed) = changed {
        info!(habit, date, completed, "completion toggled");
        state
            .commit(
                &session,
                Dirty {
                    habits: false,
                    completions: true,
                },
            )
            .await?;
    }

    Ok(ToggleResponse {
        habit: habit.to_string(),
        date: date.to_string(),
        completed: changed.unwrap_or(false),
        changed: changed.is_some(),
    })
}

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    parse_date_key(date).ok_or_else(|| AppError::bad_request("date must be a YYYY-MM-DD day"))
}

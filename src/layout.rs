/// Slot layout for the appointment calendar views.
///
/// This module turns the appointment index and the current view state into
/// render-ready structures: time-slot columns for the day and week views,
/// presence grids for the month and year views, the side-panel agenda, and
/// the bookable slots offered by the booking form.
///
/// Each appointment in a time column becomes exactly one block positioned
/// against the whole column. Slot rows only record which appointments start
/// in them and which continue through them.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::calendar::{AppointmentCalendar, CalendarEntry};
use crate::datetime::{calendar_grid, is_same_day, is_today, time_slots, week_dates, Clock};
use crate::models::StatusCategory;
use crate::view::{Granularity, ViewState};

/// Bounds and scale of a time column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGrid {
    pub start_hour: u32,
    pub end_hour: u32,
    pub step_minutes: u32,
    /// Pixel height of one slot row.
    pub slot_height: f32,
}

impl SlotGrid {
    /// Day and week grids: 08:00 to 20:30 in half hours.
    pub const DAY: SlotGrid = SlotGrid {
        start_hour: 8,
        end_hour: 20,
        step_minutes: 30,
        slot_height: 60.0,
    };

    /// Booking form: 09:00 to 17:30 in half hours.
    pub const BOOKING: SlotGrid = SlotGrid {
        start_hour: 9,
        end_hour: 17,
        step_minutes: 30,
        slot_height: 60.0,
    };

    pub fn slots(&self) -> Vec<NaiveTime> {
        time_slots(self.start_hour, self.end_hour, self.step_minutes)
    }

    fn step(&self) -> i64 {
        self.step_minutes as i64
    }

    fn pixels_per_minute(&self) -> f32 {
        if self.step_minutes == 0 {
            0.0
        } else {
            self.slot_height / self.step_minutes as f32
        }
    }

    pub fn column_height(&self) -> f32 {
        self.slots().len() as f32 * self.slot_height
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        SlotGrid::DAY
    }
}

/// One row of a time column.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub start: NaiveTime,
    /// Appointments whose block begins in this row.
    pub starting: Vec<String>,
    /// Appointments that began in an earlier row and are still running.
    pub continuing: Vec<String>,
}

impl SlotRow {
    pub fn appointment_ids(&self) -> impl Iterator<Item = &str> {
        self.starting
            .iter()
            .chain(self.continuing.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.starting.is_empty() && self.continuing.is_empty()
    }
}

/// A positioned appointment rectangle inside a time column.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentBlock {
    pub appointment_id: String,
    pub label: String,
    pub status: StatusCategory,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Offset from the top of the column, in pixels.
    pub top: f32,
    pub height: f32,
    /// Horizontal lane among concurrently running appointments.
    pub lane: usize,
    pub lanes: usize,
    /// The appointment starts before the column does.
    pub clipped_start: bool,
    /// The appointment runs past the end of the column.
    pub clipped_end: bool,
}

impl AppointmentBlock {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn time_label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub slots: Vec<SlotRow>,
    pub blocks: Vec<AppointmentBlock>,
}

impl DayColumn {
    pub fn block(&self, appointment_id: &str) -> Option<&AppointmentBlock> {
        self.blocks.iter().find(|b| b.appointment_id == appointment_id)
    }

    pub fn slot(&self, start: NaiveTime) -> Option<&SlotRow> {
        self.slots.iter().find(|s| s.start == start)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: Option<NaiveDate>,
    pub has_appointments: bool,
    pub appointment_count: usize,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

impl MonthLayout {
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayDot {
    pub date: NaiveDate,
    pub has_appointments: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub first: NaiveDate,
    pub appointment_count: usize,
    pub days: Vec<DayDot>,
}

impl MonthSummary {
    pub fn month(&self) -> u32 {
        self.first.month()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearLayout {
    pub year: i32,
    pub months: Vec<MonthSummary>,
}

/// Render-ready structure for whichever granularity is active.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarView {
    Day(DayColumn),
    Week(WeekLayout),
    Month(MonthLayout),
    Year(YearLayout),
}

/// Build the structure for the current view state.
pub fn render_view(
    state: &ViewState,
    calendar: &AppointmentCalendar,
    grid: &SlotGrid,
    clock: &dyn Clock,
) -> CalendarView {
    match state.granularity() {
        Granularity::Day => CalendarView::Day(day_layout(calendar, state.anchor(), grid, clock)),
        Granularity::Week => CalendarView::Week(week_layout(calendar, state.anchor(), grid, clock)),
        Granularity::Month => CalendarView::Month(month_layout(
            calendar,
            state.anchor(),
            state.selected(),
            clock,
        )),
        Granularity::Year => CalendarView::Year(year_layout(calendar, state.anchor().year(), clock)),
    }
}

/// Lay out one day's time column.
pub fn day_layout(
    calendar: &AppointmentCalendar,
    date: NaiveDate,
    grid: &SlotGrid,
    clock: &dyn Clock,
) -> DayColumn {
    let times = grid.slots();
    let mut column = DayColumn {
        date,
        is_today: is_today(&date, clock),
        slots: Vec::with_capacity(times.len()),
        blocks: Vec::new(),
    };
    let Some(first) = times.first() else {
        return column;
    };

    let window_start = date.and_time(*first);
    let window_end = window_start + Duration::minutes(times.len() as i64 * grid.step());
    let entries = calendar.intersecting(window_start, (window_end - window_start).num_minutes());

    for (index, time) in times.iter().enumerate() {
        let slot_start = date.and_time(*time);
        let mut row = SlotRow {
            start: *time,
            starting: Vec::new(),
            continuing: Vec::new(),
        };
        for entry in entries.iter().filter(|e| e.overlaps_window(slot_start, grid.step())) {
            // Appointments already running when the column opens start in its first row.
            if entry.start >= slot_start || index == 0 {
                row.starting.push(entry.id().to_string());
            } else {
                row.continuing.push(entry.id().to_string());
            }
        }
        column.slots.push(row);
    }

    let lanes = assign_lanes(&entries);
    let ppm = grid.pixels_per_minute();
    for (entry, (lane, lane_count)) in entries.iter().zip(lanes) {
        let visible_start = entry.start.max(window_start);
        let visible_end = entry.end.min(window_end);
        column.blocks.push(AppointmentBlock {
            appointment_id: entry.id().to_string(),
            label: entry.appointment.display_name().to_string(),
            status: entry.appointment.status_category(),
            start: entry.start,
            end: entry.end,
            top: (visible_start - window_start).num_minutes() as f32 * ppm,
            height: (visible_end - visible_start).num_minutes() as f32 * ppm,
            lane,
            lanes: lane_count,
            clipped_start: entry.start < window_start,
            clipped_end: entry.end > window_end,
        });
    }

    column
}

/// Place concurrently running appointments side by side.
///
/// Entries must be sorted by start. Returns `(lane, lanes)` per entry, where
/// `lanes` is the width of the overlapping cluster the entry belongs to.
fn assign_lanes(entries: &[&CalendarEntry]) -> Vec<(usize, usize)> {
    let mut result = Vec::with_capacity(entries.len());
    let mut cluster_start = 0;
    let mut cluster_end: Option<NaiveDateTime> = None;
    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if cluster_end.map_or(false, |end| entry.start >= end) {
            close_cluster(&mut result[cluster_start..], lane_ends.len());
            cluster_start = index;
            lane_ends.clear();
        }

        let lane = match lane_ends.iter().position(|end| *end <= entry.start) {
            Some(free) => {
                lane_ends[free] = entry.end;
                free
            }
            None => {
                lane_ends.push(entry.end);
                lane_ends.len() - 1
            }
        };
        result.push((lane, 0));
        cluster_end = Some(cluster_end.map_or(entry.end, |end| end.max(entry.end)));
    }
    close_cluster(&mut result[cluster_start..], lane_ends.len());

    result
}

fn close_cluster(members: &mut [(usize, usize)], lanes: usize) {
    for member in members {
        member.1 = lanes;
    }
}

/// Lay out the Monday-to-Sunday week containing `anchor`.
pub fn week_layout(
    calendar: &AppointmentCalendar,
    anchor: NaiveDate,
    grid: &SlotGrid,
    clock: &dyn Clock,
) -> WeekLayout {
    WeekLayout {
        days: week_dates(anchor)
            .iter()
            .map(|date| day_layout(calendar, *date, grid, clock))
            .collect(),
    }
}

/// Month grid with a presence marker per day.
pub fn month_layout(
    calendar: &AppointmentCalendar,
    anchor: NaiveDate,
    selected: NaiveDate,
    clock: &dyn Clock,
) -> MonthLayout {
    let cells = calendar_grid(anchor)
        .into_iter()
        .map(|cell| match cell {
            Some(date) => {
                let appointment_count = calendar.on_date(date).len();
                MonthCell {
                    date: Some(date),
                    has_appointments: appointment_count > 0,
                    appointment_count,
                    is_today: is_today(&date, clock),
                    is_selected: is_same_day(&date, &selected),
                }
            }
            None => MonthCell {
                date: None,
                has_appointments: false,
                appointment_count: 0,
                is_today: false,
                is_selected: false,
            },
        })
        .collect();

    MonthLayout {
        year: anchor.year(),
        month: anchor.month(),
        cells,
    }
}

/// Twelve month cards with counts and day-dot strips.
pub fn year_layout(calendar: &AppointmentCalendar, year: i32, clock: &dyn Clock) -> YearLayout {
    let months = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| MonthSummary {
            first,
            appointment_count: calendar.count_in_month(year, first.month()),
            days: calendar_grid(first)
                .into_iter()
                .flatten()
                .map(|date| DayDot {
                    date,
                    has_appointments: calendar.has_appointments(date),
                    is_today: is_today(&date, clock),
                })
                .collect(),
        })
        .collect();

    YearLayout { year, months }
}

/// Appointments for the side panel on `date`, filtered by a search term.
pub fn day_agenda<'a>(
    calendar: &'a AppointmentCalendar,
    date: NaiveDate,
    search: &str,
) -> Vec<&'a CalendarEntry> {
    calendar
        .on_date(date)
        .into_iter()
        .filter(|e| e.appointment.matches_search(search))
        .collect()
}

/// A selectable time in the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSlot {
    pub slot_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_available: bool,
}

impl BookingSlot {
    pub fn label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}

/// Bookable slots for a date.
///
/// Every slot is offered as available. Existing appointments are not
/// consulted; conflicts are left to the API.
pub fn booking_slots(date: NaiveDate, grid: &SlotGrid) -> Vec<BookingSlot> {
    grid.slots()
        .into_iter()
        .map(|time| {
            let start = date.and_time(time);
            BookingSlot {
                slot_id: Uuid::new_v4().to_string(),
                start,
                end: start + Duration::minutes(grid.step()),
                is_available: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::FixedClock;
    use crate::models::{parse_appointment_date, Appointment};
    use chrono::{FixedOffset, TimeZone};
    use std::collections::HashSet;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(utc().with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap())
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn appt(id: &str, when: &str, duration: i64) -> Appointment {
        let mut a = Appointment::new(id, parse_appointment_date(when));
        a.duration = Some(duration);
        a.status = Some("confirmed".to_string());
        a
    }

    fn calendar(appointments: &[Appointment]) -> AppointmentCalendar {
        AppointmentCalendar::new(appointments, utc())
    }

    #[test]
    fn single_hour_appointment_spans_two_rows() {
        let cal = calendar(&[appt("1", "2024-03-15T09:00:00Z", 60)]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        let nine = column.slot(time(9, 0)).unwrap();
        assert_eq!(nine.starting, vec!["1"]);
        assert!(nine.continuing.is_empty());

        let half_nine = column.slot(time(9, 30)).unwrap();
        assert!(half_nine.starting.is_empty());
        assert_eq!(half_nine.continuing, vec!["1"]);

        assert!(column.slot(time(10, 0)).unwrap().is_empty());

        assert_eq!(column.blocks.len(), 1);
        let block = &column.blocks[0];
        assert_eq!(block.duration_minutes(), 60);
        assert_eq!(block.top, 120.0);
        assert_eq!(block.height, 120.0);
        assert_eq!((block.lane, block.lanes), (0, 1));
        assert_eq!(block.time_label(), "09:00 - 10:00");
        assert!(column.is_today);
    }

    #[test]
    fn ninety_minutes_touch_three_rows() {
        let cal = calendar(&[appt("x", "2024-03-15T09:00:00Z", 90)]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        let rows: Vec<NaiveTime> = column
            .slots
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.start)
            .collect();
        assert_eq!(rows, vec![time(9, 0), time(9, 30), time(10, 0)]);
    }

    #[test]
    fn off_grid_start_is_offset_within_row() {
        let cal = calendar(&[appt("x", "2024-03-15T09:15:00Z", 30)]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        assert_eq!(column.slot(time(9, 0)).unwrap().starting, vec!["x"]);
        assert_eq!(column.slot(time(9, 30)).unwrap().continuing, vec!["x"]);
        let block = column.block("x").unwrap();
        assert_eq!(block.top, 150.0);
        assert_eq!(block.height, 60.0);
    }

    #[test]
    fn duplicate_times_all_render_in_separate_lanes() {
        let cal = calendar(&[
            appt("a", "2024-03-15T10:00:00Z", 60),
            appt("b", "2024-03-15T10:00:00Z", 30),
            appt("c", "2024-03-15T10:30:00Z", 30),
            appt("d", "2024-03-15T12:00:00Z", 30),
        ]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        assert_eq!(column.blocks.len(), 4);
        let lanes = |id: &str| {
            let b = column.block(id).unwrap();
            (b.lane, b.lanes)
        };
        assert_eq!(lanes("a"), (0, 2));
        assert_eq!(lanes("b"), (1, 2));
        // "c" reuses the lane "b" freed at 10:30.
        assert_eq!(lanes("c"), (1, 2));
        assert_eq!(lanes("d"), (0, 1));

        assert_eq!(column.slot(time(10, 0)).unwrap().starting, vec!["a", "b"]);
        let half_ten: Vec<&str> = column.slot(time(10, 30)).unwrap().appointment_ids().collect();
        assert_eq!(half_ten, vec!["c", "a"]);
    }

    #[test]
    fn blocks_are_clipped_to_the_column() {
        let cal = calendar(&[
            appt("early", "2024-03-15T07:00:00Z", 120),
            appt("late", "2024-03-15T20:00:00Z", 90),
            appt("night", "2024-03-15T22:00:00Z", 30),
        ]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        let early = column.block("early").unwrap();
        assert!(early.clipped_start && !early.clipped_end);
        assert_eq!(early.top, 0.0);
        assert_eq!(early.height, 120.0);
        assert_eq!(column.slots[0].starting, vec!["early"]);
        assert_eq!(column.slots[1].continuing, vec!["early"]);

        let late = column.block("late").unwrap();
        assert!(late.clipped_end);
        assert_eq!(late.height, 60.0);
        assert_eq!(late.top + late.height, SlotGrid::DAY.column_height());

        assert!(column.block("night").is_none());
    }

    #[test]
    fn overnight_appointment_continues_next_morning() {
        let cal = calendar(&[appt("ot", "2024-03-14T20:00:00Z", 13 * 60)]);
        let column = day_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        let block = column.block("ot").unwrap();
        assert!(block.clipped_start);
        assert_eq!(block.height, 120.0);
        assert_eq!(column.slots[0].starting, vec!["ot"]);
    }

    #[test]
    fn week_columns_follow_week_dates() {
        let cal = calendar(&[
            appt("mon", "2024-03-11T09:00:00Z", 30),
            appt("sun", "2024-03-17T15:00:00Z", 30),
            appt("next", "2024-03-18T09:00:00Z", 30),
        ]);
        let week = week_layout(&cal, date(2024, 3, 15), &SlotGrid::DAY, &clock());

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].date, date(2024, 3, 11));
        assert!(week.days[0].block("mon").is_some());
        assert!(week.days[6].block("sun").is_some());
        assert!(week.days.iter().all(|d| d.block("next").is_none()));
        assert!(week.days[4].is_today);
    }

    #[test]
    fn week_block_click_drills_into_day() {
        let cal = calendar(&[appt("w", "2024-03-13T11:00:00Z", 30)]);
        let mut state = ViewState::new(date(2024, 3, 15), Granularity::Week);
        let CalendarView::Week(week) = render_view(&state, &cal, &SlotGrid::DAY, &clock()) else {
            panic!("expected week view");
        };

        let block = week.days[2].block("w").unwrap();
        state.drill_down(block.start.date());

        let CalendarView::Day(day) = render_view(&state, &cal, &SlotGrid::DAY, &clock()) else {
            panic!("expected day view");
        };
        assert_eq!(day.date, date(2024, 3, 13));
        assert!(day.block("w").is_some());
    }

    #[test]
    fn empty_leap_february() {
        let cal = calendar(&[]);
        let month = month_layout(&cal, date(2024, 2, 1), date(2024, 3, 15), &clock());

        assert_eq!((month.year, month.month), (2024, 2));
        assert_eq!(month.cells.len() % 7, 0);
        assert!(month.cells.iter().any(|c| c.date == Some(date(2024, 2, 29))));
        assert!(month.cells.iter().all(|c| !c.has_appointments));
        assert_eq!(month.weeks().count(), month.cells.len() / 7);
    }

    #[test]
    fn month_cells_mark_presence_today_and_selection() {
        let cal = calendar(&[
            appt("a", "2024-03-04T09:00:00Z", 30),
            appt("b", "2024-03-04T10:00:00Z", 30),
        ]);
        let month = month_layout(&cal, date(2024, 3, 1), date(2024, 3, 20), &clock());
        let cell = |d: NaiveDate| month.cells.iter().find(|c| c.date == Some(d)).unwrap();

        assert!(cell(date(2024, 3, 4)).has_appointments);
        assert_eq!(cell(date(2024, 3, 4)).appointment_count, 2);
        assert!(!cell(date(2024, 3, 5)).has_appointments);
        assert!(cell(date(2024, 3, 15)).is_today);
        assert!(cell(date(2024, 3, 20)).is_selected);
    }

    #[test]
    fn year_cards_count_per_month() {
        let cal = calendar(&[
            appt("a", "2024-01-10T09:00:00Z", 30),
            appt("b", "2024-01-11T09:00:00Z", 30),
            appt("c", "2024-07-04T09:00:00Z", 30),
            appt("d", "2023-07-04T09:00:00Z", 30),
        ]);
        let year = year_layout(&cal, 2024, &clock());

        assert_eq!(year.months.len(), 12);
        assert_eq!(year.months[0].appointment_count, 2);
        assert_eq!(year.months[6].appointment_count, 1);
        assert_eq!(year.months[1].appointment_count, 0);
        assert_eq!(year.months[1].days.len(), 29);
        assert_eq!(year.months[6].month(), 7);
        assert!(year.months[6].days[3].has_appointments);
    }

    #[test]
    fn undated_appointments_never_bucketed() {
        let mut undated = Appointment::new("ghost", None);
        undated.duration = Some(600);
        let mut garbled = appt("garbled", "15/03/2024 09:00", 60);
        garbled.patient_name = Some("Ghost".to_string());
        let cal = calendar(&[undated, garbled]);
        let c = clock();

        for granularity in Granularity::ALL {
            let mut state = ViewState::new(date(2024, 3, 15), granularity);
            state.pick_date(date(2024, 3, 15));
            match render_view(&state, &cal, &SlotGrid::DAY, &c) {
                CalendarView::Day(day) => {
                    assert!(day.blocks.is_empty());
                    assert!(day.slots.iter().all(SlotRow::is_empty));
                }
                CalendarView::Week(week) => {
                    assert!(week.days.iter().all(|d| d.blocks.is_empty()));
                }
                CalendarView::Month(month) => {
                    assert!(month.cells.iter().all(|cell| !cell.has_appointments));
                }
                CalendarView::Year(year) => {
                    assert!(year.months.iter().all(|m| m.appointment_count == 0));
                }
            }
        }
        assert!(day_agenda(&cal, date(2024, 3, 15), "").is_empty());
    }

    #[test]
    fn agenda_search_filters_by_patient() {
        let mut smith = appt("s", "2024-03-20T09:00:00Z", 30);
        smith.patient_name = Some("John Smith".to_string());
        let mut doe = appt("d", "2024-03-20T10:00:00Z", 30);
        doe.patient_name = Some("Jane Doe".to_string());
        let mut other_day = appt("o", "2024-03-21T09:00:00Z", 30);
        other_day.patient_name = Some("Sam Smith".to_string());
        let cal = calendar(&[smith, doe, other_day]);

        let mut state = ViewState::new(date(2024, 3, 15), Granularity::Month);
        state.pick_date(date(2024, 3, 20));
        let panel = state.panel_date(clock().today());

        let ids: Vec<&str> = day_agenda(&cal, panel, "smith").iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["s"]);
        assert_eq!(day_agenda(&cal, panel, "").len(), 2);
    }

    #[test]
    fn booking_slots_are_all_available() {
        let slots = booking_slots(date(2024, 3, 15), &SlotGrid::BOOKING);

        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0].label(), "09:00");
        assert_eq!(slots[16].label(), "17:00");
        assert!(slots.iter().all(|s| s.is_available));
        assert!(slots.iter().all(|s| s.end - s.start == Duration::minutes(30)));

        let ids: HashSet<&str> = slots.iter().map(|s| s.slot_id.as_str()).collect();
        assert_eq!(ids.len(), slots.len());
    }

    #[test]
    fn zero_step_grid_is_empty() {
        let grid = SlotGrid {
            step_minutes: 0,
            ..SlotGrid::DAY
        };
        let cal = calendar(&[appt("1", "2024-03-15T09:00:00Z", 60)]);
        let column = day_layout(&cal, date(2024, 3, 15), &grid, &clock());
        assert!(column.slots.is_empty());
        assert!(column.blocks.is_empty());
    }
}

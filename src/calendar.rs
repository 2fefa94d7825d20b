/// Appointment calendar index.
///
/// This module provides the AppointmentCalendar which holds the dated
/// appointments in wall-clock time, sorted by start, and answers the
/// date-bucketed queries the views are built from. Appointments without a
/// usable start never enter the index.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::datetime::{end_after, overlaps};
use crate::models::{Appointment, StatusCategory};

/// An appointment pinned to wall-clock time in the display offset.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub appointment: Appointment,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEntry {
    pub fn id(&self) -> &str {
        &self.appointment.id
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check whether this appointment intersects `[start, start + minutes)`.
    pub fn overlaps_window(&self, start: NaiveDateTime, minutes: i64) -> bool {
        overlaps(self.start, self.duration_minutes(), start, minutes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentCalendar {
    entries: Vec<CalendarEntry>,
    unscheduled: usize,
}

impl AppointmentCalendar {
    /// Index the appointments, converting each start into `offset`.
    pub fn new(appointments: &[Appointment], offset: FixedOffset) -> Self {
        let mut entries = Vec::with_capacity(appointments.len());
        let mut unscheduled = 0;

        for appointment in appointments {
            let Some(scheduled) = appointment.appointment_date else {
                unscheduled += 1;
                continue;
            };
            let start = scheduled.with_timezone(&offset).naive_local();
            let end = end_after(start, appointment.duration_minutes());
            if end <= start {
                warn!("appointment {} ends out of range, leaving it off the calendar", appointment.id);
                unscheduled += 1;
                continue;
            }
            entries.push(CalendarEntry {
                appointment: appointment.clone(),
                start,
                end,
            });
        }

        entries.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id().cmp(b.id())));

        if unscheduled > 0 {
            debug!("{} appointments have no usable date and are left off the calendar", unscheduled);
        }

        AppointmentCalendar {
            entries,
            unscheduled,
        }
    }

    /// All dated appointments sorted by start time.
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appointments dropped for lack of a usable date or an end in range.
    pub fn unscheduled_count(&self) -> usize {
        self.unscheduled
    }

    pub fn get(&self, appointment_id: &str) -> Option<&CalendarEntry> {
        self.entries.iter().find(|e| e.id() == appointment_id)
    }

    /// Appointments starting on `date`.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&CalendarEntry> {
        self.entries.iter().filter(|e| e.date() == date).collect()
    }

    pub fn has_appointments(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.date() == date)
    }

    pub fn count_in_month(&self, year: i32, month: u32) -> usize {
        self.entries
            .iter()
            .filter(|e| e.start.year() == year && e.start.month() == month)
            .count()
    }

    /// Appointments intersecting `[start, start + minutes)`.
    pub fn intersecting(&self, start: NaiveDateTime, minutes: i64) -> Vec<&CalendarEntry> {
        self.entries
            .iter()
            .filter(|e| e.overlaps_window(start, minutes))
            .collect()
    }

    /// The next `limit` appointments starting at or after `now`, skipping
    /// cancelled ones.
    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> Vec<&CalendarEntry> {
        self.entries
            .iter()
            .filter(|e| e.start >= now)
            .filter(|e| e.appointment.status_category() != StatusCategory::Cancelled)
            .take(limit)
            .collect()
    }

    /// Per-status tallies for appointments starting on `date`.
    pub fn status_counts(&self, date: NaiveDate) -> BTreeMap<StatusCategory, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.on_date(date) {
            *counts.entry(entry.appointment.status_category()).or_insert(0) += 1;
        }
        counts
    }
}

impl std::fmt::Display for AppointmentCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AppointmentCalendar(scheduled={}, unscheduled={})",
            self.entries.len(),
            self.unscheduled
        )
    }
}

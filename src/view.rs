/// View-mode state for the appointment calendar.
///
/// Holds the active granularity, the anchor date the grid is aligned on,
/// and the date whose appointments fill the side panel. Only navigation
/// actions mutate it.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::datetime::{add_months_clamped, first_of_month, is_same_month, week_dates, with_day_clamped};
use crate::error::ViewError;

/// Calendar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn name(&self) -> &str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().trim() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(format!(
                "Invalid view: '{}'. Must be one of: day, week, month, year",
                value
            )),
        }
    }
}

/// Which date the side panel follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// Always the real-world current date.
    Today,
    /// The date the user last picked.
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    anchor: NaiveDate,
    granularity: Granularity,
    selected: NaiveDate,
    panel_mode: PanelMode,
    // Day-of-month the user navigated from; month and year steps clamp to
    // it so that Jan 31 -> Feb 29 -> Mar 31 round-trips.
    preferred_day: u32,
}

impl ViewState {
    pub fn new(today: NaiveDate, granularity: Granularity) -> Self {
        ViewState {
            anchor: today,
            granularity,
            selected: today,
            panel_mode: PanelMode::Today,
            preferred_day: today.day(),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn panel_mode(&self) -> PanelMode {
        self.panel_mode
    }

    /// The date whose appointments belong in the side panel.
    pub fn panel_date(&self, today: NaiveDate) -> NaiveDate {
        match self.panel_mode {
            PanelMode::Today => today,
            PanelMode::Selected => self.selected,
        }
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    fn step(&mut self, direction: i32) {
        match self.granularity {
            Granularity::Day => self.shift_days(direction as i64),
            Granularity::Week => self.shift_days(7 * direction as i64),
            Granularity::Month => self.shift_months(direction),
            Granularity::Year => self.shift_months(12 * direction),
        }
        debug!(
            "navigated {} {} to anchor {}",
            if direction < 0 { "back" } else { "forward" },
            self.granularity,
            self.anchor
        );
    }

    fn shift_days(&mut self, days: i64) {
        let delta = Duration::days(days);
        if let (Some(anchor), Some(selected)) = (
            self.anchor.checked_add_signed(delta),
            self.selected.checked_add_signed(delta),
        ) {
            self.anchor = anchor;
            self.selected = selected;
            self.preferred_day = anchor.day();
        }
    }

    fn shift_months(&mut self, months: i32) {
        let target = add_months_clamped(first_of_month(self.anchor), months);
        self.anchor =
            with_day_clamped(target.year(), target.month(), self.preferred_day).unwrap_or(target);
    }

    /// Jump back to today and make the panel follow it again.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.anchor = today;
        self.selected = today;
        self.preferred_day = today.day();
        self.panel_mode = PanelMode::Today;
        debug!("returned to today ({})", today);
    }

    /// Select a date for the side panel.
    ///
    /// Day and week views follow the picked date. Month and year views only
    /// move when the date lies outside what they currently show.
    pub fn pick_date(&mut self, date: NaiveDate) {
        self.selected = date;
        self.panel_mode = PanelMode::Selected;

        let visible = match self.granularity {
            Granularity::Day | Granularity::Week => false,
            Granularity::Month => is_same_month(&date, &self.anchor),
            Granularity::Year => date.year() == self.anchor.year(),
        };
        if !visible {
            self.anchor = date;
            self.preferred_day = date.day();
        }
        debug!("picked {} (anchor {})", date, self.anchor);
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    /// Open a month from the year view.
    pub fn pick_month(&mut self, year: i32, month: u32) -> Result<(), ViewError> {
        if self.granularity != Granularity::Year {
            return Err(ViewError::NotInYearView(self.granularity));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ViewError::InvalidMonth(month))?;

        self.anchor = first;
        self.selected = first;
        self.preferred_day = 1;
        self.panel_mode = PanelMode::Selected;
        self.granularity = Granularity::Month;
        Ok(())
    }

    /// Open the day view on a date, as when clicking a week-view block.
    pub fn drill_down(&mut self, date: NaiveDate) {
        self.granularity = Granularity::Day;
        self.anchor = date;
        self.selected = date;
        self.preferred_day = date.day();
        self.panel_mode = PanelMode::Selected;
    }

    /// First and last date (inclusive) covered by the current view.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        match self.granularity {
            Granularity::Day => (self.anchor, self.anchor),
            Granularity::Week => {
                let week = week_dates(self.anchor);
                (week[0], week[6])
            }
            Granularity::Month => {
                let first = first_of_month(self.anchor);
                (first, add_months_clamped(first, 1).pred_opt().unwrap_or(first))
            }
            Granularity::Year => {
                let first = self.anchor.with_ordinal(1).unwrap_or(self.anchor);
                let last = NaiveDate::from_ymd_opt(self.anchor.year(), 12, 31).unwrap_or(first);
                (first, last)
            }
        }
    }

    /// Heading text for the current view.
    pub fn title(&self) -> String {
        match self.granularity {
            Granularity::Day => self.anchor.format("%A, %B %-d, %Y").to_string(),
            Granularity::Week => {
                let (first, last) = self.visible_range();
                format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
            }
            Granularity::Month => self.anchor.format("%B %Y").to_string(),
            Granularity::Year => self.anchor.format("%Y").to_string(),
        }
    }
}

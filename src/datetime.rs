/// Date and time arithmetic for the calendar views.
///
/// Everything here is pure. Week-of-month grids start on Sunday while the
/// week view runs Monday to Sunday; both conventions are what the clinic
/// front desk is used to and are kept separate on purpose.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
};

/// Source of "now". Injected so that today-relative behaviour is testable.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Build a date, pulling `day` back to the last day of the month if it
/// would overflow.
pub fn with_day_clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Step a date by whole months. Jan 31 + 1 month is Feb 28/29, never March.
pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let stepped = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    stepped.unwrap_or(date)
}

/// Month grid in complete Sunday-start weeks.
///
/// Cells before the 1st and after the last day are `None`. The 1st sits at
/// the index equal to its weekday counted from Sunday.
pub fn calendar_grid(month_anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(month_anchor);
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first.year(), first.month()) as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend(first.iter_days().take(days).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

/// The Monday-to-Sunday week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Slot start times from `start_hour:00` through `end_hour:00` inclusive,
/// `step_minutes` apart. Starts past midnight are dropped.
pub fn time_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<NaiveTime> {
    if step_minutes == 0 || start_hour >= 24 || start_hour > end_hour {
        return Vec::new();
    }

    let last = (end_hour.min(24) * 60).min(24 * 60 - 1);
    (start_hour * 60..=last)
        .step_by(step_minutes as usize)
        .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
        .collect()
}

/// Half-open interval intersection between an appointment and a slot.
///
/// Every bucketing decision in the day, week, month and year views goes
/// through this predicate.
pub fn overlaps(
    appt_start: NaiveDateTime,
    appt_duration_minutes: i64,
    slot_start: NaiveDateTime,
    slot_duration_minutes: i64,
) -> bool {
    let appt_end = end_after(appt_start, appt_duration_minutes);
    let slot_end = end_after(slot_start, slot_duration_minutes);
    appt_start < slot_end && appt_end > slot_start
}

/// `start + minutes`, saturating at the ends of the representable range.
pub fn end_after(start: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    Duration::try_minutes(minutes)
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(if minutes < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Compare calendar date components only.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

pub fn is_today<D: Datelike>(date: &D, clock: &dyn Clock) -> bool {
    is_same_day(date, &clock.today())
}

/// True when both dates fall in the same calendar month.
pub fn is_same_month<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

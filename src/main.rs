/// Command-line interface for the clinic appointment calendar.
///
/// This module provides an interactive menu for browsing appointments in
/// day, week, month and year views, searching the selected day's list, and
/// listing bookable slots.

use chrono::{Datelike, NaiveDate};
use clap::Parser;
use log::info;
use std::io::{self, Write};

use clinicboard::calendar::AppointmentCalendar;
use clinicboard::client::{AppointmentApi, AppointmentStore, HttpAppointmentApi};
use clinicboard::config::Config;
use clinicboard::datetime::{Clock, SystemClock};
use clinicboard::layout::{
    booking_slots, day_agenda, render_view, CalendarView, DayColumn, MonthLayout, SlotGrid,
    WeekLayout, YearLayout,
};
use clinicboard::view::{Granularity, PanelMode, ViewState};

const UPCOMING_LIMIT: usize = 5;

struct CalendarCLI<A: AppointmentApi, C: Clock> {
    api: A,
    clock: C,
    store: AppointmentStore,
    state: ViewState,
    grid: SlotGrid,
    search: String,
    running: bool,
}

impl<A: AppointmentApi, C: Clock> CalendarCLI<A, C> {
    fn new(api: A, clock: C, granularity: Granularity, grid: SlotGrid) -> Self {
        let today = clock.today();
        CalendarCLI {
            api,
            clock,
            store: AppointmentStore::new(),
            state: ViewState::new(today, granularity),
            grid,
            search: String::new(),
            running: true,
        }
    }

    fn calendar(&self) -> AppointmentCalendar {
        self.store.calendar(*self.clock.now().offset())
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       CLINIC APPOINTMENT CALENDAR");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ({} view) ---", self.state.granularity());
        println!("1. Previous");
        println!("2. Next");
        println!("3. Today");
        println!("4. Pick date");
        println!("5. Change view");
        println!("6. Open month (year view)");
        println!("7. Open appointment day (week view)");
        println!("8. Search appointments");
        println!("9. Refresh appointments");
        println!("10. Booking slots");
        println!("11. Upcoming appointments");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(default.unwrap_or("").to_string());
        }
        let input = input.trim();

        if input.is_empty() {
            Ok(default.unwrap_or("").to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i32>) -> io::Result<i32> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<i32>() {
                return Ok(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn get_date_input(&self, prompt: &str, default: NaiveDate) -> io::Result<Option<NaiveDate>> {
        let default_str = default.format("%Y-%m-%d").to_string();
        let input = self.get_input(prompt, Some(&default_str))?;
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => {
                println!("Dates must look like 2024-03-15");
                Ok(None)
            }
        }
    }

    fn render(&self) {
        let calendar = self.calendar();
        println!("\n=== {} ===", self.state.title());

        if self.store.is_loading() {
            println!("Loading appointments...");
            return;
        }
        if let Some(message) = self.store.error() {
            println!("!! {}", message);
        }

        match render_view(&self.state, &calendar, &self.grid, &self.clock) {
            CalendarView::Day(column) => print_day(&column),
            CalendarView::Week(week) => print_week(&week),
            CalendarView::Month(month) => print_month(&month),
            CalendarView::Year(year) => print_year(&year),
        }

        self.render_panel(&calendar);
    }

    fn render_panel(&self, calendar: &AppointmentCalendar) {
        let date = self.state.panel_date(self.clock.today());
        let heading = match self.state.panel_mode() {
            PanelMode::Today => "Today's appointments".to_string(),
            PanelMode::Selected => format!("Appointments for {}", date.format("%A, %Y-%m-%d")),
        };
        println!("\n--- {} ---", heading);
        if !self.search.is_empty() {
            println!("(search: \"{}\")", self.search);
        }

        let agenda = day_agenda(calendar, date, &self.search);
        if agenda.is_empty() {
            println!("  No appointments");
            return;
        }

        for entry in agenda {
            let appointment = &entry.appointment;
            println!(
                "  {} - {}  {} ({})",
                entry.start.format("%H:%M"),
                entry.end.format("%H:%M"),
                appointment.display_name(),
                appointment.status_category().name()
            );
            if let Some(notes) = appointment.notes.as_deref().filter(|n| !n.is_empty()) {
                println!("    Notes: {}", notes);
            }
            if let Some(link) = appointment.meet_link.as_deref().filter(|l| !l.is_empty()) {
                println!("    Meet: {}", link);
            }
        }

        let counts: Vec<String> = calendar
            .status_counts(date)
            .iter()
            .map(|(status, count)| {
                let text = format!("{} {}", count, status.name().to_lowercase());
                paint(&text, status.color())
            })
            .collect();
        println!("  Total: {}", counts.join(", "));
    }

    fn pick_date(&mut self) -> io::Result<()> {
        if let Some(date) = self.get_date_input("Date", self.state.selected())? {
            self.state.pick_date(date);
        }
        Ok(())
    }

    fn change_view(&mut self) -> io::Result<()> {
        println!("\nViews:");
        for (i, granularity) in Granularity::ALL.iter().enumerate() {
            println!("  {}. {}", i + 1, granularity);
        }
        let choice = self.get_int_input("Select view", Some(1))?;
        match usize::try_from(choice).ok().and_then(|c| c.checked_sub(1)) {
            Some(index) if index < Granularity::ALL.len() => {
                self.state.set_granularity(Granularity::ALL[index]);
            }
            _ => println!("Invalid choice"),
        }
        Ok(())
    }

    fn open_month(&mut self) -> io::Result<()> {
        let month = self.get_int_input("Month (1-12)", Some(self.state.anchor().month() as i32))?;
        let year = self.state.anchor().year();
        if let Err(e) = self.state.pick_month(year, month.max(0) as u32) {
            println!("{}", e);
        }
        Ok(())
    }

    fn open_appointment_day(&mut self) -> io::Result<()> {
        let calendar = self.calendar();
        let CalendarView::Week(week) = render_view(&self.state, &calendar, &self.grid, &self.clock)
        else {
            println!("\nSwitch to the week view first (option 5)");
            return Ok(());
        };

        let blocks: Vec<_> = week.days.iter().flat_map(|d| d.blocks.iter()).collect();
        if blocks.is_empty() {
            println!("\nNo appointments this week");
            return Ok(());
        }

        for (i, block) in blocks.iter().enumerate() {
            println!(
                "  {}. {} {} {}",
                i + 1,
                block.start.format("%a %d"),
                block.time_label(),
                block.label
            );
        }
        let choice = self.get_int_input("Select appointment (0 to go back)", Some(0))?;
        if choice > 0 && (choice as usize) <= blocks.len() {
            let block = blocks[choice as usize - 1];
            if let Some(entry) = calendar.get(&block.appointment_id) {
                println!(
                    "\nOpening {} on {} ({} min)",
                    entry.appointment.display_name(),
                    entry.date().format("%A, %Y-%m-%d"),
                    entry.duration_minutes()
                );
            }
            self.state.drill_down(block.start.date());
        }
        Ok(())
    }

    fn set_search(&mut self) -> io::Result<()> {
        self.search = self.get_input("Search name, email or notes (blank to clear)", None)?;
        Ok(())
    }

    async fn refresh(&mut self) {
        self.store.refresh(&self.api).await;
        if self.store.error().is_none() {
            println!("\nLoaded {} appointments", self.store.appointments().len());
        }
    }

    fn show_booking_slots(&self) {
        let date = self.state.panel_date(self.clock.today());
        let slots = booking_slots(date, &SlotGrid::BOOKING);
        println!("\n--- Booking slots for {} ---", date.format("%A, %Y-%m-%d"));
        for row in slots.chunks(6) {
            let labels: Vec<String> = row
                .iter()
                .map(|s| format!("{}{}", s.label(), if s.is_available { "" } else { " (taken)" }))
                .collect();
            println!("  {}", labels.join("  "));
        }
    }

    fn show_upcoming(&self) {
        let calendar = self.calendar();
        let upcoming = calendar.upcoming(self.clock.now().naive_local(), UPCOMING_LIMIT);
        println!("\n--- Upcoming appointments ---");
        if upcoming.is_empty() {
            println!("  None scheduled");
        }
        for entry in upcoming {
            println!(
                "  {}  {} ({})",
                entry.start.format("%Y-%m-%d %H:%M"),
                entry.appointment.display_name(),
                entry.appointment.status_category().name()
            );
        }
    }

    async fn run(&mut self) -> io::Result<()> {
        self.print_header();
        self.store.load(&self.api).await;

        while self.running {
            self.render();
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(0))?;
            let today = self.clock.today();

            match choice {
                1 => self.state.previous(),
                2 => self.state.next(),
                3 => self.state.go_to_today(today),
                4 => self.pick_date()?,
                5 => self.change_view()?,
                6 => self.open_month()?,
                7 => self.open_appointment_day()?,
                8 => self.set_search()?,
                9 => self.refresh().await,
                10 => self.show_booking_slots(),
                11 => self.show_upcoming(),
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
        Ok(())
    }
}

fn print_day(column: &DayColumn) {
    for slot in &column.slots {
        let mut line = format!("  {} |", slot.start.format("%H:%M"));
        for id in &slot.starting {
            if let Some(block) = column.block(id) {
                line.push_str(&format!(
                    " [{} {} {}]",
                    block.time_label(),
                    block.label,
                    paint(block.status.name(), block.status.color())
                ));
            }
        }
        for id in &slot.continuing {
            if let Some(block) = column.block(id) {
                line.push_str(&format!(" [.. {}]", block.label));
            }
        }
        println!("{}", line);
    }
}

/// Wrap `text` in a 24-bit ANSI foreground colour given as `#rrggbb`.
fn paint(text: &str, hex: &str) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
        _ => text.to_string(),
    }
}

fn print_week(week: &WeekLayout) {
    let mut header = String::from("        ");
    for day in &week.days {
        let marker = if day.is_today { "*" } else { " " };
        header.push_str(&format!("{}{:<7}", marker, day.date.format("%a %d")));
    }
    println!("{}", header);

    let rows = week.days.first().map(|d| d.slots.len()).unwrap_or(0);
    for row in 0..rows {
        let mut line = format!("  {} ", week.days[0].slots[row].start.format("%H:%M"));
        for day in &week.days {
            let slot = &day.slots[row];
            let cell = match (slot.starting.len(), slot.continuing.len()) {
                (0, 0) => ".".to_string(),
                (0, _) => "|".to_string(),
                (n, _) => n.to_string(),
            };
            line.push_str(&format!(" {:<7}", cell));
        }
        println!("{}", line);
    }
}

fn print_month(month: &MonthLayout) {
    println!("  Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for week in month.weeks() {
        let mut line = String::from(" ");
        for cell in week {
            let text = match cell.date {
                Some(date) => {
                    let (open, close) = if cell.is_selected {
                        ('[', ']')
                    } else if cell.is_today {
                        ('(', ')')
                    } else {
                        (' ', ' ')
                    };
                    let dot = if cell.has_appointments { '*' } else { ' ' };
                    format!("{}{:>2}{}{}", open, date.day(), dot, close)
                }
                None => "     ".to_string(),
            };
            line.push_str(&text);
        }
        println!("{}", line);
    }
}

fn print_year(year: &YearLayout) {
    for summary in &year.months {
        let dots: String = summary
            .days
            .iter()
            .map(|d| match (d.is_today, d.has_appointments) {
                (true, _) => '@',
                (false, true) => '*',
                (false, false) => '.',
            })
            .collect();
        println!(
            "  {:>2}. {:<10} {:>3} appts  {}",
            summary.month(),
            summary.first.format("%B"),
            summary.appointment_count,
            dots
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    let grid = config.slot_grid().map_err(anyhow::Error::msg)?;
    let api = HttpAppointmentApi::new(&config.api_url, config.token.clone());
    info!("using appointments endpoint {}", api.endpoint());

    let mut cli = CalendarCLI::new(api, SystemClock, config.view, grid);
    cli.run().await?;
    Ok(())
}

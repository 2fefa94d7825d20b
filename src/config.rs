/// Command-line and environment configuration.

use clap::Parser;

use crate::layout::SlotGrid;
use crate::view::Granularity;

#[derive(Debug, Clone, Parser)]
#[command(name = "clinicboard", version, about = "Clinic appointment calendar")]
pub struct Config {
    /// Base URL of the clinic API.
    #[arg(long, env = "CLINIC_API_URL", default_value = "http://localhost:5000/api")]
    pub api_url: String,

    /// Bearer token sent with API requests.
    #[arg(long, env = "CLINIC_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Initial calendar view: day, week, month or year.
    #[arg(long, default_value = "day")]
    pub view: Granularity,

    /// First hour shown in the day and week grids.
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(0..24))]
    pub day_start: u32,

    /// Last slot hour shown in the day and week grids.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(0..24))]
    pub day_end: u32,

    /// Slot length in minutes.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(5..=120))]
    pub slot_minutes: u32,

    /// Pixel height of one slot row.
    #[arg(long, default_value_t = 60.0)]
    pub slot_height: f32,
}

impl Config {
    /// The day/week grid described by this configuration.
    pub fn slot_grid(&self) -> Result<SlotGrid, String> {
        if self.day_end < self.day_start {
            return Err(format!(
                "day end ({}) must not be before day start ({})",
                self.day_end, self.day_start
            ));
        }
        if self.slot_height.is_nan() || self.slot_height <= 0.0 {
            return Err("slot height must be positive".to_string());
        }

        Ok(SlotGrid {
            start_hour: self.day_start,
            end_hour: self.day_end,
            step_minutes: self.slot_minutes,
            slot_height: self.slot_height,
        })
    }
}

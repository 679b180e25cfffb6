pub mod output;
pub mod render;

pub use output::{day_rows, total_cost, write_csv, write_json, DayRow};
pub use render::{budget_summary, display_day_plans, display_units};

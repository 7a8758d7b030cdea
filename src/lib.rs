pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod items;
pub mod lambda;
pub mod logging;
pub mod menu;
pub mod normalize;
pub mod parser;
pub mod routes;
pub mod segment;
pub mod source;

pub use config::Config;
pub use error::{MenuError, Result};
pub use menu::{MenuItem, WeekMenu, Weekday};
pub use parser::{ParseOutcome, Strategy, parse_week_lines, parse_week_lines_with_strategy};
pub use source::{WeekSnapshot, scrape_week};

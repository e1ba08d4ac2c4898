//! PocketPlan - recurring expense tracker and purchase savings planner
//!
//! Users record recurring expenses and income, see what falls due soon,
//! track which bills are paid each month, and plan purchases with a
//! month-by-month savings projection.
//!
//! # Architecture
//!
//! - `models`: core data types (expenses, incomes, payments, goals, snapshot)
//! - `calendar`: due-day arithmetic and the injectable clock
//! - `services`: aggregation, notification scan, savings projection, goals
//! - `storage`: snapshot persistence (remote object storage, local file)
//! - `analysis`: prompts and parsing for the text-generation backend
//! - `tracker`: the state holder every mutation goes through
//! - `config`, `cli`, `display`: the terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketplan::config::{PocketPaths, Settings};
//!
//! let paths = PocketPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod analysis;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tracker;

pub use error::{PocketError, PocketResult};
pub use tracker::Tracker;

use std::sync::Once;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "POCKETPLAN_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber (idempotent)
///
/// The filter comes from `POCKETPLAN_LOG` and defaults to `warn`. Output goes
/// to stderr so command output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

mod calendar;
mod catalog;
mod config;
mod game;
mod scheduler;

pub use calendar::{day_index, day_index_at, edition, julian_day_number};
pub use catalog::{Catalog, Entry, Error as CatalogError};
pub use config::{Config, Error as ConfigError};
pub use game::{Error, Game, QueryResult, TargetResult};
pub use scheduler::{Error as SchedulerError, Scheduler};

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;

use crate::{
    calendar,
    catalog::{Catalog, Entry},
    config::Config,
    scheduler::{self, Scheduler},
};

/// A chosen target. `edition` is set only for date-derived picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetResult<'a> {
    pub entry: &'a Entry,
    pub edition: Option<i64>,
}

/// Entries matching a guess, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult<'a> {
    pub matches: Vec<&'a Entry>,
}

/// The request surface of the puzzle: a catalog, its scheduler, and the epoch
/// editions are counted from. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Catalog,
    scheduler: Scheduler,
    epoch: NaiveDate,
}

impl Game {
    /// Validate `catalog` and derive its scheduler.
    ///
    /// Fails when the catalog has fewer than two entries or its size cannot be
    /// scheduled without early repeats.
    pub fn new(catalog: Catalog, epoch: NaiveDate) -> Result<Self, Error> {
        if catalog.len() < 2 {
            return Err(Error::InvalidCatalog {
                size: catalog.len(),
            });
        }
        let scheduler = Scheduler::new(catalog.len()).map_err(|err| {
            tracing::error!(%err, "catalog cannot be scheduled");
            err
        })?;
        tracing::info!(
            entries = catalog.len(),
            multiplier = scheduler.multiplier(),
            %epoch,
            "game ready"
        );
        Ok(Self {
            catalog,
            scheduler,
            epoch,
        })
    }

    /// Prepare `catalog` according to `config`, then construct the game.
    pub fn with_config(catalog: Catalog, config: &Config) -> Result<Self, Error> {
        Self::new(catalog.prepare(config), config.epoch)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// The target scheduled for the UTC date of `now`.
    pub fn today(&self, now: DateTime<Utc>) -> TargetResult<'_> {
        self.on(now.date_naive())
    }

    /// The target scheduled for `date`.
    pub fn on(&self, date: NaiveDate) -> TargetResult<'_> {
        let day = calendar::day_index(date);
        let slot = self.scheduler.nth(day);
        let edition = calendar::edition(self.epoch, date);
        tracing::debug!(%date, day, slot, edition, "scheduled target");
        TargetResult {
            entry: &self.catalog.entries()[slot],
            edition: Some(edition),
        }
    }

    /// A uniformly chosen target, unrelated to the date.
    pub fn random(&self, rng: &mut impl Rng) -> Result<TargetResult<'_>, Error> {
        let entry = self.catalog.pick_random(rng).ok_or(Error::InvalidCatalog {
            size: self.catalog.len(),
        })?;
        tracing::debug!(id = entry.id(), "random target");
        Ok(TargetResult {
            entry,
            edition: None,
        })
    }

    /// Entries whose sequence starts with `prefix`.
    pub fn query(&self, prefix: &[i64]) -> QueryResult<'_> {
        let matches = self.catalog.match_prefix(prefix);
        tracing::debug!(?prefix, matches = matches.len(), "query");
        QueryResult { matches }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("catalog has {size} entries; at least 2 are required")]
    InvalidCatalog { size: usize },
    #[error("degenerate permutation")]
    DegeneratePermutation(#[from] scheduler::Error),
}

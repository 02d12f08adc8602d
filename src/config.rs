use std::{fs::File, io::BufReader, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;

/// Settings fixed at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The date of edition 0.
    pub epoch: NaiveDate,
    /// Keep only this many leading terms of each sequence.
    pub max_terms: Option<usize>,
    /// Keep only entries whose retained terms are all single digits.
    pub single_digit_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(2022, 5, 22).unwrap_or_default(),
            max_terms: Some(10),
            single_digit_only: true,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not open config file \"{path}\"")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] serde_json::Error),
}

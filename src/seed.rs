// Seeding: fills an empty database from a JSON array of countries so a
// fresh install has something to browse.

use crate::dao::CountryDao;
use crate::error::DaoError;
use crate::model::Country;
use crate::prompt::{is_valid_percent, validate_code, validate_name};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

/// Data set compiled into the binary, used when no seed file is configured.
pub const BUNDLED_SEED: &str = include_str!("../data/countries.json");

pub fn parse_seed(raw: &str) -> Result<Vec<Country>> {
    serde_json::from_str(raw).context("Parsing seed json")
}

/// Read the seed file at `path`, or fall back to the bundled data set.
pub fn load_seed(path: Option<&Path>) -> Result<Vec<Country>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            parse_seed(&raw)
        }
        None => parse_seed(BUNDLED_SEED),
    }
}

/// Apply the same rules the interactive prompts enforce. Returns `None`
/// for a record that could never have been entered by hand.
pub fn normalize(country: Country) -> Option<Country> {
    let code = validate_code(&country.code).ok()?;
    let name = validate_name(&country.name).ok()?;
    let metrics = [country.internet_users, country.adult_literacy_rate];
    if metrics.iter().flatten().any(|v| !is_valid_percent(*v)) {
        return None;
    }
    Some(
        Country::builder(code, name)
            .with_internet_users(country.internet_users)
            .with_adult_literacy_rate(country.adult_literacy_rate)
            .build(),
    )
}

/// Insert `countries` the first time a store is opened. A store that was
/// seeded before, or that already holds rows, is left alone, so rows the
/// user deleted stay deleted. Invalid or duplicate entries are skipped with
/// a warning. Returns how many rows were inserted.
pub fn seed_once<D: CountryDao>(dao: &D, countries: Vec<Country>) -> Result<usize> {
    if dao.is_seeded()? {
        return Ok(0);
    }
    if dao.count()? > 0 {
        dao.mark_seeded()?;
        return Ok(0);
    }

    let pb = ProgressBar::new(countries.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    pb.set_message("Seeding countries...");

    let mut inserted = 0;
    for raw in countries {
        pb.inc(1);
        let code = raw.code.clone();
        let Some(country) = normalize(raw) else {
            warn!("skipping invalid seed entry '{code}'");
            continue;
        };
        match dao.add(&country) {
            Ok(()) => inserted += 1,
            Err(DaoError::Duplicate(code)) => warn!("skipping duplicate seed entry '{code}'"),
            Err(e) => return Err(e).context("Failed to insert seed entry"),
        }
    }
    pb.finish_and_clear();
    dao.mark_seeded()?;

    info!("seeded {inserted} countries");
    Ok(inserted)
}

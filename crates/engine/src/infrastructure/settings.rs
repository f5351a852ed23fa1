//! Authority settings loaded from the environment.

use serde::{Deserialize, Serialize};
use suzerain_domain::{ActorId, GameDate, Season};

use super::journal::DEFAULT_BROADCAST_CAPACITY;

const DEFAULT_START_YEAR: u32 = 1194;

/// Process-wide configuration for the authority core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoritySettings {
    /// Roster consulted by the `IsAdmin` predicate.
    #[serde(default)]
    pub admins: Vec<ActorId>,
    pub start_date: GameDate,
    /// Last challenge id issued before this process started.
    #[serde(default)]
    pub challenge_id_seed: u64,
    /// Last journal entry id issued before this process started.
    #[serde(default)]
    pub journal_id_seed: u64,
    pub journal_broadcast_capacity: usize,
    /// Wall-clock seconds per in-game season; 0 leaves the calendar still.
    #[serde(default)]
    pub season_length_secs: u64,
}

impl Default for AuthoritySettings {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            start_date: GameDate::new(DEFAULT_START_YEAR, Season::Spring),
            challenge_id_seed: 0,
            journal_id_seed: 0,
            journal_broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            season_length_secs: 0,
        }
    }
}

impl AuthoritySettings {
    /// Defaults overridden by whatever environment variables are set.
    ///
    /// Supported environment variables:
    /// - SUZERAIN_ADMINS: comma-separated admin actor ids
    /// - SUZERAIN_START_YEAR / SUZERAIN_START_SEASON: initial world date
    /// - SUZERAIN_CHALLENGE_ID_SEED / SUZERAIN_JOURNAL_ID_SEED: last issued ids
    /// - SUZERAIN_JOURNAL_BROADCAST_CAPACITY: live journal channel size (>= 1)
    /// - SUZERAIN_SEASON_SECONDS: seconds per season, 0 to disable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(val) = lookup("SUZERAIN_ADMINS") {
            settings.admins = parse_admins(&val);
            tracing::info!(count = settings.admins.len(), "Applied SUZERAIN_ADMINS");
        }

        if let Some(year) = parse_var(&lookup, "SUZERAIN_START_YEAR") {
            settings.start_date.year = year;
        }
        if let Some(season) = parse_var::<Season>(&lookup, "SUZERAIN_START_SEASON") {
            settings.start_date.season = season;
        }
        if let Some(seed) = parse_var(&lookup, "SUZERAIN_CHALLENGE_ID_SEED") {
            settings.challenge_id_seed = seed;
        }
        if let Some(seed) = parse_var(&lookup, "SUZERAIN_JOURNAL_ID_SEED") {
            settings.journal_id_seed = seed;
        }

        if let Some(secs) = parse_var(&lookup, "SUZERAIN_SEASON_SECONDS") {
            settings.season_length_secs = secs;
        }

        match parse_var::<usize>(&lookup, "SUZERAIN_JOURNAL_BROADCAST_CAPACITY") {
            Some(0) => tracing::warn!("SUZERAIN_JOURNAL_BROADCAST_CAPACITY must be at least 1, ignoring"),
            Some(capacity) => settings.journal_broadcast_capacity = capacity,
            None => {}
        }

        settings
    }
}

fn parse_admins(val: &str) -> Vec<ActorId> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match ActorId::new(s) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(value = %s, error = %e, "Invalid admin id in SUZERAIN_ADMINS, ignoring");
                None
            }
        })
        .collect()
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let val = lookup(key)?;
    match val.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, val = %val, error = %e, "Invalid environment value, ignoring");
            None
        }
    }
}

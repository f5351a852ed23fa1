//! Suzerain Engine - Main entry point.
//!
//! Hosts the authority core for an embedding server. The realm starts with
//! the configured admin roster only; places, actors and armies are populated
//! by an external world loader through `App::realm`.

use std::time::Duration;

use suzerain_domain::Realm;
use suzerain_engine::infrastructure::{settings::AuthoritySettings, telemetry};
use suzerain_engine::App;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    telemetry::init_tracing();
    tracing::info!("Starting Suzerain Engine");

    let settings = AuthoritySettings::from_env();
    tracing::info!(
        admins = settings.admins.len(),
        start_date = %settings.start_date,
        challenge_id_seed = settings.challenge_id_seed,
        journal_id_seed = settings.journal_id_seed,
        "Authority settings loaded"
    );

    let realm = Realm::with_admins(settings.admins.clone());
    let app = App::new(realm, &settings);

    // Mirror every journal announcement into the log
    let mut announcements = app.journal.subscribe();
    let mirror = tokio::spawn(async move {
        loop {
            match announcements.recv().await {
                Ok(entry) => tracing::info!(
                    entry_id = %entry.id(),
                    event_type = %entry.event_type(),
                    date = %entry.date(),
                    "Journal entry recorded"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Journal mirror fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Spawn season ticker
    let seasons = (settings.season_length_secs > 0).then(|| {
        let world_clock = app.world_clock.clone();
        let period = Duration::from_secs(settings.season_length_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                world_clock.advance_season();
            }
        })
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    mirror.abort();
    if let Some(seasons) = seasons {
        seasons.abort();
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

use tracing::error;
use tracing_subscriber::EnvFilter;

use aetheria_app::persistence::JsonFileStore;
use aetheria_app::session;
use aetheria_core::enums::LevelId;
use aetheria_sim::SimConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = JsonFileStore::from_env();
    if let Err(err) = session::run_session(&store, LevelId::Meadow, SimConfig::default()) {
        error!(%err, "session failed");
        std::process::exit(1);
    }
}

//! Wiring & DI. Entry point: bootstrap adapters, inject into sessions,
//! run the console UI. No business logic here.

use salesdesk::adapters::persistence::Registry;
use salesdesk::adapters::ui::{ConsoleUi, banner};
use salesdesk::ports::InputPort;
use salesdesk::shared::AppConfig;
use salesdesk::usecases::{ChangeNotifier, EntityService, ListSession};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::load().unwrap_or_default();
    let data_path = cfg.data_path_or_default();
    let fmt = cfg.format_config();
    info!(path = %data_path, "opening registry");

    banner::print_welcome(&data_path);

    let registry =
        Registry::open(&data_path).map_err(|e| anyhow::anyhow!("open registry: {e}"))?;

    // --- Sessions: both lists subscribe to the same notifier, so a
    // mutation through either form refreshes both. ---
    let notifier = ChangeNotifier::new();
    let departments = ListSession::open(
        EntityService::new(registry.departments()),
        notifier.clone(),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    let sellers = ListSession::open(EntityService::new(registry.sellers()), notifier.clone())
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let ui = ConsoleUi::new(departments, sellers, notifier, fmt);
    ui.run().map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}

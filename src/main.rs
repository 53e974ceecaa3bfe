use clap::Parser;
use marine_roster::dispatcher::Dispatcher;
use marine_roster::registry;
use marine_roster::router::Router;
use marine_roster::runtime_config::RuntimeConfig;
use marine_roster::server::{AppService, HttpServer};
use marine_roster::static_files::StaticFiles;
use marine_roster::store::MarineStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Marine roster JSON API with static pages.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory holding the static pages.
    #[arg(long, default_value = "static_site")]
    static_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let store = Arc::new(MarineStore::seeded());
    let router = Arc::new(Router::new(registry::route_table()));
    let mut dispatcher = Dispatcher::new();
    unsafe {
        registry::register_all(&mut dispatcher, store.clone());
    }

    let service = AppService::new(
        router,
        Arc::new(dispatcher),
        StaticFiles::new(args.static_dir),
    );

    let addr = format!("{}:{}", args.host, args.port);
    info!(addr = %addr, seeded = store.len(), "Marine roster server starting");

    let handle = HttpServer(service)
        .start(addr.as_str())
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server crashed: {e:?}"))?;
    Ok(())
}

// rtc_lua/src/main.rs
use rtc_bridge::config::config::{install_config, load_config};
use rtc_bridge::logging::logging::init_file_logger;
use rtc_bridge::router::event_kind::EventKind;
use rtc_lua::simulator::spawn_session;
use rtc_lua::runtime::LuaRuntime;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;

/// Runs a Lua script against a simulated call session.
#[derive(Parser, Debug)]
#[command(name = "rtc-lua")]
#[command(version)]
struct Args {
    /// Path to the bridge config (.ron). Defaults apply if it does not exist.
    #[arg(short, long, value_name = "FILE", default_value = "rtc_bridge.ron")]
    config: PathBuf,

    /// Lua script that subscribes to engine events.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Number of stats rounds the simulated session reports.
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Milliseconds between stats rounds.
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let _logger = init_file_logger(&config.logging)?;
    log::info!("rtc-lua v{}", env!("CARGO_PKG_VERSION"));

    let policy = config.queue;
    install_config(config);

    let runtime = LuaRuntime::new(policy).map_err(|e| anyhow::anyhow!("{e}"))?;
    runtime
        .load_script(&args.script)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("running {}", args.script.display()))?;

    let registry = runtime.bridge().registry();
    let subscribed = EventKind::ALL
        .iter()
        .filter(|kind| registry.contains(kind.as_str()))
        .count();
    if subscribed == 0 {
        log::warn!("{} subscribed to no engine events.", args.script.display());
    } else {
        log::info!("{} subscribed to {} engine events.", args.script.display(), subscribed);
    }

    let session = spawn_session(
        runtime.bridge().router(),
        args.rounds,
        Duration::from_millis(args.interval_ms),
    );
    let delivered = runtime.bridge().run();

    if session.join().is_err() {
        anyhow::bail!("simulated session panicked");
    }

    let stats = runtime.bridge().stats();
    log::info!(
        "Delivered {} events ({} evicted, {} rejected).",
        delivered,
        stats.evicted,
        stats.rejected
    );
    Ok(())
}

//! tvprogram - TV program guide CLI.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;
use tvprogram_epg::error::display_chain;
use tvprogram_epg::{
    AcquisitionReport, ChannelOutcome, ChannelRegistry, EpgSession, GuideStore, HttpGuideSource,
    PiconResolver,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List channels in display order.
    Channels,
    /// Download or reload guides and report per-channel results.
    Update(UpdateArgs),
    /// Show a channel's schedule with the current program marked.
    Schedule(ChannelArgs),
    /// Show the picon path for a channel.
    Picon(ChannelArgs),
    /// Write a config file with default settings.
    Init,
}

/// Arguments for the `update` subcommand.
#[derive(clap::Args)]
struct UpdateArgs {
    /// Re-download even if cached guides are fresh.
    #[arg(long)]
    force: bool,
}

/// Arguments for subcommands taking a channel name.
#[derive(clap::Args)]
struct ChannelArgs {
    /// Channel display name (e.g. "RTS1").
    channel: String,
}

/// Builds a session from the config file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the HTTP client fails to build.
fn build_session(dir: Option<&Path>) -> Result<EpgSession<HttpGuideSource>> {
    let AppConfig { paths, http } =
        AppConfig::load_from_dir(dir).context("failed to load config")?;

    let source = HttpGuideSource::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(http.timeout())
        .build()
        .context("failed to build HTTP client")?;

    let picons = PiconResolver::new(paths.picon_dir.clone(), paths.placeholder_picon());
    Ok(EpgSession::new(
        ChannelRegistry::builtin(),
        GuideStore::new(paths.guide_dir),
        picons,
        source,
    )
    .with_consolidated_guide(paths.consolidated_guide))
}

/// Fails unless `name` is a registered display name.
fn require_channel(session: &EpgSession<HttpGuideSource>, name: &str) -> Result<()> {
    if session.registry().lookup_source_id(name).is_none() {
        bail!("unknown channel: {name} (run `tvprogram channels` for the list)");
    }
    Ok(())
}

/// Runs the `channels` subcommand.
///
/// # Errors
///
/// Returns an error if the session cannot be built.
fn run_channels(dir: Option<&Path>) -> Result<()> {
    let session = build_session(dir)?;
    let channels = session.list_channels();

    tracing::info!("Channels ({}):", channels.len());
    for name in channels {
        tracing::info!("  {name}");
    }
    Ok(())
}

/// Runs the `update` subcommand.
///
/// # Errors
///
/// Returns an error if the guide directory cannot be created.
#[instrument(skip_all)]
async fn run_update(args: &UpdateArgs, dir: Option<&Path>) -> Result<()> {
    let mut session = build_session(dir)?;
    let now = Local::now().naive_local();

    let report = if args.force {
        session.refresh_at(now).await
    } else {
        session.run_acquisition_at(now).await
    }
    .context("guide acquisition aborted")?;

    log_report(&report);
    Ok(())
}

/// Logs one line per guide source plus a summary.
fn log_report(report: &AcquisitionReport) {
    tracing::info!("Source: {:?}", report.mode);
    for item in &report.channels {
        match &item.outcome {
            ChannelOutcome::Loaded { entries } => {
                tracing::info!("  {:<24} {entries} programmes", item.origin);
            }
            ChannelOutcome::NotCached => tracing::info!("  {:<24} not cached", item.origin),
            ChannelOutcome::Skipped(gap) => tracing::warn!("  {:<24} skipped: {gap}", item.origin),
            ChannelOutcome::Failed(failure) => {
                tracing::warn!("  {:<24} failed: {}", item.origin, display_chain(failure));
            }
        }
    }
    tracing::info!(
        "Total: {} programmes, {} failed, marker {}",
        report.loaded_entries(),
        report.failures().count(),
        if report.marker_updated {
            "updated"
        } else {
            "unchanged"
        }
    );
}

/// Runs the `schedule` subcommand.
///
/// # Errors
///
/// Returns an error if the channel is unknown or acquisition aborts.
#[instrument(skip_all, fields(channel = %args.channel))]
async fn run_schedule(args: &ChannelArgs, dir: Option<&Path>) -> Result<()> {
    let mut session = build_session(dir)?;
    require_channel(&session, &args.channel)?;

    let report = session
        .run_acquisition()
        .await
        .context("guide acquisition aborted")?;
    for (origin, failure) in report.failures() {
        tracing::warn!("{origin}: {}", display_chain(failure));
    }

    let lines = session.schedule(&args.channel);
    let current = session.current_index(&args.channel, Local::now().naive_local());
    tracing::info!("{}", args.channel);
    for (idx, line) in lines.iter().enumerate() {
        // Index 0 is a date header or the no-data placeholder.
        let mark = if idx == current && idx > 0 { ">" } else { " " };
        tracing::info!("{mark} {line}");
    }
    Ok(())
}

/// Runs the `picon` subcommand.
///
/// # Errors
///
/// Returns an error if the channel is unknown.
fn run_picon(args: &ChannelArgs, dir: Option<&Path>) -> Result<()> {
    let session = build_session(dir)?;
    require_channel(&session, &args.channel)?;

    match session.resolve_picon(&args.channel) {
        Some(path) => tracing::info!("{}", path.display()),
        None => tracing::info!("No picon for {}", args.channel),
    }
    Ok(())
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if a config file already exists or cannot be written.
fn run_init(dir: Option<&Path>) -> Result<()> {
    let config_path = AppConfig::path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        bail!("config file already exists: {}", config_path.display());
    }
    AppConfig::default()
        .save(&config_path)
        .context("failed to write config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Installs the tracing subscriber, with an OTLP layer when the `otel`
/// feature is enabled and `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Channels => run_channels(dir),
        Commands::Update(args) => run_update(&args, dir).await,
        Commands::Schedule(args) => run_schedule(&args, dir).await,
        Commands::Picon(args) => run_picon(&args, dir),
        Commands::Init => run_init(dir),
    }
}

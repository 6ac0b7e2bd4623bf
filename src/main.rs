use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::KeyCode;
use hostwatch::config::{self, Config, load_config, load_config_from_path, parse_key};
use hostwatch::dashboard::Dashboard;
use hostwatch::error::ConfigError;
use hostwatch::event::quit_requested;
use hostwatch::logging::{self, LogTarget};
use hostwatch::system::collector::Collector;
use hostwatch::system::source::{CPU_SETTLE_TIME, SysinfoSource};
use hostwatch::ticker::IntervalTicker;
use hostwatch::ui;
use hostwatch::ui::statusbar::StatusInfo;
use hostwatch::ui::theme::{Theme, resolve_color_support};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "hostwatch",
    about = "Live terminal dashboard for host resource usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Report usage of the filesystem holding this path
    #[arg(long)]
    disk: Option<PathBuf>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Sample once, print the dashboard as plain text and exit.
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    once: bool,

    /// Sample once, print the snapshot as JSON and exit.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Canvas width for --once.
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Canvas height for --once.
    #[arg(long, default_value_t = 24)]
    height: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_err) = load_config_for_cli(&cli)?;

    let log_target = if cli.once || cli.json {
        LogTarget::Stderr
    } else {
        config
            .logging
            .resolved_file()
            .map_or(LogTarget::Off, LogTarget::File)
    };
    logging::init(&config.logging.level, log_target)?;
    if let Some(err) = config_err {
        warn!(error = %err, path = ?config::config_path(), "ignoring config file, using defaults");
    }

    if cli.once || cli.json {
        return run_one_shot(config, &cli).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let refresh_interval = refresh_interval(&config)?;
    let quit_key = parse_key(&config.keybinds.quit).unwrap_or(KeyCode::Char('q'));

    let collector = Collector::new(SysinfoSource::new()?, config.general.disk_path.clone());
    let mut dashboard = Dashboard::new(collector, theme_for(&config), refresh_interval)
        .with_quit_label(config.keybinds.quit.clone());
    // CPU usage is a delta between two refreshes; the first tick waits for
    // the primed counters to age.
    let mut ticker = IntervalTicker::starting_after(CPU_SETTLE_TIME, refresh_interval);

    dashboard
        .run(terminal, &mut ticker, quit_requested(quit_key))
        .await?;
    Ok(())
}

async fn run_one_shot(config: Config, cli: &Cli) -> Result<()> {
    if cli.width == 0 || cli.height == 0 {
        return Err(eyre!("--width and --height must be greater than 0"));
    }

    let mut collector = Collector::new(SysinfoSource::new()?, config.general.disk_path.clone());
    // CPU usage is a delta between two refreshes; give the first one time to age.
    tokio::time::sleep(CPU_SETTLE_TIME).await;
    let snapshot = collector.collect()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let status = StatusInfo {
        quit_key: &config.keybinds.quit,
        refresh_interval: refresh_interval(&config)?,
        skipped_ticks: 0,
        last_error: None,
    };
    let text = ui::render_to_text(
        &snapshot,
        &theme_for(&config),
        &status,
        cli.width,
        cli.height,
    )?;
    println!("{text}");
    Ok(())
}

fn refresh_interval(config: &Config) -> Result<Duration> {
    match config.general.refresh_rate_ms {
        0 => Err(eyre!("refresh rate must be greater than 0 ms")),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn theme_for(config: &Config) -> Theme {
    let support = resolve_color_support(&config.general.color_support);
    Theme::from_config(&config.colors, support)
}

/// An explicit `--config` must load; a broken default file only earns a
/// warning once logging is up.
fn load_config_for_cli(cli: &Cli) -> Result<(Config, Option<ConfigError>)> {
    let (mut config, config_err) = match &cli.config {
        Some(path) => (load_config_from_path(path)?, None),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref disk) = cli.disk {
        config.general.disk_path = disk.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    Ok((config, config_err))
}

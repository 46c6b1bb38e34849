use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use sysmon::app::App;
use sysmon::config::{self, Config};
use sysmon::event::{Event, EventHandler};
use sysmon::logbook::Logbook;
use sysmon::menu::{self, MenuOutcome};
use sysmon::report;
use sysmon::system::collector::Collector;
use sysmon::system::cpu::CpuReading;
use sysmon::system::process::census_summary;
use sysmon::ui;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// CPU utilization percentage
    Cpu,
    /// Memory totals and usage
    Mem,
    /// Top CPU-consuming processes
    Proc,
}

#[derive(Parser)]
#[command(name = "sysmon", about = "Linux system monitor sampling /proc")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample a single metric and exit
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Continuous monitoring with a refresh interval in seconds
    #[arg(short = 'c', long, value_name = "SECONDS")]
    watch: Option<u64>,

    /// How many processes the census keeps
    #[arg(long)]
    top: Option<usize>,

    /// Append sampler summaries to this session log
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Emit one-shot output as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let mut logbook = match config.general.log_file.as_deref() {
        Some(path) => Logbook::open(path).unwrap_or_else(|err| {
            eprintln!("warning: cannot open session log {}: {err}", path.display());
            Logbook::disabled()
        }),
        None => Logbook::disabled(),
    };
    logbook.record("session started");

    let mut collector = Collector::new();
    let top = config.general.top_processes;

    let watch_interval_ms = if let Some(mode) = cli.mode {
        run_oneshot(&mut collector, mode, top, cli.json, &mut logbook).await?;
        None
    } else if let Some(secs) = cli.watch {
        Some(secs.max(1) * 1000)
    } else {
        match menu::run(&mut collector, top, &mut logbook)? {
            MenuOutcome::Watch => Some(config.watch.refresh_rate_ms),
            MenuOutcome::Exit => None,
        }
    };

    match watch_interval_ms {
        Some(refresh_ms) => {
            let mut config = config;
            config.watch.refresh_rate_ms = refresh_ms;
            run_watch(collector, &config, logbook).await
        }
        None => {
            logbook.record("session ended");
            Ok(())
        }
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(top) = cli.top {
        config.general.top_processes = top.max(1);
    }
    if let Some(ref path) = cli.log {
        config.general.log_file = Some(path.clone());
    }

    config
}

async fn run_oneshot(
    collector: &mut Collector,
    mode: Mode,
    top: usize,
    json: bool,
    logbook: &mut Logbook,
) -> Result<()> {
    match mode {
        Mode::Cpu => {
            // Two snapshots one second apart; the first only seeds the
            // tracker, so a one-shot can still print a real percentage.
            let mut reading = collector.sample_cpu()?;
            if reading == CpuReading::Warmup {
                tokio::time::sleep(Duration::from_secs(1)).await;
                reading = collector.sample_cpu()?;
            }
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report::CpuPayload::from(reading))?
                );
            } else {
                print!("{}", report::cpu_section(reading));
            }
            logbook.record(&reading.summary());
        }
        Mode::Mem => {
            let sample = collector.sample_memory()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sample)?);
            } else {
                print!("{}", report::memory_section(&sample));
            }
            logbook.record(&sample.summary());
        }
        Mode::Proc => {
            let ranked = collector.sample_processes(top)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print!("{}", report::process_section(&ranked));
            }
            logbook.record(&census_summary(&ranked));
        }
    }
    Ok(())
}

async fn run_watch(collector: Collector, config: &Config, mut logbook: Logbook) -> Result<()> {
    logbook.record("continuous monitoring started");

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = watch_loop(&mut terminal, collector, config, logbook).await;

    ratatui::restore();
    result
}

async fn watch_loop(
    terminal: &mut ratatui::DefaultTerminal,
    collector: Collector,
    config: &Config,
    logbook: Logbook,
) -> Result<()> {
    let tick_rate = Duration::from_millis(config.watch.refresh_rate_ms);
    let mut app = App::with_collector(collector, config, logbook);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => app.on_tick(),
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    app.log("session ended");
    Ok(())
}

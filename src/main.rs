use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sitescope::input::validate_url;
use sitescope::ui::{self, Theme};
use sitescope::view::AnalysisPolicy;
use sitescope::{events, AnalyzerApi, App, Controller, HealthMonitor, Settings};

#[derive(Parser, Debug)]
#[command(name = "sitescope")]
#[command(about = "Terminal dashboard for website SEO, performance and traceroute analysis")]
struct Args {
    /// Path to a config file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Health poll interval (e.g., "60s", "500ms")
    #[arg(long)]
    health_interval: Option<String>,

    /// Per-request timeout (e.g., "30s")
    #[arg(long)]
    timeout: Option<String>,

    /// How completions of overlapping analyses are applied
    #[arg(long, value_enum)]
    policy: Option<AnalysisPolicy>,

    /// Write logs to this file while the dashboard is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Analyze a single URL, print the result as JSON and exit
    #[arg(long, value_name = "URL")]
    once: Option<String>,

    /// Write the --once result to this file instead of stdout
    #[arg(short, long, requires = "once")]
    output: Option<PathBuf>,
}

impl Args {
    /// Command-line flags override file and environment settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref base_url) = self.base_url {
            settings.api_base_url = base_url.clone();
        }
        if let Some(ref interval) = self.health_interval {
            settings.health_interval = interval.clone();
        }
        if let Some(ref timeout) = self.timeout {
            settings.request_timeout = Some(timeout.clone());
        }
        if let Some(policy) = self.policy {
            settings.analysis_policy = policy;
        }
        if let Some(ref log_file) = self.log_file {
            settings.log_file = Some(log_file.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);

    init_logging(&settings, args.once.is_some())?;

    let rt = tokio::runtime::Runtime::new()?;

    // Handle one-shot mode (non-interactive)
    if let Some(ref url) = args.once {
        return rt.block_on(run_once(&settings, url, args.output.as_deref()));
    }

    // Background tasks are spawned from the UI thread
    let _guard = rt.enter();
    run_tui(&settings)
}

/// Route logs away from the terminal while the TUI owns it.
fn init_logging(settings: &Settings, one_shot: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    if one_shot {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    } else if let Some(ref path) = settings.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
    }

    Ok(())
}

/// Analyze one URL and print the result as JSON
async fn run_once(settings: &Settings, url: &str, output: Option<&Path>) -> Result<()> {
    let url = validate_url(url)?;
    let gateway = settings.gateway()?;
    info!("analyzing {} via {}", url, gateway.description());

    let mut controller = Controller::new(Arc::new(gateway), settings.analysis_policy);
    controller.run_analysis(url);
    controller.settle().await;

    let analysis = controller.dashboard().analysis();
    if let Some(err) = analysis.error_message() {
        bail!("Analysis failed: {}", err);
    }
    let Some(result) = analysis.current() else {
        bail!("Analysis returned no result");
    };

    let json = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Run the interactive dashboard
fn run_tui(settings: &Settings) -> Result<()> {
    let api: Arc<dyn AnalyzerApi> = Arc::new(settings.gateway()?);
    let interval = settings.health_interval()?;

    let controller = Controller::new(api.clone(), settings.analysis_policy);
    let monitor = HealthMonitor::start(api, interval);
    let theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load recent sites
    let mut app = App::new(controller, Some(monitor), theme);
    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);
    app.quit();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Apply finished requests before drawing
        app.tick();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}

//! Interactive console over a chat session.
//!
//! Simulated time advances on a fixed tick while stdin lines are handled
//! as they arrive, both on one current-thread runtime.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use prometheus::Registry;
use prometheus_bridge::{coherence_fell_below_band, VitalsMetrics};
use std::path::PathBuf;
use std::time::Duration;
use synth_core::{Bounds, EngineConfig, MessageCategory, SimulatedState};
use synth_engine::{ChatSession, CognitiveEngine, DefaultEngine, DefaultSession};
use synth_prefs::{PreferenceStore, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "synth-console", version, about = "Chat with the synthetic cognition engine")]
struct Cli {
    /// JSON engine configuration; built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    json_logs: bool,
    /// Simulated clock resolution in milliseconds.
    #[arg(long, default_value_t = 500)]
    tick_ms: u64,
    #[arg(long, default_value = "synth-prefs.json")]
    prefs: PathBuf,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

struct Console {
    session: DefaultSession,
    registry: Registry,
    metrics: VitalsMetrics,
    prefs: PreferenceStore,
    drift_band: Bounds,
    last_state: SimulatedState,
    started: Instant,
}

enum Flow {
    Continue,
    Quit,
}

/// System status plus the reading of the latest user turn.
fn status_json(session: &DefaultSession) -> serde_json::Value {
    serde_json::json!({
        "system": session.engine().system_status(),
        "conversation": session.transcript().state(),
    })
}

impl Console {
    fn new(engine: DefaultEngine, config: &EngineConfig, prefs: PreferenceStore) -> Result<Self> {
        let registry = Registry::new();
        let metrics = VitalsMetrics::register(&registry).context("registering vitals metrics")?;
        let last_state = engine.snapshot();
        metrics.observe_state(&last_state);
        Ok(Self {
            session: ChatSession::new(engine, config),
            registry,
            metrics,
            prefs,
            drift_band: config.limits.coherence_drift,
            last_state,
            started: Instant::now(),
        })
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns true when coherence dropped below the drift band.
    fn on_tick(&mut self, now: Duration) -> bool {
        let (report, suggestion) = self.session.tick(now);
        if report.decoherence_events > 0 {
            info!(events = report.decoherence_events, "decoherence observed");
        }
        let state = self.session.engine().snapshot();
        let dropped = coherence_fell_below_band(&self.metrics, self.drift_band, &self.last_state, &state);
        if dropped {
            warn!(
                coherence = state.quantum.coherence,
                floor = self.drift_band.min,
                "coherence fell below the drift band"
            );
        }
        self.last_state = state;
        if let Some(suggestion) = suggestion {
            println!("[{:?} suggestion] {}", suggestion.priority, suggestion.text);
        }
        dropped
    }

    fn on_command(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Say(text) => {
                let reply = self.session.send(&text, self.now());
                self.metrics.observe_reply(reply.category);
                match reply.category {
                    Some(category) => println!("[{category} {:.2}] {}", reply.confidence, reply.text),
                    None => println!("[{:?}] {}", reply.message_category, reply.text),
                }
            }
            Command::Status => {
                println!("{}", serde_json::to_string_pretty(&status_json(&self.session))?);
            }
            Command::Analyze(kind) => {
                let text = self.session.engine().perform_system_analysis(&kind);
                println!("{text}");
                self.session.note(text, MessageCategory::Analysis);
            }
            Command::Reflect => {
                let text = self.session.engine_mut().perform_erps_reflection();
                println!("{text}");
                self.session.note(text, MessageCategory::Reflection);
            }
            Command::Predict { domain, timeframe } => {
                let text = self
                    .session
                    .engine_mut()
                    .generate_prediction(&domain, &timeframe);
                println!("{text}");
                self.session.note(text, MessageCategory::Analysis);
            }
            Command::Theme(None) => println!("theme: {}", self.prefs.theme()),
            Command::Theme(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => {
                    self.prefs
                        .set_theme(theme)
                        .with_context(|| format!("saving {}", self.prefs.path().display()))?;
                    println!("theme: {theme}");
                }
                Err(err) => warn!(error = %err, "theme not changed"),
            },
            Command::Metrics => print!("{}", prometheus_bridge::render(&self.registry)?),
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = match cli.seed {
        Some(seed) => CognitiveEngine::seeded(config.clone(), seed),
        None => CognitiveEngine::from_entropy(config.clone()),
    };

    let prefs = PreferenceStore::open(&cli.prefs);
    if !prefs.is_available() {
        warn!(path = %cli.prefs.display(), "preferences are not writable");
    }
    let mut console = Console::new(engine, &config, prefs)?;
    info!(seed = ?cli.seed, tick_ms = cli.tick_ms, "console ready");
    println!("{}", commands::HELP);

    let mut ticker = tokio::time::interval(Duration::from_millis(cli.tick_ms.max(1)));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                console.on_tick(console.now());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let Some(command) = commands::parse(&line) else {
                    continue;
                };
                if let Flow::Quit = console.on_command(command)? {
                    break;
                }
            }
        }
    }
    info!(
        messages = console.session.transcript().len(),
        "session closed"
    );
    Ok(())
}

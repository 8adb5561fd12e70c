//! Replays a scripted input timeline against a slider engine and prints one
//! JSON line per step.
//!
//! By default the engine runs in virtual time, so a ten-minute autoplay
//! scenario completes instantly and deterministically. `--realtime` runs the
//! same script against the async runtime with wall-clock sleeps.

mod script;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use slider_engine::{
    CarouselEngine, EngineConfig, EngineState, IndicatorState, Instant, Slide,
    SliderSurface, SliderVariant, TransitionPlan, runtime,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::script::{ScriptAction, ScriptStep, parse_script};

#[derive(Parser)]
#[command(
    name = "slider-sim",
    about = "Replay an input timeline against the slider engine"
)]
struct Cli {
    /// Engine configuration (TOML or JSON). Overrides --preset.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "generic")]
    preset: PresetArg,
    /// Number of generated slides.
    #[arg(long, default_value_t = 5)]
    slides: usize,
    /// Script file; read from stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Keep running timers until this many milliseconds after start.
    #[arg(long)]
    until_ms: Option<u64>,
    /// Use wall-clock timers instead of virtual time.
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Generic,
    Productivity,
}

#[derive(Serialize)]
struct Report<'a> {
    at_ms: u64,
    action: Option<&'a ScriptAction>,
    accepted: bool,
    /// Track transform at `at_ms`; only known in virtual time.
    #[serde(skip_serializing_if = "Option::is_none")]
    track: Option<String>,
    state: EngineState,
}

/// Logs what a real surface would be asked to draw.
#[derive(Debug)]
struct TracingSurface;

impl SliderSurface<String> for TracingSurface {
    fn install_styles(&mut self, variant: SliderVariant) {
        info!(variant = variant.as_str(), "install styles");
    }

    fn mount(&mut self, slides: &[Slide<String>], indicators: &IndicatorState) {
        info!(slides = slides.len(), dots = indicators.dots.len(), "mount");
    }

    fn animate_track(&mut self, plan: &TransitionPlan) {
        info!(
            from = %plan.from,
            to = %plan.to,
            duration_ms = plan.duration.as_millis() as u64,
            "animate track"
        );
    }

    fn render_indicators(&mut self, indicators: &IndicatorState) {
        info!(active = ?indicators.active_dot(), "render indicators");
    }

    fn unmount(&mut self) {
        info!("unmount");
    }
}

fn slide_contents(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("slide-{n}")).collect()
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::load_from_file(path),
        None => Ok(match cli.preset {
            PresetArg::Generic => EngineConfig::generic_defaults(),
            PresetArg::Productivity => EngineConfig::productivity_defaults(),
        }),
    }
}

fn read_script(cli: &Cli) -> Result<Vec<ScriptStep>> {
    let source = match &cli.script {
        Some(path) => fs::read_to_string(path).with_context(|| {
            format!("failed to read script {}", path.display())
        })?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };
    Ok(parse_script(&source)?)
}

fn emit(report: &Report<'_>) -> Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

fn run_virtual(
    config: EngineConfig,
    slides: usize,
    steps: &[ScriptStep],
    until_ms: Option<u64>,
) -> Result<()> {
    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);

    let mut engine = CarouselEngine::builder(config)
        .surface(TracingSurface)
        .on_change(|index, slide: &Slide<String>| {
            info!(index, content = %slide.content, "slide changed");
        })
        .build(slide_contents(slides), t0)?;

    for step in steps {
        let now = at(step.at_ms);
        let accepted = match &step.action {
            ScriptAction::Input(input) => engine.dispatch(*input, now),
            ScriptAction::Items(count) => {
                engine.update_items(slide_contents(*count), now)?;
                false
            }
        };
        emit(&Report {
            at_ms: step.at_ms,
            action: Some(&step.action),
            accepted,
            track: Some(engine.track_offset(now).to_string()),
            state: engine.state(),
        })?;
    }

    let last_ms = steps.last().map_or(0, |step| step.at_ms);
    let end_ms = until_ms.unwrap_or(last_ms).max(last_ms);
    engine.advance_to(at(end_ms));
    emit(&Report {
        at_ms: end_ms,
        action: None,
        accepted: false,
        track: Some(engine.track_offset(at(end_ms)).to_string()),
        state: engine.state(),
    })?;

    engine.destroy();
    Ok(())
}

async fn run_realtime(
    config: EngineConfig,
    slides: usize,
    steps: &[ScriptStep],
    until_ms: Option<u64>,
) -> Result<()> {
    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);

    let engine = CarouselEngine::builder(config)
        .surface(TracingSurface)
        .build(slide_contents(slides), t0)?;
    let (handle, task) = runtime::spawn(engine);

    for step in steps {
        tokio::time::sleep_until(at(step.at_ms)).await;
        let accepted = match &step.action {
            ScriptAction::Input(input) => handle.send(*input).await?,
            ScriptAction::Items(count) => {
                handle.update_items(slide_contents(*count)).await?;
                false
            }
        };
        emit(&Report {
            at_ms: step.at_ms,
            action: Some(&step.action),
            accepted,
            track: None,
            state: handle.state(),
        })?;
    }

    let last_ms = steps.last().map_or(0, |step| step.at_ms);
    let end_ms = until_ms.unwrap_or(last_ms).max(last_ms);
    tokio::time::sleep_until(at(end_ms)).await;
    emit(&Report {
        at_ms: end_ms,
        action: None,
        accepted: false,
        track: None,
        state: handle.state(),
    })?;

    handle.destroy().await?;
    task.await.context("slider task panicked")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let steps = read_script(&cli)?;
    info!(
        steps = steps.len(),
        slides = cli.slides,
        realtime = cli.realtime,
        "starting simulation"
    );

    if cli.realtime {
        run_realtime(config, cli.slides, &steps, cli.until_ms).await
    } else {
        run_virtual(config, cli.slides, &steps, cli.until_ms)
    }
}

//! drum-machine: play a kit of pads from the keyboard or mouse, record the
//! sequence, and replay it.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::{info, warn};

use drum_machine::audio::AudioEngine;
use drum_machine::config::Config;
use drum_machine::kit::{load_bank, SampleRegistry, TriggerKey};
use drum_machine::logging;
use drum_machine::machine::{DrumMachine, NullOutput, SampleOutput, Volume};
use drum_machine::tui::{ActivityLevel, App, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "drum-machine", version, about)]
struct Cli {
    /// Config file (default: ~/.drum-machine/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting volume, 0.0 to 1.0
    #[arg(long, value_parser = parse_volume)]
    volume: Option<f32>,

    /// Milliseconds between replayed hits
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Start with the light theme
    #[arg(long)]
    light: bool,

    /// Run without opening an audio device
    #[arg(long)]
    no_audio: bool,

    /// Log file (default: ~/.drum-machine/drum-machine.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the kit and exit
    #[arg(long)]
    list_pads: bool,
}

fn parse_volume(raw: &str) -> Result<f32, String> {
    let v: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside 0.0..=1.0"))
    }
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("drum-machine: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load(cli.config.as_deref())?;
    let registry = config.registry()?;

    if cli.list_pads {
        for pad in registry.iter() {
            println!("{}  {:<24} {}", pad.trigger_key, pad.display_id, pad.source);
        }
        return Ok(());
    }

    match cli.log_file.clone().or_else(logging::default_log_path) {
        Some(path) => {
            if let Err(e) = logging::init(&path, "info") {
                eprintln!("drum-machine: logging disabled: {e}");
            }
        }
        None => eprintln!("drum-machine: logging disabled: no home directory"),
    }

    let volume = cli.volume.map(Volume::from_slider).unwrap_or(config.volume());
    let interval = cli
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or(config.replay_interval());
    let theme = if cli.light {
        ThemeMode::Light
    } else {
        config.theme()
    };

    info!(
        pads = registry.len(),
        %volume,
        interval_ms = interval.as_millis() as u64,
        %theme,
        "drum machine starting"
    );

    let (output, silent) = open_output(&registry, config.seed(), cli.no_audio);
    let device = output.device_name().map(str::to_string);
    let machine = DrumMachine::new(registry, output, volume, interval);

    let mut app = App::new(machine, theme).with_unavailable(silent.iter().copied());
    match device {
        Some(name) => app.note(ActivityLevel::Info, format!("audio: {name}")),
        None => app.note(ActivityLevel::Warn, "no audio output; pads are silent"),
    }
    for key in &silent {
        app.note(ActivityLevel::Warn, format!("pad {key} has no audio"));
    }

    let mut terminal = ratatui::init();
    let result = crossterm::execute!(io::stdout(), EnableMouseCapture)
        .and_then(|()| app.run(&mut terminal));
    let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    info!("drum machine stopped");
    Ok(result?)
}

/// Open the default output device and load the kit into it. Falls back to a
/// silent output when audio is disabled or unavailable. Also returns the
/// pads whose audio could not be loaded.
fn open_output(
    registry: &SampleRegistry,
    seed: u64,
    no_audio: bool,
) -> (Box<dyn SampleOutput>, Vec<TriggerKey>) {
    if no_audio {
        info!("audio disabled");
        return (Box::new(NullOutput), Vec::new());
    }

    let mut engine = match AudioEngine::new() {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "audio unavailable, running silent");
            return (Box::new(NullOutput), Vec::new());
        }
    };

    let (bank, failures) = load_bank(registry, engine.sample_rate(), seed);
    info!(loaded = bank.loaded_count(), total = bank.len(), "kit loaded");
    if let Err(e) = engine.load_bank(bank) {
        warn!(error = %e, "could not hand the kit to the audio thread");
    }

    let silent = failures.into_iter().map(|f| f.key).collect();
    (Box::new(engine), silent)
}

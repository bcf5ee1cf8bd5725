// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

mod config;
mod control;
mod player;
mod routine;
mod timing;
mod ui;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use tracing::info;

use config::{LibraryEvent, LibraryWatcher, RoutineFile};
use control::{ControlAction, KeyboardController};
use player::PlaybackController;
use routine::RoutineLibrary;
use timing::TickClock;
use ui::{App, UiState};

/// Routine file looked for when no --routines flag is given
const DEFAULT_ROUTINE_FILE: &str = "routines.yaml";

fn print_usage() {
    println!("POSEFLOW - Pose Routine Player");
    println!();
    println!("Usage: poseflow [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --routines <FILE>      Load routines from FILE (default: {})", DEFAULT_ROUTINE_FILE);
    println!("  --transition <SECS>    Starting transition duration (min 5)");
    println!("  --list-routines        Print the available routines and exit");
    println!("  --total <ROUTINE>      Print a routine's total time and exit");
    println!("  --write-sample <FILE>  Write the built-in routines to FILE and exit");
    println!("  --help                 Show this help message");
    println!();
    println!("With no command, the interactive player starts.");
}

/// What to do after parsing the command line
enum Command {
    Play,
    ListRoutines,
    Total(String),
    WriteSample(PathBuf),
}

struct Options {
    command: Command,
    routines_path: Option<PathBuf>,
    transition_override: Option<u32>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut command = Command::Play;
    let mut routines_path = None;
    let mut transition_override = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--list-routines" => {
                command = Command::ListRoutines;
            }
            "--total" => {
                i += 1;
                let id = args
                    .get(i)
                    .context("--total requires a routine id (see --list-routines)")?;
                command = Command::Total(id.clone());
            }
            "--write-sample" => {
                i += 1;
                let path = args.get(i).context("--write-sample requires a file path")?;
                command = Command::WriteSample(PathBuf::from(path));
            }
            "--routines" => {
                i += 1;
                let path = args.get(i).context("--routines requires a file path")?;
                routines_path = Some(PathBuf::from(path));
            }
            "--transition" => {
                i += 1;
                let secs = args.get(i).context("--transition requires a value")?;
                let secs: u32 = secs
                    .parse()
                    .with_context(|| format!("Invalid transition value: {}", secs))?;
                transition_override = Some(secs);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Ok(Options {
        command,
        routines_path,
        transition_override,
    })
}

/// Install a file-backed subscriber when RUST_LOG is set. The TUI owns
/// the terminal, so log lines must not go to stdout/stderr.
fn init_tracing() {
    if env::var("RUST_LOG").is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("poseflow.log")
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Resolve the routine file path and load it, falling back to the
/// built-in sample set when nothing is on disk.
fn load_routines(path: Option<&Path>) -> Result<(RoutineFile, Option<PathBuf>)> {
    match path {
        Some(path) => {
            let file = RoutineFile::load(path)
                .with_context(|| format!("Failed to load routines from {:?}", path))?;
            Ok((file, Some(path.to_path_buf())))
        }
        None => {
            let default = Path::new(DEFAULT_ROUTINE_FILE);
            if default.exists() {
                let file = RoutineFile::load(default)
                    .with_context(|| format!("Failed to load routines from {:?}", default))?;
                Ok((file, Some(default.to_path_buf())))
            } else {
                Ok((RoutineFile::sample(), None))
            }
        }
    }
}

fn list_routines(library: &RoutineLibrary, transition_secs: u32) {
    if library.is_empty() {
        println!("No routines defined.");
        return;
    }
    for routine in library.routines() {
        println!(
            "{:<12} {} ({} poses, {}s total)",
            routine.id,
            routine.name,
            routine.pose_count(),
            routine.total_secs(transition_secs)
        );
    }
}

/// Whether the run loop should keep going
#[derive(Debug, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Quit,
}

/// Apply one control action to the player, keeping the clock in
/// lockstep with the playing/paused state.
fn apply_action(
    action: ControlAction,
    controller: &mut PlaybackController,
    clock: &mut TickClock,
    ui: &mut UiState,
) -> LoopControl {
    match action {
        ControlAction::Start => {
            if controller.start() {
                clock.start();
            }
        }
        ControlAction::TogglePause => {
            if controller.toggle_pause() {
                if controller.is_paused() {
                    clock.pause();
                } else {
                    clock.resume();
                }
            }
        }
        ControlAction::Restart => {
            if controller.restart() {
                clock.start();
            }
        }
        ControlAction::ExitPlayback => {
            if controller.exit() {
                clock.stop();
            }
        }
        ControlAction::NextRoutine => {
            if controller.select_next() {
                ui.highlighted_pose = 0;
            }
        }
        ControlAction::PrevRoutine => {
            if controller.select_prev() {
                ui.highlighted_pose = 0;
            }
        }
        ControlAction::NextPose => {
            let count = controller
                .selected_routine()
                .map(|r| r.pose_count())
                .unwrap_or(0);
            ui.highlight_next_pose(count);
        }
        ControlAction::PrevPose => {
            ui.highlight_prev_pose();
        }
        ControlAction::AdjustPoseDuration(delta) => {
            let pose = controller
                .selected_routine()
                .and_then(|r| r.poses.get(ui.highlighted_pose))
                .map(|p| (p.id.clone(), p.name.clone()));
            if let Some((id, name)) = pose {
                if let Some(secs) = controller.adjust_pose_duration(&id, delta) {
                    ui.set_status(format!("{}: hold {}s", name, secs));
                }
            }
        }
        ControlAction::AdjustTransition(delta) => {
            let secs = controller.adjust_transition(delta);
            ui.set_status(format!("Transition: {}s", secs));
        }
        ControlAction::ToggleHelp => {
            ui.show_help = !ui.show_help;
        }
        ControlAction::Quit => return LoopControl::Quit,
        ControlAction::None => {}
    }
    LoopControl::Continue
}

/// The interactive player loop: input, due tick, file reloads, draw.
fn run_player(
    library: RoutineLibrary,
    transition_secs: u32,
    watch_path: Option<&Path>,
) -> Result<()> {
    let mut controller = PlaybackController::new(library, transition_secs);
    let keyboard = KeyboardController::with_defaults();
    let mut clock = TickClock::default();
    let mut ui = UiState::default();
    let mut pending_reload: Option<RoutineFile> = None;

    let watcher = match watch_path {
        Some(path) => Some(
            LibraryWatcher::new(path, None)
                .with_context(|| format!("Failed to watch {:?}", path))?,
        ),
        None => None,
    };

    let mut app = App::new().context("Failed to initialize terminal")?;
    info!(routines = controller.library().len(), "player started");

    loop {
        if let Some(Event::Key(key)) = app.poll_event(clock.time_until_next_tick())? {
            if key.kind == KeyEventKind::Press {
                if let Some(action) = keyboard.get_action(key.code, key.modifiers) {
                    if apply_action(action, &mut controller, &mut clock, &mut ui)
                        == LoopControl::Quit
                    {
                        break;
                    }
                }
            }
        }

        if clock.poll() {
            controller.on_tick();
            if !controller.is_playing() {
                // Natural completion
                clock.stop();
                ui.set_status("Routine complete");
            }
        }

        if let Some(watcher) = &watcher {
            for event in watcher.recv_all() {
                match event {
                    LibraryEvent::Reloaded(file) => pending_reload = Some(*file),
                    LibraryEvent::Error(message) => ui.set_status(message),
                }
            }
        }
        // Reloads are held until playback is over
        if !controller.is_playing() {
            if let Some(file) = pending_reload.take() {
                controller.replace_library(file.into_library());
                let count = controller
                    .selected_routine()
                    .map(|r| r.pose_count())
                    .unwrap_or(0);
                ui.clamp_highlight(count);
                ui.set_status("Routine file reloaded");
            }
        }

        ui.clear_expired_status();
        app.draw(&controller, &keyboard, &ui)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if let Command::WriteSample(path) = &options.command {
        RoutineFile::sample()
            .save(path)
            .with_context(|| format!("Failed to write sample routines to {:?}", path))?;
        println!("Sample routines written to {:?}", path);
        return Ok(());
    }

    let (file, loaded_path) = load_routines(options.routines_path.as_deref())?;
    let transition_secs = options
        .transition_override
        .unwrap_or_else(|| file.transition_secs());
    let library = file.into_library();

    match options.command {
        Command::ListRoutines => {
            list_routines(&library, transition_secs.max(routine::MIN_TRANSITION));
        }
        Command::Total(id) => match library.get(&id) {
            Some(routine) => {
                println!("{}s", routine.total_secs(transition_secs.max(routine::MIN_TRANSITION)));
            }
            None => {
                eprintln!("Unknown routine: {}", id);
                eprintln!("Use --list-routines to see available routines");
                std::process::exit(1);
            }
        },
        Command::Play => {
            init_tracing();
            run_player(
                library,
                transition_secs.max(routine::MIN_TRANSITION),
                loaded_path.as_deref(),
            )?;
        }
        Command::WriteSample(_) => unreachable!(),
    }

    Ok(())
}

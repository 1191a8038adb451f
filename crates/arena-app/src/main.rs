//! arena-headless: run the arena simulation without a renderer.
//!
//! Usage:
//!   arena-headless [--settings settings.json] [--tuning tuning.json] [--ticks N] [--realtime]
//!
//! In realtime mode, console lines `pause`, `resume`, `grant <id>` and `quit`
//! are forwarded to the running game.

use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use arena_app::game_loop::{self, HostCommand, HostOptions, VirtualClock, WallClock, FRAME_DURATION};
use arena_app::presenter::LogPresenter;
use arena_app::settings::{self, SettingsStore};
use arena_core::commands::PlayerCommand;
use arena_core::config::Tuning;
use arena_core::enums::AbilityKind;
use arena_sim::{SimConfig, SimulationEngine};

const DEFAULT_SETTINGS_PATH: &str = "arena-settings.json";
/// Virtual runs without `--ticks` stop after ten simulated minutes.
const DEFAULT_VIRTUAL_TICKS: u64 = 60 * 60 * 10;

struct Args {
    settings: PathBuf,
    tuning: Option<PathBuf>,
    ticks: Option<u64>,
    realtime: bool,
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let store = SettingsStore::new(&args.settings);
    let session = match store.load_or_init() {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "settings unusable");
            process::exit(1);
        }
    };
    let tuning = match &args.tuning {
        Some(path) => match settings::load_tuning(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                error!(%err, "tuning override unusable");
                process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    info!(
        class = ?session.class(),
        world = ?session.world(),
        seed = session.seed,
        realtime = args.realtime,
        "=== arena-headless startup ==="
    );

    let mut engine = SimulationEngine::new(SimConfig::from_settings(session, tuning));
    let mut presenter = LogPresenter::default();

    let summary = if args.realtime {
        let options = HostOptions {
            max_ticks: args.ticks,
        };
        let commands = spawn_console_reader();
        game_loop::run(
            &mut engine,
            &mut WallClock::new(FRAME_DURATION),
            &mut presenter,
            &commands,
            options,
        )
    } else {
        let options = HostOptions {
            max_ticks: Some(args.ticks.unwrap_or(DEFAULT_VIRTUAL_TICKS)),
        };
        let (_tx, commands) = mpsc::channel();
        game_loop::run(
            &mut engine,
            &mut VirtualClock::default(),
            &mut presenter,
            &commands,
            options,
        )
    };

    info!(
        phase = ?summary.phase,
        secs = summary.elapsed_secs,
        kills = summary.stats.kills,
        "run complete"
    );
}

/// Reads console lines on a background thread and forwards them as commands.
fn spawn_console_reader() -> mpsc::Receiver<HostCommand> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("arena-console".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let Some(command) = parse_console_line(&line) else {
                    if !line.trim().is_empty() {
                        warn!(input = line.trim(), "unknown console command");
                    }
                    continue;
                };
                if tx.send(command).is_err() {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        warn!(%err, "console input unavailable");
    }
    rx
}

fn parse_console_line(line: &str) -> Option<HostCommand> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "pause" | "p" => HostCommand::Player(PlayerCommand::Pause),
        "resume" | "r" => HostCommand::Player(PlayerCommand::Resume),
        "quit" | "q" => HostCommand::Shutdown,
        "grant" => {
            let kind = AbilityKind::from_id(words.next()?.parse().ok()?)?;
            HostCommand::Player(PlayerCommand::GrantAbility { kind })
        }
        _ => return None,
    };
    Some(command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        settings: PathBuf::from(DEFAULT_SETTINGS_PATH),
        tuning: None,
        ticks: None,
        realtime: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                parsed.settings = args.next().ok_or("--settings needs a path")?.into();
            }
            "--tuning" => {
                parsed.tuning = Some(args.next().ok_or("--tuning needs a path")?.into());
            }
            "--ticks" => {
                let raw = args.next().ok_or("--ticks needs a number")?;
                let ticks = raw
                    .parse()
                    .map_err(|_| format!("--ticks: not a number: {raw}"))?;
                parsed.ticks = Some(ticks);
            }
            "--realtime" => parsed.realtime = true,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn print_usage() {
    eprintln!(
        "arena-headless: run the arena simulation without a renderer\n\
         \n\
           --settings <path>  Settings blob (default: {DEFAULT_SETTINGS_PATH}, created if missing)\n\
           --tuning <path>    Partial tuning override JSON\n\
           --ticks <N>        Stop after N ticks\n\
           --realtime         Pace frames to the wall clock and read console commands\n\
         \n\
         Logging follows RUST_LOG (default: info).\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_lines() {
        assert!(matches!(
            parse_console_line(" pause "),
            Some(HostCommand::Player(PlayerCommand::Pause))
        ));
        assert!(matches!(parse_console_line("q"), Some(HostCommand::Shutdown)));
        let id = AbilityKind::Magnet.id().to_string();
        assert!(matches!(
            parse_console_line(&format!("grant {id}")),
            Some(HostCommand::Player(PlayerCommand::GrantAbility {
                kind: AbilityKind::Magnet
            }))
        ));
        assert!(parse_console_line("grant 250").is_none());
        assert!(parse_console_line("grant").is_none());
        assert!(parse_console_line("dance").is_none());
    }

    #[test]
    fn test_args() {
        let args = |list: &[&str]| parse_args(list.iter().map(|s| s.to_string()));
        let parsed = args(&["--ticks", "30", "--realtime", "--tuning", "t.json"]).unwrap();
        assert_eq!(parsed.ticks, Some(30));
        assert!(parsed.realtime);
        assert_eq!(parsed.tuning, Some(PathBuf::from("t.json")));
        assert_eq!(parsed.settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
        assert!(args(&["--ticks", "many"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }
}

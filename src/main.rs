use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lane_racer::build_info;
use lane_racer::core::logging::init_logging;
use lane_racer::core::RaceConfig;
use lane_racer::input::{map_key, AppAction};
use lane_racer::racer::{FrameClock, RaceController};
use lane_racer::ui::render_race_scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Idle poll interval when no session is ticking.
const IDLE_POLL_MS: u64 = 100;

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
    log: Option<PathBuf>,
}

fn print_help() {
    println!("Lane Racer - Terminal Car Racing Game\n");
    println!("Usage: lane-racer [options]\n");
    println!("Options:");
    println!("  --config <path>  Load race settings from a JSON file");
    println!("  --seed <n>       Seed the obstacle generator for a repeatable run");
    println!("  --log <path>     Write the log to this file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'lane-racer --help' for usage.");
    std::process::exit(1);
}

fn parse_args() -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!(
                    "lane-racer {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" => match args.next() {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => usage_error("--config requires a path"),
            },
            "--log" => match args.next() {
                Some(path) => parsed.log = Some(PathBuf::from(path)),
                None => usage_error("--log requires a path"),
            },
            "--seed" => match args.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => parsed.seed = Some(seed),
                _ => usage_error("--seed requires an unsigned integer"),
            },
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
    }

    parsed
}

fn main() -> io::Result<()> {
    let args = parse_args();

    match init_logging(args.log.as_deref()) {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(e) => println!("Warning: logging disabled: {}", e),
    }

    let (config, source) = match RaceConfig::load_or_default(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    match &source {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("Using default config"),
    }

    let rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut controller = RaceController::new(config, rng)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("Exiting with score {}", controller.session().score);
    result
}

/// Main loop: draw, wait for input until the next tick is due, then feed
/// elapsed time to the controller.
fn run<B: ratatui::backend::Backend, R: rand::Rng>(
    terminal: &mut Terminal<B>,
    controller: &mut RaceController<R>,
) -> io::Result<()> {
    let mut clock = FrameClock::new(Instant::now());

    loop {
        let view = controller.view();
        terminal.draw(|frame| {
            let area = frame.size();
            render_race_scene(frame, area, &view);
        })?;

        let timeout = controller
            .scheduler()
            .until_next()
            .unwrap_or(Duration::from_millis(IDLE_POLL_MS));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event) {
                    Some(AppAction::Quit) => return Ok(()),
                    Some(AppAction::Race(input)) => {
                        controller.handle_input(input);
                    }
                    None => {}
                }
            }
        }

        controller.advance(clock.elapsed_ms(Instant::now()));
    }
}

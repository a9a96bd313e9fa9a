// algoscope: step-accurate algorithm animator for the terminal

use std::fs::File;
use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

use algoscope::checkpoint::Event;
use algoscope::config::{RunConfig, RunConfigBuilder};
use algoscope::demo::{self, Scenario, USAGE};
use algoscope::sequencer::{CancelToken, Sequencer, TraceRecorder};
use algoscope::ui::App;

const LOG_FILE: &str = "algoscope.log";

struct Options {
    scenario: Scenario,
    config: RunConfig,
    verbose: bool,
    headless: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <scenario> [args] [options]", program);
    eprintln!();
    eprintln!("{}", USAGE);
    eprintln!();
    eprintln!("options:");
    eprintln!("  --seed N       maze seed (default 42)");
    eprintln!("  --delay MS     pause after each checkpoint (default 120)");
    eprintln!("  --size RxC     grid size for mazes and paths (default 21x41)");
    eprintln!("  --buckets N    hash table buckets (default 8)");
    eprintln!("  --budget N     stop after N checkpoints");
    eprintln!("  --headless     print checkpoints instead of animating them");
    eprintln!("  --verbose      debug logging to {}", LOG_FILE);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} dlist", program);
    eprintln!("  {} path astar sidewinder --seed 7", program);
    std::process::exit(1);
}

fn parse_flag<T: std::str::FromStr>(program: &str, flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("Error: {} needs a numeric value", flag);
            usage(program)
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let program = args.first().map(|s| s.as_str()).unwrap_or("algoscope");
    let mut builder: RunConfigBuilder = RunConfig::builder();
    let mut positional: Vec<&str> = Vec::new();
    let mut verbose = false;
    let mut headless = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => builder = builder.seed(parse_flag(program, arg, iter.next())),
            "--delay" => {
                builder = builder.step_delay(Duration::from_millis(parse_flag(program, arg, iter.next())))
            }
            "--buckets" => builder = builder.bucket_count(parse_flag(program, arg, iter.next())),
            "--budget" => builder = builder.checkpoint_budget(parse_flag(program, arg, iter.next())),
            "--size" => {
                let size = iter.next().and_then(|s| {
                    let (r, c) = s.split_once(['x', 'X'])?;
                    Some((r.parse().ok()?, c.parse().ok()?))
                });
                match size {
                    Some((rows, cols)) => builder = builder.grid(rows, cols),
                    None => {
                        eprintln!("Error: --size expects ROWSxCOLS");
                        usage(program)
                    }
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--headless" => headless = true,
            "--help" | "-h" => usage(program),
            other => positional.push(other),
        }
    }

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            usage(program)
        }
    };
    let scenario = match Scenario::parse(&positional) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {}", e);
            usage(program)
        }
    };

    Options {
        scenario,
        config,
        verbose,
        headless,
    }
}

fn run_headless(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let recorder = TraceRecorder::new();
    let mut seq = Sequencer::new(recorder.clone(), recorder.clone())
        .with_budget(options.config.checkpoint_budget);
    let result = demo::play(options.scenario, &options.config, &mut seq);

    for event in recorder.events() {
        match event {
            Event::Checkpoint(c) => println!("  {}", c),
            Event::Explain(text) => println!("# {}", text),
        }
    }
    let reports = result?;
    println!(
        "{} runs, {} checkpoints",
        reports.len(),
        reports.iter().map(|r| r.checkpoints).sum::<usize>()
    );
    Ok(())
}

fn run_tui(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();
    let title = options.scenario.to_string();
    let res = {
        let mut app = App::new(&mut terminal, title, rx, cancel.clone(), options.config.step_delay);
        let played = {
            let mut seq = Sequencer::new(&mut app, tx)
                .with_cancel_token(cancel.clone())
                .with_budget(options.config.checkpoint_budget);
            demo::play(options.scenario, &options.config, &mut seq)
        };
        match played {
            Ok(_) if cancel.is_cancelled() => Ok(()),
            Ok(_) => app.finish(),
            Err(e) => {
                log::error!("run failed: {}", e);
                app.fail(&e.to_string())
            }
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = File::create(LOG_FILE)
        .map_err(|e| e.to_string())
        .and_then(|file| WriteLogger::init(level, Config::default(), file).map_err(|e| e.to_string()))
    {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("algoscope starting: {} with {:?}", options.scenario, options.config);

    if options.headless {
        run_headless(&options)
    } else {
        run_tui(&options)
    }
}

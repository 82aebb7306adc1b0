// fitsim: placement-strategy allocation simulator

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use fitsim::diagnostics;
use fitsim::placement::Strategy;
use fitsim::script::Script;
use fitsim::simulator::constants::{DEFAULT_SNAPSHOT_LIMIT, DEMO_BOUNDED_STEPS};
use fitsim::snapshot::Timeline;
use fitsim::ui::App;

/// Simulate first-fit, best-fit and worst-fit placement over a bounded address space.
#[derive(Parser)]
#[command(name = "fitsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON simulation script (runs the built-in demo when omitted)
    script: Option<PathBuf>,

    /// Override the script's placement strategy
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Override the script's address space size
    #[arg(long)]
    size: Option<i64>,

    /// Process at most this many instructions and report the paused state
    #[arg(long)]
    steps: Option<usize>,

    /// Run the script under every strategy and print a comparison table
    #[arg(long, conflicts_with = "tui")]
    compare: bool,

    /// Browse the run step by step in a terminal viewer
    #[arg(long)]
    tui: bool,

    /// Byte budget for the viewer's captured timeline
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    snapshot_limit: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The alternate screen owns the terminal in viewer mode
    if !cli.tui {
        setup_logging(cli.verbose);
    }

    let is_demo = cli.script.is_none();
    let mut script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(),
    };
    if let Some(strategy) = cli.strategy {
        script.strategy = strategy;
    }
    if let Some(size) = cli.size {
        script.size = size;
    }

    if cli.compare {
        let rows =
            diagnostics::strategy_comparison(script.space_size()?, &script.to_instructions()?)?;
        print!("{}", diagnostics::comparison_table(&rows));
        return Ok(());
    }

    let mut sim = script.build()?;

    if cli.tui {
        let timeline = Timeline::capture(sim, cli.snapshot_limit)?;
        return run_viewer(timeline);
    }

    // The demo pauses after a bounded run, then finishes the queue
    let outcomes = match (cli.steps, is_demo) {
        (Some(steps), _) => sim.run(steps),
        (None, true) => {
            let mut outcomes = sim.run(DEMO_BOUNDED_STEPS);
            outcomes.extend(sim.run_all());
            outcomes
        }
        (None, false) => sim.run_all(),
    };

    for outcome in &outcomes {
        println!("{}", outcome);
    }
    print!("{}", diagnostics::simulation_details(&sim));

    Ok(())
}

fn run_viewer(timeline: Timeline) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(timeline);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

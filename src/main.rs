use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use texlife::camera::Camera;
use texlife::config::Config;
use texlife::config::LOG_ENV;
use texlife::engine::Phase;
use texlife::engine::SimulationEngine;
use texlife::error::EngineError;
use texlife::error::Stage;
use texlife::events::AppEvent;
use texlife::events::CameraEvent;
use texlife::events::EngineEvent;
use texlife::events::Event;
use texlife::io::convert_event;
use texlife::seed::FixedSource;
use texlife::seed::SeedSource;
use texlife::ScreenSize;

/// Rows kept under the view for the status line
const STATUS_ROWS: ScreenSize = 1;

/// Raw mode on the alternate screen, restored on drop
struct RawTerminal;

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Seed from whatever the source hands out. Returns the notice for the status line.
fn reseed(engine: &mut SimulationEngine, source: &mut impl SeedSource) -> String {
    let Some(path) = source.pick() else {
        warn!("no seed image given");
        return "No seed image, pass the path of a bitmap to start".to_string();
    };

    match engine.seed_from_path(&path) {
        Ok(()) => format!("Seeded from {}", path.display()),
        Err(e) => {
            let e = anyhow::Error::new(e);
            warn!(path = %path.display(), "seeding failed: {e:#}");

            format!("{e:#}")
        }
    }
}

fn draw(stdout: &mut impl Write, view: &str, status: &str) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in view.lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(status)
    )?;

    stdout.flush()
}

fn view_size(cols: ScreenSize, rows: ScreenSize) -> (ScreenSize, ScreenSize) {
    (cols, rows.saturating_sub(STATUS_ROWS))
}

fn run() -> anyhow::Result<()> {
    let config = Config::default();
    let mut source = FixedSource(std::env::args_os().nth(1).map(PathBuf::from));

    let mut engine = SimulationEngine::new(&config)?;
    let mut notice = reseed(&mut engine, &mut source);

    let _terminal = RawTerminal::enter().context(Stage::Terminal)?;
    let mut stdout = io::stdout();

    let (cols, rows) = terminal::size().context(Stage::Terminal)?;
    let (cols, rows) = view_size(cols, rows);
    let mut cam = Camera::from_terminal(cols, rows);

    let frametime = config.frametime();

    'main: loop {
        let deadline = Instant::now() + frametime;

        engine.tick().context(Stage::Step)?;
        let frame = engine.present().context(Stage::Step)?;

        cam.reset();
        cam.draw(&frame);

        let status = match engine.phase() {
            Phase::AwaitingSeed => format!("{notice} | paused"),
            Phase::Seeded { .. } => format!("{notice} | generation {}", engine.generation()),
        };

        draw(&mut stdout, cam.render(), &status).context(Stage::Terminal)?;

        // Spend the rest of the frame waiting on input
        while event::poll(deadline.saturating_duration_since(Instant::now()))
            .context(Stage::Terminal)?
        {
            let event = event::read().context(Stage::Terminal)?;

            match convert_event(event) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => break 'main,
                Some(Event::AppEvent(AppEvent::CameraEvent(event))) => match event {
                    CameraEvent::MoveUp => cam.move_up(),
                    CameraEvent::MoveDown => cam.move_down(),
                    CameraEvent::MoveLeft => cam.move_left(),
                    CameraEvent::MoveRight => cam.move_right(),
                    CameraEvent::ResetView => cam.reset_view(),
                    CameraEvent::Resize { cols, rows } => {
                        let (cols, rows) = view_size(cols, rows);
                        cam.resize(cols, rows);
                    }
                },
                Some(Event::EngineEvent(EngineEvent::Reseed)) => {
                    notice = reseed(&mut engine, &mut source);
                }
            }
        }
    }

    info!(generation = engine.generation(), "exiting");

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let stage = e
                .downcast_ref::<Stage>()
                .copied()
                .or_else(|| e.downcast_ref::<EngineError>().map(|e| e.stage));

            error!(?stage, "{e:#}");

            ExitCode::from(stage.map_or(1, Stage::exit_code))
        }
    }
}

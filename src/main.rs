use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use scroll_shooter::config::GameConfig;
use scroll_shooter::display::TerminalSurface;
use scroll_shooter::driver::{FixedRate, FrameScheduler, Game};
use scroll_shooter::input::KeyTracker;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so logs only go to a file, and only when
/// one is configured.
fn init_logging(config: &GameConfig) -> std::io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut Game<StdRng>,
    scheduler: &mut impl FrameScheduler,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut tracker = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                surface.resize(cols, rows);
            }
            tracker.record(&ev, frame);
        }
        if tracker.quit_requested() {
            log::info!("quit requested at frame {frame}");
            return Ok(());
        }

        let input = tracker.sample(frame);
        game.frame(&input, surface)?;

        scheduler.wait_next_frame();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("scroll_shooter: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("scroll_shooter: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }
    log::info!("starting with {config:?}");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("terminal error: {e}");
            eprintln!("scroll_shooter: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &GameConfig) -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    let mut keyboard_enhanced = false;
    let result = session(&mut out, config, &mut keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Everything between entering and leaving raw mode.  Any error here still
/// goes through the restore path in `run`.
fn session<W: Write>(
    out: &mut W,
    config: &GameConfig,
    keyboard_enhanced: &mut bool,
) -> std::io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    *keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    play(out, config, &rx)
}

fn play<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let rng = match config.seed {
        Some(seed) => {
            log::info!("seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size()?;
    let mut surface =
        TerminalSurface::new(out, cols, rows, config.field_width, config.field_height);
    let mut game = Game::new(config.field_width, config.field_height, rng);
    let mut scheduler = FixedRate::new(config.fps);

    game_loop(&mut surface, &mut game, &mut scheduler, rx)
}

mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use invaders::compute::{init_state, on_debug_kill, step_frame};
use invaders::config::RoundConfig;
use invaders::draw::draw_list;
use invaders::entities::{InputState, RoundEvent, RoundState};
use invaders::schedule::Timers;

#[derive(Parser, Debug)]
#[command(name = "invaders")]
#[command(about = "Single-round terminal space shooter")]
struct Args {
    /// TOML file overriding round defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy fire and bonus timing (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Ring the terminal bell on explosions
    #[arg(long)]
    sound: bool,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the
/// OS key-repeat rate is ≥ 15 Hz, so ≈133 ms is always refreshed before
/// expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn sample_input(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> InputState {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_seen, k, now));
    InputState {
        left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: any(&[KeyCode::Char(' ')]),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

// ── Sound hooks ───────────────────────────────────────────────────────────────

fn play_events<W: Write>(out: &mut W, events: &[RoundEvent], sound: bool) -> std::io::Result<()> {
    for ev in events {
        debug!(?ev, "round event");
        let explosion = matches!(
            ev,
            RoundEvent::EnemiesDestroyed { .. } | RoundEvent::BonusDestroyed | RoundEvent::PlayerHit
        );
        if sound && explosion {
            out.queue(Print("\x07"))?;
        }
    }
    Ok(())
}

// ── Round loop ────────────────────────────────────────────────────────────────

/// Runs until the player quits (`q`, Esc or Ctrl-C).  The round never ends
/// on its own.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_seen` map of when each key was last pressed or repeated.  Every
/// frame the keys that are still "fresh" become the level-triggered
/// `InputState`, so Space + A/D can be held together.  Keyboard-enhancement
/// terminals also deliver `Release`, which drops the key immediately.
fn round_loop<W: Write>(
    out: &mut W,
    state: &mut RoundState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame: Duration,
    sound: bool,
) -> anyhow::Result<()> {
    let mut timers = Timers::new(&state.config, state.clock_ms, rng);
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut events: Vec<RoundEvent> = Vec::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_seen.insert(code.clone(), frame_start);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!(score = state.score, "quit");
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            info!(score = state.score, "quit");
                            return Ok(());
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            *state = on_debug_kill(state, rng);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_seen.insert(code.clone(), frame_start);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let input = sample_input(&key_seen, frame_start);
        let elapsed_ms = frame_start.duration_since(last).as_millis() as u64;
        last = frame_start;

        events.clear();
        *state = step_frame(state, &mut timers, &input, elapsed_ms, rng, &mut events);
        play_events(out, &events, sound)?;

        let (width, height) = terminal::size()?;
        let view = display::Viewport::for_terminal(
            width,
            height,
            state.config.screen_width,
            state.config.screen_height,
        );
        display::render(out, &draw_list(state), &view)?;

        let spent = frame_start.elapsed();
        if spent < frame {
            thread::sleep(frame - spent);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => RoundConfig::load_from_file(path)?,
        None => RoundConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame = Duration::from_secs(1) / args.fps.max(1);
    info!(?args.seed, fps = args.fps, "starting round");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the round loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut state = init_state(config);
    let result = round_loop(&mut out, &mut state, &rx, &mut rng, frame, args.sound);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = state.score, frames = state.frame, "round over");
    result
}

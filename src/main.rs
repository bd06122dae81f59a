mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use dodge_game::clock::MonotonicClock;
use dodge_game::compute::{GameLoop, TickOutcome};
use dodge_game::config::GameConfig;
use dodge_game::entities::GameStatus;
use dodge_game::spawn::ColumnSpawner;

use display::Hud;

type Game = GameLoop<MonotonicClock, ColumnSpawner<StdRng>>;

#[derive(Parser, Debug)]
#[command(name = "dodge_game", about = "Dodge the falling enemies")]
struct Args {
    /// RON file overriding the default game settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy placement and speed.
    #[arg(long)]
    seed: Option<u64>,
}

enum LoopEnd {
    Quit,
    Restart,
}

fn init_tracing() {
    // Logs go to stderr; the game owns stdout.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

fn new_game(config: &GameConfig, seed: Option<u64>) -> Result<Game> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    GameLoop::new(config.clone(), MonotonicClock::new(), ColumnSpawner::new(rng))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive one game until the player quits or asks for a restart.
///
/// Each frame drains pending input, ticks the simulation while it is still
/// playing, redraws, then sleeps out whatever remains of the delay the tick
/// asked for.  Once the game is over no further ticks are issued; the
/// screen stays up until R or Q.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    hud: &mut Hud,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopEnd> {
    let mut delay = game.config().tick_interval();

    loop {
        let frame_start = Instant::now();

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(LoopEnd::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(LoopEnd::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if game.status() == GameStatus::GameOver =>
                {
                    return Ok(LoopEnd::Restart);
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A')
                    if game.status() == GameStatus::Playing =>
                {
                    game.move_player_left();
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D')
                    if game.status() == GameStatus::Playing =>
                {
                    game.move_player_right();
                }
                _ => {}
            }
        }

        if game.status() == GameStatus::Playing {
            match game.tick(hud) {
                TickOutcome::Continue(next) => delay = next,
                TickOutcome::GameOver => info!("game over"),
            }
        }

        display::render(out, game, hud)?;

        let elapsed = frame_start.elapsed();
        let wait = if game.status() == GameStatus::Playing {
            delay
        } else {
            // Idle redraw rate while waiting on the game-over screen.
            Duration::from_millis(50)
        };
        if elapsed < wait {
            thread::sleep(wait - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    config.validate()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Kitty-protocol terminals report press/repeat/release; others fall back.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never
    // waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config, args.seed);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    seed: Option<u64>,
) -> Result<()> {
    loop {
        let mut game = new_game(config, seed)?;
        let mut hud = Hud::new(game.player().lives);
        info!(max_enemies = config.max_enemies, "starting game");

        match game_loop(out, &mut game, &mut hud, rx)? {
            LoopEnd::Quit => break,
            LoopEnd::Restart => continue,
        }
    }
    Ok(())
}

//! Terminal falling-block runner (default binary).
//!
//! Reads key-down edges with crossterm, feeds them to the simulation once per
//! frame and draws the snapshot through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use blockfall::core::{GameEvent, GameState, SimpleRng};
use blockfall::input::{should_quit, KeyEdges};
use blockfall::persist::FileScoreStore;
use blockfall::settings::{load_config, Args};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

type Game = GameState<SimpleRng, FileScoreStore>;

#[derive(Debug, Default)]
struct SessionStats {
    frames: u64,
    pieces: u64,
    lines: u64,
    games_over: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let seed = args.seed_or_clock();
    let store = FileScoreStore::new(&args.best_file);
    let mut game = GameState::new(config, SimpleRng::new(seed), store)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut stats = SessionStats::default();
    let result = run(&mut term, &mut game, args.tick_ms, &mut stats);

    // Always try to restore terminal state.
    let _ = term.exit();

    report(&game, seed, &stats);
    result
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut Game,
    tick_ms: u32,
    stats: &mut SessionStats,
) -> Result<()> {
    let view = GameView::default();
    let mut edges = KeyEdges::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Wait for input until the next frame is due, then drain what is queued.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        edges.handle(key);
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms, edges.pending());
            edges.clear();
            record(game.events(), stats);
        }
    }
}

fn record(events: &[GameEvent], stats: &mut SessionStats) {
    stats.frames += 1;
    for event in events {
        match *event {
            GameEvent::Locked { lines_cleared, .. } => {
                stats.pieces += 1;
                stats.lines += lines_cleared as u64;
            }
            GameEvent::GameOver { .. } => stats.games_over += 1,
            GameEvent::Restarted { .. } => {}
        }
    }
}

fn report(game: &Game, seed: u32, stats: &SessionStats) {
    let config = game.config();
    println!(
        "[Config] board {}x{} step {}ms lock {}ms seed {}",
        config.width, config.height, config.step_delay_ms, config.lock_delay_ms, seed
    );
    if let Some(err) = game.store().last_error() {
        eprintln!("[Store] {}: {:#}", game.store().path().display(), err);
    }
    println!(
        "[Session] games {} pieces {} lines {} frames {} score {} best {}",
        game.episode() + 1,
        stats.pieces,
        stats.lines,
        stats.frames,
        game.score(),
        game.best_score()
    );
    if stats.games_over > 0 {
        println!("[Session] game over {} time(s)", stats.games_over);
    }
}

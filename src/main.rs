//! Terminal blockfall runner (default binary).
//!
//! The game itself runs inside the engine actor on a tokio runtime. This
//! thread only reads key presses, forwards them as commands and pulls a
//! snapshot every 30ms to draw it.

mod logging;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event;
use log::{info, warn};
use tokio::runtime::Runtime;
use tokio::sync::broadcast::{self, error::RecvError};

use blockfall::core::GameEvent;
use blockfall::engine::{self, Engine, EngineConfig, EngineError, GameHandle};
use blockfall::input::{map_event, KeyAction};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::RENDER_INTERVAL_MS;

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let rt = Runtime::new()?;
    let guard = rt.enter();
    logging::init(&config)?;

    let Engine {
        handle,
        events,
        task: engine_task,
    } = engine::spawn(config);
    rt.spawn(announce_events(events));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &handle);
    // Always try to restore terminal state.
    let _ = term.exit();

    let last = rt.block_on(async move {
        let _ = handle.shutdown().await;
        engine_task.await
    })?;
    println!(
        "score {}  level {}  lines {}",
        last.score, last.level, last.total_lines
    );

    drop(guard);
    rt.shutdown_timeout(Duration::from_millis(200));
    result
}

fn run(term: &mut TerminalRenderer, handle: &GameHandle) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(RENDER_INTERVAL_MS as u64);
    let mut next_frame = Instant::now();

    loop {
        if Instant::now() >= next_frame {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&handle.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            next_frame = Instant::now() + frame;
        }

        let timeout = next_frame.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            event::Event::Resize(..) => term.invalidate(),
            ev => match map_event(&ev) {
                Some(KeyAction::Quit) => return Ok(()),
                Some(KeyAction::Command(command)) => match handle.try_send(command) {
                    Ok(()) | Err(EngineError::QueueFull) => {}
                    Err(EngineError::Closed) => return Ok(()),
                },
                None => {}
            },
        }
    }
}

/// Stand-in for the audio collaborator: one log line per sound cue.
async fn announce_events(mut events: broadcast::Receiver<GameEvent>) {
    loop {
        match events.recv().await {
            Ok(GameEvent::RowFlashed { row }) => info!("sound: row {row} flash"),
            Ok(GameEvent::LineCleared { total_lines, .. }) => info!("sound: line ({total_lines})"),
            Ok(GameEvent::LevelUp { level }) => info!("sound: level up to {level}"),
            Ok(GameEvent::GameOver { score }) => info!("sound: game over at {score}"),
            Ok(GameEvent::BannerShown(banner)) => info!("banner: {banner}"),
            Ok(_) => {}
            Err(RecvError::Lagged(n)) => warn!("missed {n} events"),
            Err(RecvError::Closed) => return,
        }
    }
}

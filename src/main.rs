//! Terminal blockfall runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and an
//! interval scheduler pacing the engine at one step per frame.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use blockfall::config::Config;
use blockfall::core::Sequencer;
use blockfall::engine::{frame_task, Engine, IntervalScheduler, Scheduler};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{TerminalRenderer, TerminalSurface, Viewport};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env().context("invalid configuration")?;
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = Rc::new(RefCell::new(Engine::with_sequencer(
        config.engine_config(),
        Sequencer::new(rng),
    )));

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let surface = Rc::new(RefCell::new(TerminalSurface::new(Viewport::new(w, h))));

    let mut scheduler = IntervalScheduler::new(config.tick_interval());
    scheduler.schedule(frame_task(Rc::clone(&engine), Rc::clone(&surface)));

    // Show the first piece before the first frame is due.
    engine.borrow().render(&mut *surface.borrow_mut());
    term.draw(surface.borrow().frame())?;

    loop {
        // Once the game is over the scheduler is idle; wait for quit.
        let timeout = if scheduler.is_idle() {
            config.tick_interval()
        } else {
            scheduler.time_until_next_frame()
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.borrow_mut().handle_input(command);
                    }
                }
                Event::Resize(w, h) => {
                    let mut surface = surface.borrow_mut();
                    surface.set_viewport(Viewport::new(w, h));
                    engine.borrow().render(&mut *surface);
                    term.invalidate();
                    term.draw(surface.frame())?;
                }
                _ => {}
            }
        }

        if scheduler.poll() > 0 {
            term.draw(surface.borrow().frame())?;
        }
    }
}

use std::{
    error::Error,
    fmt::Display,
    io::{self, Write},
    sync::mpsc::{Receiver, TryRecvError},
    thread::sleep,
};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use simulation::{
    drive_rackets, map_key_to_action, PongSimulation, RacketController, Score, Side,
};
use tracing::{debug, info};

use crate::render::Renderer;

/// what the key listener thread tells the game loop.
#[derive(Debug)]
pub(crate) enum HostEvent {
    /// the uppercase ascii code of a pressed key.
    Key(i32),
    /// the terminal changed size, so everything has to be painted again.
    Redraw,
    Quit,
    InputFailed(io::Error),
}

impl HostEvent {
    pub(crate) fn from_key_event(key_event: KeyEvent) -> Option<Self> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers == KeyModifiers::CONTROL => Some(Self::Quit),
            KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char(c) if c.is_ascii() => Some(Self::Key(c.to_ascii_uppercase() as i32)),
            _ => None,
        }
    }
}

/// a game played on this machine: owns the simulation and both racket controllers, and
/// steps them on the simulation's own clock.
pub(crate) struct LocalGame {
    sim: PongSimulation,
    left: Box<dyn RacketController>,
    right: Box<dyn RacketController>,
    renderer: Renderer,
}

impl LocalGame {
    pub(crate) fn new(left: Box<dyn RacketController>, right: Box<dyn RacketController>) -> Self {
        Self {
            sim: PongSimulation::new(),
            left,
            right,
            renderer: Renderer::new(),
        }
    }

    /// runs until the player quits, returning the final score.
    pub(crate) fn run<W: Write>(
        mut self,
        w: &mut W,
        event_rx: Receiver<HostEvent>,
    ) -> Result<Score, ClientError> {
        info!("game started");
        self.renderer.draw(w, &self.sim.snapshot(), true)?;
        let mut tick_period = self.sim.tick_period();
        loop {
            sleep(tick_period);
            let mut repaint = false;
            loop {
                match event_rx.try_recv() {
                    Ok(HostEvent::Key(key_code)) => self.key_pressed(key_code),
                    Ok(HostEvent::Redraw) => repaint = true,
                    Ok(HostEvent::Quit) => {
                        let score = self.sim.score();
                        info!(left = score.left, right = score.right, "game over");
                        return Ok(score);
                    }
                    Ok(HostEvent::InputFailed(err)) => return Err(ClientError::Input(err)),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(ClientError::InputListenerStopped)
                    }
                }
            }
            drive_rackets(&mut self.sim, self.left.as_mut(), self.right.as_mut());
            let tick = self.sim.advance();
            self.renderer
                .draw(w, &self.sim.snapshot(), tick.new_frame || repaint)?;
            tick_period = tick.tick_period;
        }
    }

    fn key_pressed(&mut self, key_code: i32) {
        let Some((side, direction)) = map_key_to_action(key_code) else {
            return;
        };
        debug!(?side, ?direction, "racket key pressed");
        match side {
            Side::Left => self.left.input(direction),
            Side::Right => self.right.input(direction),
        }
    }
}

#[derive(Debug)]
pub(crate) enum ClientError {
    Terminal(io::Error),
    Input(io::Error),
    InputListenerStopped,
    SpawnInputListener(io::Error),
    LogFile(io::Error),
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Terminal(err) => write!(f, "terminal error: {err}"),
            ClientError::Input(err) => write!(f, "failed to read keyboard input: {err}"),
            ClientError::InputListenerStopped => Display::fmt("key listener stopped", f),
            ClientError::SpawnInputListener(err) => {
                write!(f, "failed to start key listener: {err}")
            }
            ClientError::LogFile(err) => write!(f, "failed to create log file: {err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::InputListenerStopped => None,
            ClientError::Terminal(err)
            | ClientError::Input(err)
            | ClientError::SpawnInputListener(err)
            | ClientError::LogFile(err) => Some(err),
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        ClientError::Terminal(err)
    }
}

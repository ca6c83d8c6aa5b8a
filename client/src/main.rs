use std::{
    fs::File,
    io::stdout,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{
        mpsc::{channel, Sender},
        Mutex,
    },
    thread::Builder,
};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use local_game::{ClientError, HostEvent, LocalGame};
use simulation::{HumanController, RacketController, Score, VirtualPlayer};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod local_game;
mod render;

#[derive(Parser)]
#[command(about = "two player pong in the terminal")]
struct Cli {
    /// Who steers the left racket (keys W and S)
    #[arg(long, value_enum, default_value_t = Controller::Human)]
    left: Controller,
    /// Who steers the right racket (keys O and K)
    #[arg(long, value_enum, default_value_t = Controller::Human)]
    right: Controller,
    /// Write logs to this file. Nothing is logged without it, the game owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Controller {
    /// A player at the keyboard
    Human,
    /// The computer
    Virtual,
}

impl Controller {
    fn build(self) -> Box<dyn RacketController> {
        match self {
            Controller::Human => Box::new(HumanController::new()),
            Controller::Virtual => Box::new(VirtualPlayer::new()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(log_file) = &cli.log_file {
        if let Err(err) = init_logging(log_file) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    let result = play(cli.left, cli.right);
    // the terminal has to be usable again before anything is printed.
    let restored = leave_game_screen().map_err(ClientError::Terminal);
    match result.and_then(|score| restored.map(|()| score)) {
        Ok(score) => {
            println!("final score: {} - {}", score.left, score.right);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "game aborted");
            eprintln!("error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}

fn play(left: Controller, right: Controller) -> Result<Score, ClientError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    let (event_tx, event_rx) = channel();
    spawn_key_listener(event_tx)?;
    LocalGame::new(left.build(), right.build()).run(&mut stdout, event_rx)
}

fn leave_game_screen() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)
}

/// the listener outlives the game loop; it is torn down with the process.
fn spawn_key_listener(event_tx: Sender<HostEvent>) -> Result<(), ClientError> {
    Builder::new()
        .name("key_listener".to_owned())
        .spawn(move || loop {
            let host_event = match event::read() {
                Ok(Event::Key(key_event)) => HostEvent::from_key_event(key_event),
                Ok(Event::Resize(..)) => Some(HostEvent::Redraw),
                Ok(_) => None,
                Err(err) => Some(HostEvent::InputFailed(err)),
            };
            let failed = matches!(host_event, Some(HostEvent::InputFailed(_)));
            if let Some(host_event) = host_event {
                if event_tx.send(host_event).is_err() || failed {
                    return;
                }
            }
        })
        .map_err(ClientError::SpawnInputListener)?;
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), ClientError> {
    let file = File::create(path).map_err(ClientError::LogFile)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn both_sides_default_to_humans() {
        let cli = Cli::parse_from(["pong"]);
        assert_eq!(cli.left, Controller::Human);
        assert_eq!(cli.right, Controller::Human);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn virtual_opponent() {
        let cli = Cli::parse_from(["pong", "--right", "virtual", "--log-file", "pong.log"]);
        assert_eq!(cli.left, Controller::Human);
        assert_eq!(cli.right, Controller::Virtual);
        assert_eq!(cli.log_file, Some(PathBuf::from("pong.log")));
    }
}

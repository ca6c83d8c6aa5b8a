pub mod board;
pub mod controller;
pub mod keys;
pub mod simulation;

pub use board::{Ball, Direction, HorizontalDirection, Racket, Score, Side, VerticalDirection};
pub use controller::{drive_rackets, HumanController, RacketController, VirtualPlayer};
pub use keys::map_key_to_action;
pub use simulation::{FlashColour, PongSimulation, Snapshot, Tick, Winner};

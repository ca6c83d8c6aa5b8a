use crate::{
    board::{Direction, Side},
    simulation::{PongSimulation, Snapshot},
};

/// something that decides where a racket should be heading, sampled once per tick.
pub trait RacketController {
    /// returning the racket's current direction leaves it untouched, including any
    /// direction change from bouncing off a wall.
    fn decide_racket_direction(&mut self, side: Side, snapshot: &Snapshot) -> Direction;

    /// a direction requested from the keyboard. controllers that don't listen to the
    /// keyboard ignore it.
    fn input(&mut self, _direction: Direction) {}
}

/// a racket steered by key presses. each press is applied once and the racket then keeps
/// going that way until it hits a wall or another key is pressed.
#[derive(Debug, Default)]
pub struct HumanController {
    pending: Option<Direction>,
}

impl HumanController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RacketController for HumanController {
    fn decide_racket_direction(&mut self, side: Side, snapshot: &Snapshot) -> Direction {
        self.pending
            .take()
            .unwrap_or(snapshot.racket(side).direction)
    }

    fn input(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }
}

/// the computer opponent. it has no playing logic yet, so it leaves its racket doing
/// whatever it was already doing.
#[derive(Debug, Default)]
pub struct VirtualPlayer;

impl VirtualPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl RacketController for VirtualPlayer {
    fn decide_racket_direction(&mut self, side: Side, snapshot: &Snapshot) -> Direction {
        snapshot.racket(side).direction
    }
}

/// asks both controllers for a direction against the same snapshot and hands the answers
/// to the simulation. meant to be called right before [`PongSimulation::advance`].
pub fn drive_rackets(
    sim: &mut PongSimulation,
    left: &mut dyn RacketController,
    right: &mut dyn RacketController,
) {
    let snapshot = sim.snapshot();
    let left_direction = left.decide_racket_direction(Side::Left, &snapshot);
    let right_direction = right.decide_racket_direction(Side::Right, &snapshot);
    sim.set_racket_direction(Side::Left, left_direction);
    sim.set_racket_direction(Side::Right, right_direction);
}

#[cfg(test)]
mod tests {
    use crate::board::MIN_RACKET_POS;

    use super::*;

    #[test]
    fn human_applies_key_press_once() {
        let mut sim = PongSimulation::new();
        let mut left = HumanController::new();
        let mut right = HumanController::new();
        left.input(Direction::Up);
        drive_rackets(&mut sim, &mut left, &mut right);
        assert_eq!(sim.racket(Side::Left).direction, Direction::Up);
        assert_eq!(sim.racket(Side::Right).direction, Direction::None);
        sim.advance();
        drive_rackets(&mut sim, &mut left, &mut right);
        assert_eq!(sim.racket(Side::Left).direction, Direction::Up);
        assert_eq!(sim.racket(Side::Left).pos, 230);
    }

    #[test]
    fn human_keeps_wall_bounce() {
        let mut sim = PongSimulation::new();
        let mut left = HumanController::new();
        let mut right = VirtualPlayer::new();
        left.input(Direction::Up);
        // 240 -> 60 takes 18 ticks, the last of which turns the racket around.
        for _ in 0..18 {
            drive_rackets(&mut sim, &mut left, &mut right);
            sim.advance();
        }
        assert_eq!(sim.racket(Side::Left).pos, MIN_RACKET_POS);
        assert_eq!(sim.racket(Side::Left).direction, Direction::Down);
        drive_rackets(&mut sim, &mut left, &mut right);
        sim.advance();
        assert_eq!(sim.racket(Side::Left).pos, MIN_RACKET_POS + 10);
    }

    #[test]
    fn latest_key_press_wins() {
        let snapshot = PongSimulation::new().snapshot();
        let mut human = HumanController::new();
        human.input(Direction::Up);
        human.input(Direction::Down);
        assert_eq!(
            human.decide_racket_direction(Side::Right, &snapshot),
            Direction::Down
        );
        assert_eq!(
            human.decide_racket_direction(Side::Right, &snapshot),
            Direction::None
        );
    }

    #[test]
    fn virtual_player_ignores_keyboard() {
        let mut sim = PongSimulation::new();
        sim.set_racket_direction(Side::Right, Direction::Down);
        let mut player = VirtualPlayer::new();
        player.input(Direction::Up);
        assert_eq!(
            player.decide_racket_direction(Side::Right, &sim.snapshot()),
            Direction::Down
        );
        assert_eq!(
            player.decide_racket_direction(Side::Left, &sim.snapshot()),
            Direction::None
        );
    }

    #[test]
    fn controllers_are_interchangeable() {
        let mut controllers: [Box<dyn RacketController>; 2] =
            [Box::new(HumanController::new()), Box::new(VirtualPlayer::new())];
        let snapshot = PongSimulation::new().snapshot();
        for controller in controllers.iter_mut() {
            assert_eq!(
                controller.decide_racket_direction(Side::Left, &snapshot),
                Direction::None
            );
        }
    }
}

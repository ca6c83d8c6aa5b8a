use std::time::Duration;

use tracing::{debug, info};

use crate::board::{
    Ball, Direction, HorizontalDirection, Racket, Score, Side, VerticalDirection, BALL_SIZE,
    BALL_STEP, BLINK_LIMIT, BLINK_TICK_PERIOD, BOARD_WIDTH, MAX_RACKET_POS, MAX_X, MAX_Y,
    MIN_RACKET_POS, MIN_X, MIN_Y, NORMAL_TICK_PERIOD, RACKET_HEIGHT, RACKET_STEP,
};

/// who took the most recent point, held until the ball is served again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Winner {
    #[default]
    None,
    LeftWon,
    RightWon,
}

/// which of the two colours the board flashes in while a point is being shown.
/// even blink counts are [`FlashColour::Highlight`], odd ones [`FlashColour::Normal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashColour {
    Highlight,
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlinkState {
    NotBlinking,
    /// always within `0..=BLINK_LIMIT`.
    Counting(u8),
}

/// the outcome of a single [`PongSimulation::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// the ball has been served again, so the whole board should be repainted
    /// rather than erasing the previous sprite positions.
    pub new_frame: bool,
    /// how long the driver should wait before calling `advance` again.
    pub tick_period: Duration,
}

/// everything a renderer or a racket controller may look at, copied out of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub ball: Ball,
    pub left_racket: Racket,
    pub right_racket: Racket,
    pub score: Score,
    /// `None` unless a point is being shown.
    pub flash: Option<FlashColour>,
}

impl Snapshot {
    pub fn racket(&self, side: Side) -> Racket {
        match side {
            Side::Left => self.left_racket,
            Side::Right => self.right_racket,
        }
    }
}

/// the whole game. a driver calls [`PongSimulation::advance`] once per tick, waiting
/// [`Tick::tick_period`] in between, and feeds racket directions in through
/// [`PongSimulation::set_racket_direction`].
#[derive(Debug)]
pub struct PongSimulation {
    ball: Ball,
    left_racket: Racket,
    right_racket: Racket,
    score: Score,
    blink: BlinkState,
    last_winner: Winner,
    tick_period: Duration,
}

impl PongSimulation {
    pub fn new() -> Self {
        debug!("game board created");
        Self {
            ball: Ball::default(),
            left_racket: Racket::default(),
            right_racket: Racket::default(),
            score: Score::default(),
            blink: BlinkState::NotBlinking,
            last_winner: Winner::None,
            tick_period: NORMAL_TICK_PERIOD,
        }
    }

    /// takes effect on the next call to [`PongSimulation::advance`].
    pub fn set_racket_direction(&mut self, side: Side, direction: Direction) {
        self.racket_mut(side).direction = direction;
    }

    pub fn advance(&mut self) -> Tick {
        let new_frame = match self.blink {
            BlinkState::NotBlinking => {
                self.play();
                false
            }
            BlinkState::Counting(counter) => self.count_blink(counter),
        };
        Tick {
            new_frame,
            tick_period: self.tick_period,
        }
    }

    /// whether the racket on the side the ball is on covers the ball's vertical position.
    pub fn shall_ball_return(&self) -> bool {
        let racket = if self.ball.x < BOARD_WIDTH / 2 {
            &self.left_racket
        } else {
            &self.right_racket
        };
        (racket.top()..=racket.bottom()).contains(&self.ball.y)
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn racket(&self, side: Side) -> Racket {
        match side {
            Side::Left => self.left_racket,
            Side::Right => self.right_racket,
        }
    }

    pub fn left_score(&self) -> u32 {
        self.score.left
    }

    pub fn right_score(&self) -> u32 {
        self.score.right
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_blinking(&self) -> bool {
        self.blink != BlinkState::NotBlinking
    }

    /// only `Some` while a point is being shown.
    pub fn flash_colour(&self) -> Option<FlashColour> {
        match self.blink {
            BlinkState::NotBlinking => None,
            BlinkState::Counting(counter) if counter % 2 == 0 => Some(FlashColour::Highlight),
            BlinkState::Counting(_) => Some(FlashColour::Normal),
        }
    }

    pub fn last_winner(&self) -> Winner {
        self.last_winner
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: self.ball,
            left_racket: self.left_racket,
            right_racket: self.right_racket,
            score: self.score,
            flash: self.flash_colour(),
        }
    }

    fn racket_mut(&mut self, side: Side) -> &mut Racket {
        match side {
            Side::Left => &mut self.left_racket,
            Side::Right => &mut self.right_racket,
        }
    }

    fn play(&mut self) {
        move_racket(&mut self.left_racket);
        move_racket(&mut self.right_racket);
        self.move_ball_vertically();
        let winner = self.move_ball_horizontally();
        if winner != Winner::None {
            info!(
                ?winner,
                left = self.score.left,
                right = self.score.right,
                "point scored"
            );
            self.last_winner = winner;
            self.tick_period = BLINK_TICK_PERIOD;
            self.blink = BlinkState::Counting(0);
        }
    }

    /// returns true once the blink sequence is over and the ball has been served again.
    fn count_blink(&mut self, counter: u8) -> bool {
        let counter = counter + 1;
        if counter <= BLINK_LIMIT {
            self.blink = BlinkState::Counting(counter);
            return false;
        }
        self.tick_period = NORMAL_TICK_PERIOD;
        self.blink = BlinkState::NotBlinking;
        // the ball is served from the side that lost the point.
        match self.last_winner {
            Winner::RightWon => {
                self.ball.x = MIN_X;
                self.ball.y = self.left_racket.pos;
            }
            Winner::LeftWon => {
                self.ball.x = MAX_X;
                self.ball.y = self.right_racket.pos;
            }
            Winner::None => {}
        }
        debug!(winner = ?self.last_winner, x = self.ball.x, y = self.ball.y, "ball served");
        self.last_winner = Winner::None;
        true
    }

    fn move_ball_vertically(&mut self) {
        let ball = &mut self.ball;
        match ball.vertical {
            VerticalDirection::Down => {
                if ball.y + BALL_STEP >= MAX_Y {
                    ball.y = MAX_Y;
                    ball.vertical = VerticalDirection::Up;
                } else {
                    ball.y += BALL_STEP;
                }
            }
            VerticalDirection::Up => {
                if ball.y - BALL_STEP <= MIN_Y {
                    ball.y = MIN_Y;
                    ball.vertical = VerticalDirection::Down;
                } else {
                    ball.y -= BALL_STEP;
                }
            }
        }
    }

    /// the ball bounces off the far wall whether or not it was returned.
    fn move_ball_horizontally(&mut self) -> Winner {
        match self.ball.horizontal {
            HorizontalDirection::Right if self.ball.x >= MAX_X => {
                let winner = if self.shall_ball_return() {
                    Winner::None
                } else {
                    self.score.left += 1;
                    Winner::LeftWon
                };
                self.ball.horizontal = HorizontalDirection::Left;
                winner
            }
            HorizontalDirection::Right => {
                self.ball.x = (self.ball.x + BALL_STEP).min(MAX_X);
                Winner::None
            }
            HorizontalDirection::Left if self.ball.x <= MIN_X => {
                let winner = if self.shall_ball_return() {
                    Winner::None
                } else {
                    self.score.right += 1;
                    Winner::RightWon
                };
                self.ball.horizontal = HorizontalDirection::Right;
                winner
            }
            HorizontalDirection::Left => {
                self.ball.x = (self.ball.x - BALL_STEP).max(MIN_X);
                Winner::None
            }
        }
    }
}

impl Default for PongSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PongSimulation {
    fn drop(&mut self) {
        debug!(
            left = self.score.left,
            right = self.score.right,
            "game board destroyed"
        );
    }
}

/// a racket hitting a wall is held at the wall and turned around.
fn move_racket(racket: &mut Racket) {
    match racket.direction {
        Direction::None => {}
        Direction::Up => {
            if racket.pos - RACKET_STEP - RACKET_HEIGHT / 2 <= MIN_Y {
                racket.pos = MIN_RACKET_POS;
                racket.direction = Direction::Down;
            } else {
                racket.pos -= RACKET_STEP;
            }
        }
        Direction::Down => {
            if racket.pos + RACKET_STEP + RACKET_HEIGHT / 2 >= MAX_Y + BALL_SIZE {
                racket.pos = MAX_RACKET_POS;
                racket.direction = Direction::Up;
            } else {
                racket.pos += RACKET_STEP;
            }
        }
    }
}

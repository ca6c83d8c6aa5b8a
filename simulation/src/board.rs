use std::time::Duration;

pub const BOARD_WIDTH: i32 = 640;
pub const BOARD_HEIGHT: i32 = 480;
/// thickness of the top and bottom walls.
pub const LINE_THICKNESS: i32 = 10;
/// gap between a side of the board and the racket on that side.
pub const HORIZONTAL_MARGIN: i32 = 15;
pub const RACKET_WIDTH: i32 = 10;
pub const RACKET_HEIGHT: i32 = 100;
pub const BALL_SIZE: i32 = 15;
pub const BALL_STEP: i32 = 10;
pub const RACKET_STEP: i32 = 10;
/// the last value the blink counter reaches before the ball is served again.
pub const BLINK_LIMIT: u8 = 20;

pub const MIN_X: i32 = HORIZONTAL_MARGIN + RACKET_WIDTH;
pub const MAX_X: i32 = BOARD_WIDTH - HORIZONTAL_MARGIN - RACKET_WIDTH;
pub const MIN_Y: i32 = LINE_THICKNESS;
pub const MAX_Y: i32 = BOARD_HEIGHT - LINE_THICKNESS - BALL_SIZE;

/// the highest a racket's centre can go.
pub const MIN_RACKET_POS: i32 = MIN_Y + RACKET_HEIGHT / 2;
/// the lowest a racket's centre can go.
pub const MAX_RACKET_POS: i32 = MAX_Y + BALL_SIZE - RACKET_HEIGHT / 2;

pub const NORMAL_TICK_PERIOD: Duration = Duration::from_millis(40);
pub const BLINK_TICK_PERIOD: Duration = Duration::from_millis(20);

const _CHECKS: () = {
    assert!(
        (MAX_X - MIN_X) % BALL_STEP == 0,
        "the ball must land exactly on both horizontal edges when stepping between them"
    );
    assert!(
        MIN_RACKET_POS < MAX_RACKET_POS,
        "the board is too short for a racket to move"
    );
    assert!(MIN_Y < MAX_Y, "the board is too short for the ball");
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// which way a racket is travelling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalDirection {
    Right,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// `x` and `y` are the top left corner of the ball's bounding square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub horizontal: HorizontalDirection,
    pub vertical: VerticalDirection,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            x: MIN_X,
            y: BOARD_HEIGHT / 2,
            horizontal: HorizontalDirection::Right,
            vertical: VerticalDirection::Down,
        }
    }
}

/// `pos` is the vertical centre of the racket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Racket {
    pub pos: i32,
    pub direction: Direction,
}

impl Racket {
    pub fn top(&self) -> i32 {
        self.pos - RACKET_HEIGHT / 2
    }

    pub fn bottom(&self) -> i32 {
        self.pos + RACKET_HEIGHT / 2
    }
}

impl Default for Racket {
    fn default() -> Self {
        Self {
            pos: BOARD_HEIGHT / 2,
            direction: Direction::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

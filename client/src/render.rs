use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use simulation::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, LINE_THICKNESS, MAX_X, MIN_X},
    Ball, FlashColour, Racket, Score, Snapshot,
};

/// how many board units one terminal cell covers.
const CELL_WIDTH: i32 = 10;
const CELL_HEIGHT: i32 = 20;

pub(crate) const COLUMNS: u16 = (BOARD_WIDTH / CELL_WIDTH) as u16;
/// rows between the two walls.
pub(crate) const ROWS: u16 = ((BOARD_HEIGHT - 2 * LINE_THICKNESS) / CELL_HEIGHT) as u16;

const SCORE_ROW: u16 = 0;
const TOP_WALL_ROW: u16 = 1;
const FIRST_PLAY_ROW: u16 = TOP_WALL_ROW + 1;
const BOTTOM_WALL_ROW: u16 = FIRST_PLAY_ROW + ROWS;
const HELP_ROW: u16 = BOTTOM_WALL_ROW + 1;

/// the rackets sit in the columns just outside the ball's reach.
const LEFT_RACKET_COLUMN: u16 = (MIN_X / CELL_WIDTH - 1) as u16;
const RIGHT_RACKET_COLUMN: u16 = (MAX_X / CELL_WIDTH + 1) as u16;

const HELP: &str = "W/S left racket   O/K right racket   Esc quit";

const _CHECKS: () = {
    assert!(
        RIGHT_RACKET_COLUMN < COLUMNS,
        "the right racket doesn't fit on the screen"
    );
    assert!(LEFT_RACKET_COLUMN < (MIN_X / CELL_WIDTH) as u16);
};

/// paints snapshots of the board onto a terminal. between snapshots only the sprites are
/// erased and redrawn unless a full repaint is asked for.
#[derive(Default)]
pub(crate) struct Renderer {
    previous: Option<Snapshot>,
}

impl Renderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn draw<W: Write>(
        &mut self,
        w: &mut W,
        snapshot: &Snapshot,
        repaint: bool,
    ) -> io::Result<()> {
        match self.previous.filter(|_| !repaint) {
            Some(previous) => {
                erase_sprites(w, &previous)?;
                if previous.score != snapshot.score {
                    draw_score(w, snapshot.score)?;
                }
                if previous.flash != snapshot.flash {
                    draw_walls(w, snapshot.flash)?;
                }
            }
            None => {
                queue!(w, Clear(ClearType::All))?;
                draw_score(w, snapshot.score)?;
                draw_walls(w, snapshot.flash)?;
                queue!(w, MoveTo(0, HELP_ROW), Print(HELP))?;
            }
        }
        draw_sprites(w, snapshot)?;
        queue!(w, MoveTo(0, HELP_ROW + 1))?;
        w.flush()?;
        self.previous = Some(*snapshot);
        Ok(())
    }
}

/// maps a vertical board position between the walls onto a play row.
fn play_row(y: i32) -> u16 {
    let row = (y - LINE_THICKNESS).max(0) / CELL_HEIGHT;
    row.min(ROWS as i32 - 1) as u16 + FIRST_PLAY_ROW
}

fn ball_cell(ball: &Ball) -> (u16, u16) {
    ((ball.x / CELL_WIDTH) as u16, play_row(ball.y))
}

fn racket_rows(racket: &Racket) -> std::ops::RangeInclusive<u16> {
    play_row(racket.top())..=play_row(racket.bottom() - 1)
}

fn draw_sprites<W: Write>(w: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    draw_racket(w, LEFT_RACKET_COLUMN, &snapshot.left_racket, '|')?;
    draw_racket(w, RIGHT_RACKET_COLUMN, &snapshot.right_racket, '|')?;
    let (column, row) = ball_cell(&snapshot.ball);
    queue!(w, MoveTo(column, row), Print('o'))
}

fn erase_sprites<W: Write>(w: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    draw_racket(w, LEFT_RACKET_COLUMN, &snapshot.left_racket, ' ')?;
    draw_racket(w, RIGHT_RACKET_COLUMN, &snapshot.right_racket, ' ')?;
    let (column, row) = ball_cell(&snapshot.ball);
    queue!(w, MoveTo(column, row), Print(' '))
}

fn draw_racket<W: Write>(w: &mut W, column: u16, racket: &Racket, c: char) -> io::Result<()> {
    for row in racket_rows(racket) {
        queue!(w, MoveTo(column, row), Print(c))?;
    }
    Ok(())
}

fn draw_walls<W: Write>(w: &mut W, flash: Option<FlashColour>) -> io::Result<()> {
    let colour = match flash {
        None => Color::Green,
        Some(FlashColour::Highlight) => Color::White,
        Some(FlashColour::Normal) => Color::DarkGreen,
    };
    let wall = "=".repeat(COLUMNS as usize);
    queue!(
        w,
        SetForegroundColor(colour),
        MoveTo(0, TOP_WALL_ROW),
        Print(&wall),
        MoveTo(0, BOTTOM_WALL_ROW),
        Print(&wall),
        SetForegroundColor(Color::Reset),
    )
}

fn draw_score<W: Write>(w: &mut W, score: Score) -> io::Result<()> {
    let text = format!("{}  :  {}", score.left, score.right);
    queue!(
        w,
        MoveTo(0, SCORE_ROW),
        Clear(ClearType::CurrentLine),
        MoveTo((COLUMNS - text.len() as u16) / 2, SCORE_ROW),
        Print(text),
    )
}

#[cfg(test)]
mod tests {
    use simulation::{board::MAX_Y, board::MIN_Y, Direction, PongSimulation, Side};

    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn draw_to_string(renderer: &mut Renderer, snapshot: &Snapshot, repaint: bool) -> String {
        let mut out = Vec::new();
        renderer.draw(&mut out, snapshot, repaint).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn layout() {
        assert_eq!(COLUMNS, 64);
        assert_eq!(ROWS, 23);
        assert_eq!(LEFT_RACKET_COLUMN, 1);
        assert_eq!(RIGHT_RACKET_COLUMN, 62);
    }

    #[test]
    fn ball_stays_between_walls_and_rackets() {
        for y in [MIN_Y, MAX_Y] {
            for x in [MIN_X, MAX_X] {
                let ball = Ball {
                    y,
                    x,
                    ..Ball::default()
                };
                let (column, row) = ball_cell(&ball);
                assert!(column > LEFT_RACKET_COLUMN && column < RIGHT_RACKET_COLUMN);
                assert!(row >= FIRST_PLAY_ROW && row < BOTTOM_WALL_ROW);
            }
        }
    }

    #[test]
    fn racket_covers_five_rows() {
        for pos in [60, 240, 420] {
            let racket = Racket {
                pos,
                direction: Direction::None,
            };
            let rows = racket_rows(&racket);
            assert_eq!(rows.clone().count(), 5, "racket at {pos}");
            assert!(*rows.start() >= FIRST_PLAY_ROW);
            assert!(*rows.end() < BOTTOM_WALL_ROW);
        }
    }

    #[test]
    fn clears_screen_only_when_repainting() {
        let mut sim = PongSimulation::new();
        let mut renderer = Renderer::new();
        let first = draw_to_string(&mut renderer, &sim.snapshot(), false);
        assert!(first.contains(CLEAR_ALL));
        assert!(first.contains(HELP));
        sim.set_racket_direction(Side::Left, Direction::Up);
        sim.advance();
        let second = draw_to_string(&mut renderer, &sim.snapshot(), false);
        assert!(!second.contains(CLEAR_ALL));
        assert!(second.contains('o'));
        let third = draw_to_string(&mut renderer, &sim.snapshot(), true);
        assert!(third.contains(CLEAR_ALL));
    }

    #[test]
    fn score_redrawn_when_changed() {
        let mut renderer = Renderer::new();
        let mut snapshot = PongSimulation::new().snapshot();
        draw_to_string(&mut renderer, &snapshot, false);
        let unchanged = draw_to_string(&mut renderer, &snapshot, false);
        assert!(!unchanged.contains("0  :  0"));
        snapshot.score.right = 1;
        let changed = draw_to_string(&mut renderer, &snapshot, false);
        assert!(changed.contains("0  :  1"));
    }
}

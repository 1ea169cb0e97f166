use crossterm::style::Color;

use crate::Coords;
use crate::state::Snapshot;

pub const BACKGROUND: Color = Color::Rgb { r: 0x00, g: 0x00, b: 0x00 };
pub const FOOD: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x00 };
pub const SNAKE_HEAD: Color = Color::Rgb { r: 0x00, g: 0xff, b: 0x00 };
pub const SNAKE_BODY: Color = Color::Rgb { r: 0x00, g: 0x80, b: 0x00 };
pub const TEXT: Color = Color::Rgb { r: 0xff, g: 0xff, b: 0xff };
pub const GAME_OVER: Color = FOOD;

/// A drawing surface with a pixel layer (one pixel per grid cell) and a
/// text layer laid over it.
pub trait Canvas {
    /// Columns and rows of the text layer.
    fn text_grid(&self) -> (i32, i32);

    /// Fills every pixel with `color` and removes all text.
    fn clear(&mut self, color: Color);

    /// Out-of-range positions are ignored.
    fn set_pixel(&mut self, pos: Coords, color: Color);

    /// Characters falling outside the text grid are dropped.
    fn draw_text(&mut self, row: i32, col: i32, text: &str, color: Color);
}

/// Composes one frame of `snapshot` onto `canvas`.
pub fn draw<C: Canvas>(snapshot: &Snapshot, canvas: &mut C) {
    let on_grid = |(x, y): Coords| x >= 0 && y >= 0 && x < snapshot.width && y < snapshot.height;

    canvas.clear(BACKGROUND);
    canvas.set_pixel(snapshot.food, FOOD);

    // Tail first so the head stays visible when it overlaps the body
    for &(pos, is_head) in snapshot.snake.iter().rev() {
        if on_grid(pos) {
            canvas.set_pixel(pos, if is_head { SNAKE_HEAD } else { SNAKE_BODY });
        }
    }

    let (cols, rows) = canvas.text_grid();
    canvas.draw_text(rows - 1, 1, &format!("Score: {}", snapshot.score), TEXT);

    if let Some([title, prompt]) = snapshot.overlay {
        let middle = rows / 2;
        canvas.draw_text(middle - 1, centered(cols, title), title, GAME_OVER);
        canvas.draw_text(middle + 1, centered(cols, prompt), prompt, TEXT);
    }
}

fn centered(cols: i32, text: &str) -> i32 {
    ((cols - text.chars().count() as i32) / 2).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::state::{GameState, Input};

    #[derive(Default)]
    struct RecordingCanvas {
        pixels: HashMap<Coords, Color>,
        texts: Vec<(i32, i32, String, Color)>,
        cleared_with: Option<Color>,
    }

    impl Canvas for RecordingCanvas {
        fn text_grid(&self) -> (i32, i32) {
            (75, 25)
        }

        fn clear(&mut self, color: Color) {
            self.pixels.clear();
            self.texts.clear();
            self.cleared_with = Some(color);
        }

        fn set_pixel(&mut self, pos: Coords, color: Color) {
            self.pixels.insert(pos, color);
        }

        fn draw_text(&mut self, row: i32, col: i32, text: &str, color: Color) {
            self.texts.push((row, col, text.to_string(), color));
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            width: 75,
            height: 50,
            food: (10, 10),
            snake: vec![((3, 0), true), ((2, 0), false), ((1, 0), false)],
            score: 4,
            running: true,
            overlay: None,
        }
    }

    #[test]
    fn colours_food_head_and_body() {
        let mut canvas = RecordingCanvas::default();
        draw(&snapshot(), &mut canvas);

        assert_eq!(canvas.cleared_with, Some(BACKGROUND));
        assert_eq!(canvas.pixels[&(10, 10)], FOOD);
        assert_eq!(canvas.pixels[&(3, 0)], SNAKE_HEAD);
        assert_eq!(canvas.pixels[&(2, 0)], SNAKE_BODY);
        assert_eq!(canvas.pixels[&(1, 0)], SNAKE_BODY);
        assert_eq!(canvas.pixels.len(), 4);
    }

    #[test]
    fn score_goes_on_the_bottom_row() {
        let mut canvas = RecordingCanvas::default();
        draw(&snapshot(), &mut canvas);

        assert_eq!(canvas.texts, vec![(24, 1, "Score: 4".to_string(), TEXT)]);
    }

    #[test]
    fn crashed_head_off_the_grid_is_skipped() {
        let mut snap = snapshot();
        snap.snake[0] = ((75, 0), true);
        snap.running = false;

        let mut canvas = RecordingCanvas::default();
        draw(&snap, &mut canvas);

        assert!(!canvas.pixels.contains_key(&(75, 0)));
        assert!(!canvas.pixels.values().any(|&c| c == SNAKE_HEAD));
    }

    #[test]
    fn game_over_overlay_is_centred() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(&mut rng);
        state.update(Input { up: true, ..Input::default() }, &mut rng);
        assert!(!state.is_running());

        let mut canvas = RecordingCanvas::default();
        draw(&state.render(), &mut canvas);

        assert_eq!(canvas.texts.len(), 3);
        assert_eq!(canvas.texts[1], (11, 33, "GAME OVER".to_string(), GAME_OVER));
        assert_eq!(canvas.texts[2], (13, 26, "Press SPACE to Restart".to_string(), TEXT));
    }

    #[test]
    fn head_wins_over_body_on_the_same_cell() {
        let mut snap = snapshot();
        snap.snake.push(((3, 0), false));

        let mut canvas = RecordingCanvas::default();
        draw(&snap, &mut canvas);

        assert_eq!(canvas.pixels[&(3, 0)], SNAKE_HEAD);
    }
}

use std::time::{Duration, Instant};

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::game::{Game, GameState};
use crate::grid::{Grid, GridPosition};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;
const HUD_HEIGHT: u16 = 2;
const HELP_HEIGHT: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// Typeface stand-ins for the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Main,
    Hint,
}

impl TextStyle {
    fn style(self) -> Style {
        match self {
            TextStyle::Title => Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            TextStyle::Main => Style::new().fg(Color::White),
            TextStyle::Hint => Style::new().fg(Color::DarkGray),
        }
    }
}

/// One-row rectangle for text of `text_width` columns anchored inside `area`.
/// Padding moves the text away from the anchored edge; for centered
/// vertical alignment it is a signed offset from the middle row.
pub fn aligned_rect(
    area: Rect,
    text_width: u16,
    vertical: VerticalAlignment,
    horizontal: HorizontalAlignment,
    padding: i16,
) -> Rect {
    let width = text_width.min(area.width);
    let free_x = (area.width - width) as i32;
    let free_y = area.height.saturating_sub(1) as i32;
    let padding = padding as i32;

    let x = match horizontal {
        HorizontalAlignment::Left => padding,
        HorizontalAlignment::Center => free_x / 2,
        HorizontalAlignment::Right => free_x - padding,
    }
    .clamp(0, free_x);
    let y = match vertical {
        VerticalAlignment::Top => padding,
        VerticalAlignment::Center => free_y / 2 + padding,
        VerticalAlignment::Bottom => free_y - padding,
    }
    .clamp(0, free_y);

    Rect::new(area.x + x as u16, area.y + y as u16, width, area.height.min(1))
}

fn draw_aligned_text(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    text_style: TextStyle,
    vertical: VerticalAlignment,
    horizontal: HorizontalAlignment,
    padding: i16,
) {
    let line = Line::from(text);
    let rect = aligned_rect(area, line.width() as u16, vertical, horizontal, padding);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(line).style(text_style.style()), rect);
}

/// Elapsed time as `MM:SS:CC`, with hundredths of a second last.
pub fn format_game_time(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 60,
        seconds % 60,
        elapsed.subsec_millis() / 10
    )
}

struct PlayField<'a, R> {
    game: &'a Game<R>,
}

impl<R> PlayField<'_, R> {
    fn paint(
        grid: &Grid,
        area: Rect,
        buf: &mut Buffer,
        pos: GridPosition,
        symbol: &str,
        style: Style,
    ) {
        let (column, row) = grid.cell_of(pos);
        let (Ok(column), Ok(row)) = (u16::try_from(column), u16::try_from(row)) else {
            return;
        };
        let x = area.x.saturating_add(column.saturating_mul(CELL_WIDTH));
        let y = area.y.saturating_add(row);
        if x >= area.right() || y >= area.bottom() {
            return;
        }
        for dx in 0..CELL_WIDTH {
            if x + dx < area.right() {
                buf[(x + dx, y)].set_symbol(symbol).set_style(style);
            }
        }
    }
}

impl<R> Widget for PlayField<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.game.grid();
        let background = Style::new().fg(Color::DarkGray);

        for pos in grid.positions() {
            Self::paint(grid, area, buf, pos, "·", background);
        }

        Self::paint(grid, area, buf, self.game.food(), " ", Style::new().bg(Color::Red));

        for wall in self.game.walls() {
            Self::paint(grid, area, buf, *wall, "█", Style::new().fg(Color::Gray));
        }

        let snake = self.game.snake();
        for segment in snake.segments().skip(1) {
            Self::paint(grid, area, buf, *segment, " ", Style::new().bg(Color::Green));
        }
        Self::paint(grid, area, buf, snake.head(), " ", Style::new().bg(Color::LightGreen));
    }
}

fn draw_too_small(frame: &mut Frame, area: Rect, width: u32, height: u32) {
    frame.render_widget(
        Paragraph::new(format!("Terminal too small: need {}x{}", width, height))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draws the whole screen for the current state.
pub fn render<R>(frame: &mut Frame, game: &Game<R>, now: Instant) {
    let area = frame.area();
    let grid = game.grid();
    // Sized in u32 so oversized grids end up at the notice below
    let needed_width = grid
        .columns()
        .saturating_mul(CELL_WIDTH.into())
        .saturating_add(2);
    let needed_height = grid
        .rows()
        .saturating_add((HUD_HEIGHT + 2 + HELP_HEIGHT).into());

    if needed_width > u32::from(area.width) || needed_height > u32::from(area.height) {
        draw_too_small(frame, area, needed_width, needed_height);
        return;
    }
    // Both fit in the terminal, hence in u16
    let field_width = needed_width as u16;
    let field_height = needed_height as u16 - HUD_HEIGHT - HELP_HEIGHT;

    let [screen] = Layout::horizontal([Constraint::Length(field_width)])
        .flex(Flex::Center)
        .areas(area);
    let [hud, field, help] = Layout::vertical([
        Constraint::Length(HUD_HEIGHT),
        Constraint::Length(field_height),
        Constraint::Length(HELP_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(screen);

    let block = Block::bordered().title(" Evil Snake ");
    let inner = block.inner(field);
    frame.render_widget(block, field);
    frame.render_widget(PlayField { game }, inner);

    let time = format!("Time: {}", format_game_time(game.elapsed(now)));
    let score = format!("Score: {}", game.score());

    use HorizontalAlignment as H;
    use VerticalAlignment as V;
    match game.state() {
        GameState::Menu => {
            draw_aligned_text(
                frame,
                inner,
                "EvilSnake",
                TextStyle::Title,
                V::Center,
                H::Center,
                -2,
            );
            draw_aligned_text(
                frame,
                inner,
                "[ARROWS / WASD] to start",
                TextStyle::Main,
                V::Center,
                H::Center,
                0,
            );
            draw_aligned_text(
                frame,
                help,
                "[Esc] Quit  [J/K] Pause/Resume",
                TextStyle::Hint,
                V::Top,
                H::Center,
                0,
            );
            draw_aligned_text(
                frame,
                help,
                "[Space] Menu  [L] Screenshot",
                TextStyle::Hint,
                V::Top,
                H::Center,
                1,
            );
            draw_aligned_text(
                frame,
                help,
                "[O] Screenshot folder",
                TextStyle::Hint,
                V::Bottom,
                H::Left,
                0,
            );
            draw_aligned_text(
                frame,
                help,
                concat!("v", env!("CARGO_PKG_VERSION")),
                TextStyle::Hint,
                V::Bottom,
                H::Right,
                0,
            );
        }
        GameState::Playing => {
            draw_aligned_text(frame, hud, &time, TextStyle::Main, V::Top, H::Left, 0);
            draw_aligned_text(
                frame,
                hud,
                &format!("Mode: {}", game.mode()),
                TextStyle::Title,
                V::Top,
                H::Center,
                1,
            );
            draw_aligned_text(frame, hud, &score, TextStyle::Main, V::Top, H::Right, 0);
            draw_aligned_text(
                frame,
                help,
                "[Space] Main menu   [J] Pause",
                TextStyle::Hint,
                V::Top,
                H::Center,
                0,
            );
        }
        GameState::Paused => {
            draw_aligned_text(frame, inner, "Pause", TextStyle::Title, V::Center, H::Center, -2);
            draw_aligned_text(frame, inner, &time, TextStyle::Main, V::Center, H::Center, 0);
            draw_aligned_text(frame, inner, &score, TextStyle::Main, V::Center, H::Center, 1);
            draw_aligned_text(
                frame,
                help,
                "[Space] Main menu   [K] Continue",
                TextStyle::Hint,
                V::Top,
                H::Center,
                0,
            );
        }
        GameState::GameOver | GameState::Finished => {
            let title = if game.state() == GameState::Finished {
                "YOU WON, CONGRATULATIONS!"
            } else {
                "GAME OVER"
            };
            draw_aligned_text(frame, inner, title, TextStyle::Title, V::Center, H::Center, -2);
            draw_aligned_text(frame, inner, &time, TextStyle::Main, V::Center, H::Center, 0);
            draw_aligned_text(frame, inner, &score, TextStyle::Main, V::Center, H::Center, 1);
            draw_aligned_text(
                frame,
                inner,
                "[Space] Main menu",
                TextStyle::Hint,
                V::Center,
                H::Center,
                3,
            );
        }
    }
}

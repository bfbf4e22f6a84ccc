//! Race screen rendering.
//!
//! The field is drawn into a cell buffer scaled from field units to terminal
//! cells, then stamped row-by-row as Paragraph widgets. Building the buffer is
//! pure, so it can be checked without a terminal.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use crate::racer::RaceView;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Preferred play field size in cells (10 x 20 field units per cell).
pub const FIELD_COLS: u16 = 30;
pub const FIELD_ROWS: u16 = 20;

const CAR_CHAR: char = '█';
const OBSTACLE_CHAR: char = '▓';
const ROAD_CHAR: char = '·';

const CAR_COLOR: Color = Color::LightRed;
const OBSTACLE_COLOR: Color = Color::Yellow;

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Render the whole race screen from a view snapshot.
pub fn render_race_scene(frame: &mut Frame, area: Rect, view: &RaceView) {
    let layout = create_game_layout(frame, area, " Car Racing Game ", CAR_COLOR, 10, 24);

    render_play_field(frame, layout.content, view);

    if !view.started {
        render_start_prompt(frame, layout.content);
    } else if view.game_over {
        render_game_over_banner(
            frame,
            layout.content,
            "Game Over!",
            &format!("Score: {}", view.score),
            "[Enter] Restart  [Q] Quit",
        );
    }

    render_status_bar_content(frame, layout.status_bar, view);
    render_info_panel(frame, layout.info_panel, view);
}

/// Column span `[start, start + width)` for a horizontal field extent.
fn scale_x(x: f64, width: f64, field_width: f64, cols: u16) -> (i32, i32) {
    let per_col = field_width / cols as f64;
    let start = (x / per_col).floor() as i32;
    let span = (width / per_col).ceil().max(1.0) as i32;
    (start, span)
}

/// Row span `[start, start + height)` for a vertical field extent.
fn scale_y(y: f64, height: f64, field_height: f64, rows: u16) -> (i32, i32) {
    let per_row = field_height / rows as f64;
    let start = (y / per_row).floor() as i32;
    let span = (height / per_row).ceil().max(1.0) as i32;
    (start, span)
}

/// Fill a rectangle of cells, clipped to the buffer.
fn stamp(buffer: &mut [Vec<Cell>], col: i32, row: i32, width: i32, height: i32, cell: Cell) {
    let row_end = row.saturating_add(height).min(buffer.len() as i32);
    for r in row.max(0)..row_end {
        let line = &mut buffer[r as usize];
        let col_end = col.saturating_add(width).min(line.len() as i32);
        for c in col.max(0)..col_end {
            line[c as usize] = cell;
        }
    }
}

/// Build the play field: road, obstacles, car, and the score readout.
pub fn build_field_buffer(view: &RaceView, cols: u16, rows: u16) -> Vec<Vec<Cell>> {
    let mut buffer = vec![vec![Cell::default(); cols as usize]; rows as usize];
    if cols == 0 || rows == 0 {
        return buffer;
    }

    let field_width = view.field_width as f64;

    // ── Road markings: dotted center line ─────────────────────────────
    let center = (cols / 2) as usize;
    for (r, line) in buffer.iter_mut().enumerate() {
        if r % 2 == 0 {
            line[center] = Cell {
                ch: ROAD_CHAR,
                fg: Color::DarkGray,
                bg: Color::Reset,
            };
        }
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    for obstacle in &view.obstacles {
        let (col, width) = scale_x(obstacle.x, view.obstacle_width, field_width, cols);
        let (row, height) = scale_y(obstacle.y, view.obstacle_height, view.field_height, rows);
        stamp(
            &mut buffer,
            col,
            row,
            width,
            height,
            Cell {
                ch: OBSTACLE_CHAR,
                fg: OBSTACLE_COLOR,
                bg: Color::Reset,
            },
        );
    }

    // ── Car (drawn last so it stays visible on a crash) ───────────────
    let (car_col, car_width) =
        scale_x(view.player_x as f64, view.car_width as f64, field_width, cols);
    let (car_row, _) = scale_y(view.car_top, 1.0, view.field_height, rows);
    let car_row = car_row.min(rows as i32 - 1);
    stamp(
        &mut buffer,
        car_col,
        car_row,
        car_width,
        rows as i32 - car_row,
        Cell {
            ch: CAR_CHAR,
            fg: if view.game_over { Color::Red } else { CAR_COLOR },
            bg: Color::Reset,
        },
    );

    // ── Score (top-right) ─────────────────────────────────────────────
    let score_text = format!("Score: {}", view.score);
    let start = (cols as usize).saturating_sub(score_text.chars().count() + 1);
    for (i, ch) in score_text.chars().enumerate() {
        let col = start + i;
        if col < cols as usize {
            buffer[0][col] = Cell {
                ch,
                fg: Color::White,
                bg: Color::Reset,
            };
        }
    }

    buffer
}

fn render_play_field(frame: &mut Frame, area: Rect, view: &RaceView) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let cols = area.width.min(FIELD_COLS);
    let rows = area.height.min(FIELD_ROWS);
    let buffer = build_field_buffer(view, cols, rows);

    let x_offset = area.x + (area.width - cols) / 2;
    let y_offset = area.y;

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(x_offset, y_offset + row_idx as u16, cols, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }

    // Lane edges
    let edge_style = Style::default().fg(Color::Gray);
    for row in 0..rows {
        if x_offset > area.x {
            frame.render_widget(
                Paragraph::new("│").style(edge_style),
                Rect::new(x_offset - 1, y_offset + row, 1, 1),
            );
        }
        if x_offset + cols < area.x + area.width {
            frame.render_widget(
                Paragraph::new("│").style(edge_style),
                Rect::new(x_offset + cols, y_offset + row, 1, 1),
            );
        }
    }
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let y = area.y + area.height / 2 - 1;
    let lines = vec![
        Line::from(Span::styled(
            "Press [Enter] to Start",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Use ← and → to move the car",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 2),
    );
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, view: &RaceView) {
    if !view.started {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightYellow,
            &[("[Enter]", "Start"), ("[Q]", "Quit")],
        );
        return;
    }

    if view.game_over {
        render_status_bar(
            frame,
            area,
            "Crashed!",
            Color::Red,
            &[("[Enter]", "Restart"), ("[Q]", "Quit")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        "Drive!",
        Color::LightGreen,
        &[("[←/→]", "Steer"), ("[Q]", "Quit")],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &RaceView) {
    let inner = render_info_panel_frame(frame, area);

    let state = if !view.started {
        ("Waiting", Color::LightYellow)
    } else if view.game_over {
        ("Game Over", Color::Red)
    } else {
        ("Racing", Color::LightGreen)
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("State: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state.0, Style::default().fg(state.1)),
        ]),
        Line::from(vec![
            Span::styled("Obstacles: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.obstacles.len().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!(" {} ", CAR_CHAR), Style::default().fg(CAR_COLOR)),
            Span::styled("Your car", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {} ", OBSTACLE_CHAR),
                Style::default().fg(OBSTACLE_COLOR),
            ),
            Span::styled("Obstacle", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Use ← and → arrow",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "keys to move the car",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RaceConfig;
    use crate::racer::{render, RaceSession, SessionPhase};

    fn view_with_obstacle(x: f64, y: f64) -> RaceView {
        let config = RaceConfig::default();
        let mut session = RaceSession::new(&config);
        session.phase = SessionPhase::Running;
        session.spawn_obstacle(x, &config);
        session.obstacles[0].y = y;
        render(&session, &config)
    }

    fn row_text(buffer: &[Vec<Cell>], row: usize) -> String {
        buffer[row].iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_buffer_dimensions() {
        let view = view_with_obstacle(0.0, 100.0);
        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);
        assert_eq!(buffer.len(), FIELD_ROWS as usize);
        assert!(buffer.iter().all(|r| r.len() == FIELD_COLS as usize));
    }

    #[test]
    fn test_car_drawn_in_bottom_band() {
        let view = view_with_obstacle(0.0, 100.0);
        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);

        // start_x 130 of 300 over 30 cols -> col 13, 4 cols wide; top 350 -> row 17
        for row in 17..20 {
            for col in 13..17 {
                assert_eq!(buffer[row][col].ch, CAR_CHAR);
            }
            assert_ne!(buffer[row][12].ch, CAR_CHAR);
            assert_ne!(buffer[row][17].ch, CAR_CHAR);
        }
        assert_ne!(buffer[16][13].ch, CAR_CHAR);
    }

    #[test]
    fn test_obstacle_drawn_at_scaled_position() {
        let view = view_with_obstacle(0.0, 100.0);
        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);

        let leading: String = row_text(&buffer, 5).chars().take(4).collect();
        assert_eq!(leading, "▓▓▓▓");
        assert_eq!(buffer[5][4].ch, ' ');
        assert_ne!(buffer[4][0].ch, OBSTACLE_CHAR);
    }

    #[test]
    fn test_obstacle_above_field_not_drawn() {
        let view = view_with_obstacle(0.0, -20.0);
        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);
        assert!(buffer
            .iter()
            .all(|row| row.iter().all(|c| c.ch != OBSTACLE_CHAR)));
    }

    #[test]
    fn test_score_shown_top_right() {
        let mut view = view_with_obstacle(0.0, 100.0);
        view.score = 123;
        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);
        assert!(row_text(&buffer, 0).trim_end().ends_with("Score: 123"));
    }

    #[test]
    fn test_oversized_obstacle_clipped_to_field() {
        let config = RaceConfig {
            field_height: 1.0,
            car_top: 0.5,
            obstacle_height: 1e12,
            obstacle_width: 1e12,
            ..RaceConfig::default()
        };
        let mut session = RaceSession::new(&config);
        session.phase = SessionPhase::Running;
        session.spawn_obstacle(0.0, &config);
        session.obstacles[0].y = 0.5;
        let view = render(&session, &config);

        let buffer = build_field_buffer(&view, FIELD_COLS, FIELD_ROWS);
        assert_eq!(buffer.len(), FIELD_ROWS as usize);
        assert_eq!(buffer[12][0].ch, OBSTACLE_CHAR);
        assert_eq!(buffer[12][FIELD_COLS as usize - 1].ch, OBSTACLE_CHAR);
    }

    #[test]
    fn test_small_area_scales_down() {
        let view = view_with_obstacle(150.0, 200.0);
        let buffer = build_field_buffer(&view, 15, 10);
        // 150 of 300 over 15 cols -> col 7; 200 of 400 over 10 rows -> row 5
        assert_eq!(buffer[5][7].ch, OBSTACLE_CHAR);
    }
}

use openmind::game::Phase;
use openmind::leaderboard::EMPTY_PLACEHOLDER;
use openmind::util::masked_hint;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn notice_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::ITALIC)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.game.phase {
            Phase::Landing => render_landing(self, area, buf),
            Phase::Playing => render_playing(self, area, buf),
            Phase::LevelComplete { word, points } => {
                render_level_complete(word, *points, area, buf)
            }
            Phase::GameComplete => render_game_complete(self, area, buf),
            Phase::Leaderboard => render_leaderboard(self, area, buf),
        }
    }
}

fn notice_line(app: &App) -> Line<'_> {
    match &app.notice {
        Some(text) => Line::from(Span::styled(text.as_str(), notice_style())),
        None => Line::from(""),
    }
}

fn render_landing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // title
            Constraint::Length(1), // prompt
            Constraint::Length(1), // input
            Constraint::Length(1), // notice
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("OPENMIND", bold().fg(Color::Magenta)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new("Find the word hidden in each image before the clock runs out.")
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let input_line = Line::from(vec![
        Span::styled("username: ", dim_bold()),
        Span::styled(app.input.as_str(), bold()),
        Span::styled("_", dim_bold()),
    ]);
    Paragraph::new(input_line)
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(notice_line(app))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "(enter)start (esc)quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let level = game.current_level();
    let hint = masked_hint(level.word);

    let max_line_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize;
    let image_lines = if level.image.width() > max_line_width {
        2
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),           // header
            Constraint::Length(1),           // timer
            Constraint::Min(1),              // spacer
            Constraint::Length(image_lines), // image reference
            Constraint::Length(1),           // masked hint
            Constraint::Length(1),           // input
            Constraint::Length(1),           // notice
            Constraint::Min(1),              // spacer
            Constraint::Length(1),           // legend
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(format!("Player: {}", game.session.username), bold()),
        Span::raw("   "),
        Span::styled(format!("Score: {}", game.session.score), bold()),
        Span::raw("   "),
        Span::styled(
            format!("Level {}/{}", game.level_number(), game.levels.len()),
            bold(),
        ),
    ]);
    Paragraph::new(header)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let timer_style = if game.low_time() {
        bold().fg(Color::Red)
    } else {
        dim_bold()
    };
    Paragraph::new(Span::styled(
        format!("{}s", game.time_remaining()),
        timer_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("image: {}", level.image),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(hint, bold().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let input_line = Line::from(vec![
        Span::styled("> ", dim_bold()),
        Span::styled(app.input.as_str(), bold()),
        Span::styled("_", dim_bold()),
    ]);
    Paragraph::new(input_line)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    Paragraph::new(notice_line(app))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    Paragraph::new(Span::styled(
        "(enter)submit (esc)menu",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);
}

fn render_level_complete(word: &str, points: u32, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // headline
            Constraint::Length(1), // revealed word
            Constraint::Length(1), // points
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("You found it!", bold().fg(Color::Green)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(word.to_string(), bold().fg(Color::Green)))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(format!("+{points} points"))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(enter/n)next level (esc)menu",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);
}

fn render_game_complete(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // headline
            Constraint::Length(1), // total
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("Game complete, {}!", game.session.username),
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("Total: {} pts", game.session.score),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(p)lay again (l)eaderboard (esc)menu",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

fn render_leaderboard(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // table
            Constraint::Length(3), // instructions
        ])
        .split(area);

    Paragraph::new("Leaderboard")
        .block(Block::default().borders(Borders::ALL))
        .style(bold().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let entries = app
        .game
        .leaderboard
        .as_ref()
        .map(|board| board.load())
        .unwrap_or_default();

    if entries.is_empty() {
        Paragraph::new(EMPTY_PLACEHOLDER)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    } else {
        let header = Row::new(vec![
            Cell::from("Rank"),
            Cell::from("Player"),
            Cell::from("Score"),
        ])
        .style(bold().fg(Color::Yellow));

        let rows: Vec<Row> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                Row::new(vec![
                    Cell::from(format!("{}", idx + 1)),
                    Cell::from(entry.username.clone()),
                    Cell::from(format!("{} pts", entry.score)),
                ])
            })
            .collect();

        Table::new(
            rows,
            &[
                Constraint::Length(6),
                Constraint::Length(24),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Top 10"))
        .render(chunks[1], buf);
    }

    Paragraph::new("(b/esc)back (m)enu")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
}

//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};

use crate::domain::Step;
use crate::session::Phase;

use super::app::{App, SUGGESTIONS};

/// Spinner frames for the loading screen
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);

    match app.session().phase() {
        Phase::Idle => render_input(app, frame, chunks[1]),
        Phase::Loading => render_loading(app, frame, chunks[1]),
        Phase::Success => render_checklist(app, frame, chunks[1]),
        Phase::Error => render_error(app, frame, chunks[1]),
    }

    render_footer(app, frame, chunks[2]);

    if app.show_help {
        render_help_overlay(frame, chunks[1]);
    }
}

/// Render the header banner
fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "✨ Unstick",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Overwhelmed? Let's break it down.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the goal input form with suggestion chips
fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Input box
            Constraint::Length(5), // Suggestions
            Constraint::Min(0),
        ])
        .split(area);

    let input_text = if app.input.is_empty() {
        Line::from(Span::styled(
            "e.g. I need to clean my room but it's a disaster...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.input.as_str()),
            Span::styled("█", Style::default().fg(Color::Magenta)),
        ])
    };

    let input = Paragraph::new(input_text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" What's the scary task? "),
    );
    frame.render_widget(input, chunks[0]);

    if app.input.is_empty() {
        let suggestions: Vec<Line> = SUGGESTIONS
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Yellow)),
                    Span::styled(*s, Style::default().fg(Color::Gray)),
                ])
            })
            .collect();

        let chips = Paragraph::new(suggestions).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Stuck for words? Press a number "),
        );
        frame.render_widget(chips, chunks[1]);
    }
}

/// Render the loading screen
fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let spinner = SPINNER[(app.tick_count as usize) % SPINNER.len()];

    let loading = Paragraph::new(vec![
        Line::default(),
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Magenta)),
            Span::raw(" "),
            Span::styled(
                format!("{}...", app.loading_phrase),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!("\"{}\"", app.input.trim()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(loading, area);
}

/// Render the error box
fn render_error(app: &App, frame: &mut Frame, area: Rect) {
    let error = Paragraph::new(vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.session().error_message(),
            Style::default().fg(Color::LightRed),
        )),
        Line::default(),
        Line::from(Span::styled("Press r to try again", Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(error, centered_rect(60, 40, area));
}

/// Render the checklist screen: vibe card, progress gauge, step list
fn render_checklist(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Vibe card
            Constraint::Length(3), // Progress gauge
            Constraint::Min(0),    // Steps
        ])
        .split(area);

    let vibe = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", app.session().vibe()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Vibe check "));
    frame.render_widget(vibe, chunks[0]);

    let percent = app.session().progress_percent();
    let gauge_color = if app.session().is_complete() {
        Color::Green
    } else {
        Color::Magenta
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(gauge_color))
        .percent(u16::from(percent));
    frame.render_widget(gauge, chunks[1]);

    let items: Vec<ListItem> = app
        .session()
        .steps()
        .iter()
        .enumerate()
        .map(|(i, step)| step_item(step, i == app.selected))
        .collect();

    let title = if app.session().is_complete() {
        " 🎉 Sheesh! You crushed it! (n: new task) "
    } else {
        " Steps "
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, chunks[2]);
}

/// Build one step row
fn step_item(step: &Step, selected: bool) -> ListItem<'_> {
    let (mark, mark_style) = if step.completed {
        ("✔", Style::default().fg(Color::Green))
    } else {
        ("○", Style::default().fg(Color::DarkGray))
    };

    let title_style = if step.completed {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(if selected { "▶ " } else { "  " }, Style::default().fg(Color::Magenta)),
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(step.title.as_str(), title_style),
    ])];

    lines.push(Line::from(vec![
        Span::raw("     "),
        Span::styled(step.description.as_str(), Style::default().fg(Color::Gray)),
    ]));

    // Hype hint only while the step is still open
    if !step.completed {
        lines.push(Line::from(vec![
            Span::raw("     "),
            Span::styled(
                format!("💡 {}", step.motivation),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines.push(Line::default());

    ListItem::new(lines)
}

/// Render the footer key hints
fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.session().phase() {
        Phase::Idle => "Enter: break it down │ 1-3: suggestions │ Esc: clear/quit",
        Phase::Loading => "hang tight... │ q: quit",
        Phase::Success => "j/k: move │ Space: check off │ n: new task │ ?: help │ q: quit",
        Phase::Error => "r: try again │ q: quit",
    };

    let footer = Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, help_area);

    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from("  j/k or ↑/↓   move between steps"),
        Line::from("  Space/Enter  check a step off"),
        Line::from("  n or r       clear and start a new task"),
        Line::from("  q / Ctrl-C   quit"),
        Line::default(),
        Line::from(Span::styled("Any key to close", Style::default().fg(Color::DarkGray))),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Help "),
    );
    frame.render_widget(help, help_area);
}

/// Centered sub-rectangle helper for overlays
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{BreakdownOutput, StepDraft};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
    }

    #[test]
    fn test_render_idle() {
        let app = App::new();
        draw(&app);
    }

    #[test]
    fn test_render_loading() {
        let mut app = App::new();
        app.input = "clean my room".to_string();
        app.session_mut().submit("clean my room").unwrap();
        draw(&app);
    }

    #[test]
    fn test_render_success_and_help() {
        let mut app = App::new();
        let seq = app.session_mut().submit("clean my room").unwrap();
        app.session_mut().complete(
            seq,
            Ok(BreakdownOutput {
                overall_vibe: "you got this".to_string(),
                steps: vec![StepDraft {
                    title: "Stand up".to_string(),
                    description: "Just stand".to_string(),
                    motivation: "Go".to_string(),
                }],
            }),
        );
        draw(&app);

        app.show_help = true;
        draw(&app);
    }

    #[test]
    fn test_render_error() {
        let mut app = App::new();
        let seq = app.session_mut().submit("clean my room").unwrap();
        app.session_mut().complete(seq, Err(crate::llm::LlmError::EmptyResponse));
        draw(&app);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, area);
        assert!(inner.width <= area.width);
        assert!(inner.height <= area.height);
    }
}

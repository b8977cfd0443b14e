//! TUI rendering
//!
//! Pure functions from App state to widgets. Layout, top to bottom: status
//! header, whiteboard canvas, caption panel, prompt box.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::plan::{CANVAS_SIZE, DrawOp};
use crate::playback::Status;

use super::app::App;

const CHALK: Color = Color::White;

/// Render the whole frame
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_board(app, frame, chunks[1]);
    render_caption(app, frame, chunks[2]);
    render_prompt(app, frame, chunks[3]);
}

fn status_span(app: &App) -> Span<'_> {
    let snapshot = app.snapshot();
    match snapshot.status {
        Status::Idle => Span::styled("idle", Style::default().fg(Color::DarkGray)),
        Status::Thinking => Span::styled("thinking...", Style::default().fg(Color::Yellow)),
        Status::Drawing => {
            let step = snapshot.current_step.map(|i| i + 1).unwrap_or(0);
            Span::styled(
                format!("drawing step {step}/{}", snapshot.steps.len()),
                Style::default().fg(Color::Cyan),
            )
        }
        Status::Done => Span::styled("done - r replays", Style::default().fg(Color::Green)),
        Status::Error => Span::styled("error", Style::default().fg(Color::Red)),
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" chalkboard ", Style::default().fg(Color::Black).bg(CHALK)),
        Span::raw(" "),
        status_span(app),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_board(app: &App, frame: &mut Frame, area: Rect) {
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("whiteboard"))
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_SIZE])
        .y_bounds([0.0, CANVAS_SIZE])
        .paint(|ctx| {
            for op in app.sketch().marks() {
                paint_op(ctx, op);
            }
        });
    frame.render_widget(canvas, area);
}

fn paint_op(ctx: &mut ratatui::widgets::canvas::Context<'_>, op: &DrawOp) {
    match op {
        DrawOp::Line { from, to } => ctx.draw(&CanvasLine {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            color: CHALK,
        }),
        DrawOp::Stroke { points } => {
            for pair in points.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].x,
                    y1: pair[0].y,
                    x2: pair[1].x,
                    y2: pair[1].y,
                    color: CHALK,
                });
            }
        }
        DrawOp::Circle { center, radius } => ctx.draw(&Circle {
            x: center.x,
            y: center.y,
            radius: *radius,
            color: CHALK,
        }),
        DrawOp::Rect { origin, width, height } => ctx.draw(&Rectangle {
            x: origin.x,
            y: origin.y,
            width: *width,
            height: *height,
            color: CHALK,
        }),
        DrawOp::Label { at, text } => {
            ctx.print(at.x, at.y, Line::styled(text.clone(), Style::default().fg(CHALK)));
        }
    }
}

fn render_caption(app: &App, frame: &mut Frame, area: Rect) {
    let snapshot = app.snapshot();
    let text = if let Some(error) = &snapshot.error {
        Line::from(vec![
            Span::raw(snapshot.caption.clone()),
            Span::raw(" "),
            Span::styled(format!("({error})"), Style::default().fg(Color::Red)),
        ])
    } else {
        Line::from(snapshot.caption.clone())
    };
    let caption = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("caption"));
    frame.render_widget(caption, area);
}

fn render_prompt(app: &App, frame: &mut Frame, area: Rect) {
    let busy = app.snapshot().status.is_busy();
    let title = if busy {
        "prompt (waiting for playback)"
    } else {
        "prompt - Enter explains, Esc quits"
    };
    let mut line = Line::from(format!("> {}", app.input()));
    if busy {
        line = line.dim();
    }
    let prompt = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(prompt, area);
}

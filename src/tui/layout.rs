//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table};

use super::runtime::{App, StatusMessage};
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let rooms = table_height(app.monitor().registry().len());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),     // header
            Constraint::Length(rooms), // room table
            Constraint::Min(10),       // chart
            Constraint::Length(1),     // status line
            Constraint::Length(1),     // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_rooms(frame, app, chunks[1]);
    render_chart(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Rows for the room table: one per room plus borders and header.
fn table_height(rooms: usize) -> u16 {
    u16::try_from(rooms).unwrap_or(u16::MAX).saturating_add(3)
}

/// Header bar: preset name, update count, threshold, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (icon, label) = if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };
    let monitor = app.monitor();

    let header = Line::from(vec![
        Span::styled(
            " PHASE-MONITOR ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ updates={} │ warn>{:.0} W │ {}ms │ {icon} {label} ",
            monitor.ticks(),
            monitor.registry().warning_threshold(),
            app.tick_interval_ms(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Room status table: name, sockets, phase readings, warning flag.
fn render_rooms(frame: &mut Frame, app: &App, area: Rect) {
    let registry = app.monitor().registry();
    let rows = registry.rooms().iter().enumerate().map(|(idx, room)| {
        let r = room.current_reading();
        let over = registry.is_over_threshold(room.name()).unwrap_or(false);
        let (flag, color) = if over {
            ("WARN", style::WARN_COLOR)
        } else {
            ("ok", style::OK_COLOR)
        };
        let mut row_style = Style::default();
        if idx == app.selected {
            row_style = row_style.bg(style::SELECTED_BG).add_modifier(Modifier::BOLD);
        }
        Row::new(vec![
            Cell::from(room.name().to_string()),
            Cell::from(room.sockets().to_string()),
            Cell::from(format!("{:.0}", r.l1)),
            Cell::from(format!("{:.0}", r.l2)),
            Cell::from(format!("{:.0}", r.l3)),
            Cell::from(Span::styled(flag, Style::default().fg(color))),
        ])
        .style(row_style)
    });

    let header = Row::new(vec!["Room", "Sockets", "Phase 1 W", "Phase 2 W", "Phase 3 W", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(Block::default().title(" Rooms ").borders(Borders::ALL));

    frame.render_widget(table, area);
}

/// Selected room and phase over time, with the warning threshold.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let points = app.chart_points();
    let threshold = app.monitor().registry().warning_threshold();

    let x_lo = points.first().map_or(0.0, |p| p.0);
    let x_hi = points.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);
    let threshold_line = [(x_lo, threshold), (x_hi, threshold)];
    let y_bounds = style::auto_bounds_y(&points, threshold);

    let datasets = vec![
        Dataset::default()
            .name(app.phase.to_string())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::phase_color(app.phase)))
            .data(&points),
        Dataset::default()
            .name("Threshold")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::THRESHOLD_COLOR))
            .data(&threshold_line),
    ];

    let room_name = app.selected_room().map_or("-", |r| r.name());
    let title = format!(" {room_name} - {} ", app.phase);

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("s")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo:.0}"), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("W")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Last confirmation or error message.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(StatusMessage::Info(msg)) => {
            Line::from(Span::styled(format!(" {msg}"), Style::default().fg(style::INFO_FG)))
        }
        Some(StatusMessage::Error(msg)) => Line::from(Span::styled(
            format!(" error: {msg}"),
            Style::default()
                .fg(style::ERROR_FG)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  u:Update  ↑/↓:Room  1/2/3:Phase  +/-:Sockets  [/]:Threshold  i:Import",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

//! Dashboard layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table};

use super::runtime::App;
use super::style;

/// Renders the full dashboard frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(11),    // appliance table
            Constraint::Length(3),  // group gauges
            Constraint::Length(8),  // alert log
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_appliances(frame, app, chunks[1]);
    render_groups(frame, app, chunks[2]);
    render_alerts(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: run state, tick counter, whole-house totals.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let snap = app.snapshot();
    let state_label = if snap.running { "▶ RUNNING" } else { "■ STOPPED" };

    let mut spans = vec![
        Span::styled(
            " SMARTLOAD ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} │ tick {} │ {} │ {:.1}A / {:.0}W ",
            state_label,
            snap.tick,
            app.mode(),
            snap.total_current_a,
            snap.total_power_w,
        )),
    ];
    if snap.over_limit {
        spans.push(Span::styled(
            " OVERLOAD ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::OVERLOAD)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Appliance table with the selected row highlighted.
fn render_appliances(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Appliance", "Location", "Group", "Current", "Status", "Power"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .appliances()
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let power = if a.is_on { "ON" } else { "off" };
            let mut row = Row::new(vec![
                Cell::from(a.name.clone()),
                Cell::from(a.location.clone()),
                Cell::from(a.group.clone()),
                Cell::from(format!("{:>6.2}A", a.current_a)),
                Cell::from(a.status.to_string())
                    .style(Style::default().fg(style::appliance_color(a.status))),
                Cell::from(power),
            ]);
            if i == app.selected {
                row = row.style(Style::default().bg(style::SELECTED_BG));
            }
            row
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(Block::default().title(" Appliances ").borders(Borders::ALL));

    frame.render_widget(table, area);
}

/// One load gauge per socket group, colored by status.
fn render_groups(frame: &mut Frame, app: &App, area: Rect) {
    let groups = app.groups();
    if groups.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> =
        groups.iter().map(|_| Constraint::Ratio(1, groups.len() as u32)).collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (group, chunk) in groups.iter().zip(chunks.iter()) {
        let pct = group.load_percentage();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} ", group.name))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(style::group_color(group.status)))
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.1}A ({pct:.0}%)", group.total_current_a));
        frame.render_widget(gauge, *chunk);
    }
}

/// Alert log, newest first, colored by severity.
fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .alerts()
        .iter()
        .map(|alert| {
            let mut item = ListItem::new(alert.to_string())
                .style(Style::default().fg(style::severity_color(alert.severity)));
            if alert.acknowledged {
                item = item.style(Style::default().fg(style::FOOTER_FG));
            }
            item
        })
        .collect();

    let title = format!(" Alerts ({}) ", app.alerts().len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

/// Footer with session energy, shedding hint, and keybindings.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let shed = if app.shed_plan().is_empty() {
        String::new()
    } else {
        format!("  shed: {} appliance(s)", app.shed_plan().len())
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " energy {}{shed}  │  q:Quit  Space:Start/Stop  ↑/↓:Select  t:Toggle  m:Mode  c:Clear alerts",
            app.formatted_energy(),
        ),
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

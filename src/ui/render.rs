//! Drawing: a stateless projection of [`App`] onto a ratatui frame.

use crate::core::domain::model::{GuestKind, GuestStatus, PollSnapshot};
use crate::ui::{app::App, app::Tab, format};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const GAUGE_COLORS: [Color; 4] = [Color::Blue, Color::Red, Color::Green, Color::Yellow];

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Overview => draw_overview(frame, app, chunks[1]),
        Tab::VirtualMachines => draw_guest_list(frame, app, GuestKind::Vm, chunks[1]),
        Tab::Containers => draw_guest_list(frame, app, GuestKind::Container, chunks[1]),
        Tab::Exit => {}
    }
    draw_footer(frame, app, chunks[2]);

    if let Some(detail) = &app.error_dialog {
        draw_error_dialog(frame, detail);
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("pvedash"));
    frame.render_widget(tabs, area);
}

fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(3); 4]).split(area);

    let (titles, labels, percents): ([String; 4], [String; 4], [u16; 4]) = match &app.snapshot {
        Some(PollSnapshot::Connected { host, .. }) => (
            [
                format::cpu_title(host),
                format::ram_title(host),
                format::disk_title(host),
                "I/O Delay".to_string(),
            ],
            [
                format!("{}%", host.cpu_percent()),
                format!("{}%", host.memory_percent()),
                format!("{}%", host.disk_percent()),
                format::io_wait_text(host),
            ],
            [
                host.cpu_percent(),
                host.memory_percent(),
                host.disk_percent(),
                host.io_wait_percent(),
            ],
        ),
        Some(PollSnapshot::Disconnected) => (
            [
                "CPU (N/A)".to_string(),
                "RAM".to_string(),
                "Disk".to_string(),
                "I/O Delay".to_string(),
            ],
            [
                "Error".to_string(),
                "Error".to_string(),
                "Error".to_string(),
                "Error".to_string(),
            ],
            [0; 4],
        ),
        None => (
            [
                "CPU".to_string(),
                "RAM".to_string(),
                "Disk".to_string(),
                "I/O Delay".to_string(),
            ],
            [
                "Connecting...".to_string(),
                "Connecting...".to_string(),
                "Connecting...".to_string(),
                "Connecting...".to_string(),
            ],
            [0; 4],
        ),
    };

    for i in 0..4 {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(titles[i].clone()),
            )
            .gauge_style(Style::default().fg(GAUGE_COLORS[i]))
            .percent(percents[i])
            .label(labels[i].clone());
        frame.render_widget(gauge, rows[i]);
    }
}

fn draw_guest_list(frame: &mut Frame, app: &App, kind: GuestKind, area: Rect) {
    let title = match kind {
        GuestKind::Vm => "Virtual Machines",
        GuestKind::Container => "Containers",
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = match &app.snapshot {
        None => vec![ListItem::new("Connecting...")],
        Some(PollSnapshot::Disconnected) => vec![ListItem::new("Disconnected")],
        Some(PollSnapshot::Connected { .. }) => {
            let guests = app.guests(kind);
            if guests.is_empty() {
                vec![ListItem::new(format!("No {} found", kind))]
            } else {
                guests
                    .iter()
                    .map(|guest| {
                        ListItem::new(format::guest_row(guest)).style(status_style(&guest.status))
                    })
                    .collect()
            }
        }
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(app.selected_index(kind));
    frame.render_stateful_widget(list, area, &mut state);
}

fn status_style(status: &GuestStatus) -> Style {
    match status {
        GuestStatus::Running => Style::default().fg(Color::Green),
        GuestStatus::Stopped => Style::default().fg(Color::Red),
        GuestStatus::Other(_) => Style::default(),
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let has_selection = app.selected_guest().is_some();
    let action_style = if has_selection {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from("Tab/1-4 switch  Up/Down select  q quit"),
        Line::styled(
            "s start  x stop  r reboot  h shutdown",
            action_style,
        ),
    ];
    if let Some(warning) = &app.warning {
        lines.push(Line::styled(
            warning.clone(),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(status) = &app.status {
        lines.push(Line::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        ));
    }

    let footer = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn draw_error_dialog(frame: &mut Frame, detail: &str) {
    let area = centered_rect(70, 30, frame.area());
    let dialog = Paragraph::new(vec![
        Line::from(detail.to_string()),
        Line::from(""),
        Line::styled("press any key", Style::default().fg(Color::DarkGray)),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}

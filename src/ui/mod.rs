// UI module for rendering the TUI.
// Contains widgets for the tab bar, forms, result regions, and status bar.

mod form;
mod fragment;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::state::{Focusable, StatusLevel, ViewState};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, view, chunks[0]);
    draw_content(frame, view, chunks[1]);
    draw_status_bar(frame, view, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if view.show_help {
        draw_help_overlay(frame);
    }
}

/// Form on the left, the tab's result regions stacked on the right.
fn draw_content(frame: &mut Frame, view: &ViewState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    form::draw_form(frame, view, columns[0]);

    let regions: Vec<_> = view.regions.for_tab(view.tabs.active()).collect();
    if regions.is_empty() {
        fragment::draw_empty(frame, columns[1]);
        return;
    }

    let constraints = vec![Constraint::Ratio(1, regions.len() as u32); regions.len()];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    for ((id, region), row) in regions.into_iter().zip(rows.iter()) {
        fragment::draw_region(frame, id, region, *row);
    }
}

/// Draw the status bar with keybinding hints and the latest status message.
fn draw_status_bar(frame: &mut Frame, view: &ViewState, area: Rect) {
    let on_control = matches!(
        view.forms.focused(view.tabs.active()),
        Focusable::Control(_)
    );

    let mut spans = vec![
        Span::raw(" Tab/↑↓ "),
        Span::styled("Focus", Style::default().fg(Color::DarkGray)),
        Span::raw(if on_control { "  ↵ " } else { "  Space " }),
        Span::styled(
            if on_control { "Run" } else { "Toggle" },
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  F1-F4 "),
        Span::styled("Tabs", Style::default().fg(Color::DarkGray)),
        Span::raw("  ^D "),
        Span::styled("Download", Style::default().fg(Color::DarkGray)),
        Span::raw("  F12 "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  ^Q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    if let Some(status) = &view.status {
        let color = match status.level {
            StatusLevel::Info => Color::Cyan,
            StatusLevel::Error => Color::Red,
        };
        let time = status
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S");
        spans.push(Span::styled(
            format!("  [{}] {}", time, status.message),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 55;
    let popup_height = 18;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("Tab / ↓", "Next field or control"),
        key("S-Tab / ↑", "Previous field or control"),
        key("Enter", "Run focused control"),
        key("Space", "Toggle checkbox"),
        key("F1-F4", "Switch tab"),
        key("^←/^→", "Previous / next tab"),
        key("PgUp/PgDn", "Scroll results"),
        key("^D", "Download linked files"),
        key("F12", "Show/hide this help"),
        key("^Q / ^C", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("F12", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

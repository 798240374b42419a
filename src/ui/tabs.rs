// Tab bar rendering with the server health indicator.
// Handles visual indication of the active tab selector.

use ratatui::{prelude::*, widgets::*};

use crate::state::{HealthStatus, Tab, ViewState};

fn health_style(health: HealthStatus) -> Style {
    match health {
        HealthStatus::Checking => Style::default().fg(Color::Yellow),
        HealthStatus::Ready => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        HealthStatus::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, view: &ViewState, area: Rect) {
    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let title = format!("F{} {}", i + 1, tab.title());
            let style = if view.tabs.is_selector_active(*tab) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(title, style))
        })
        .collect();

    let health = Line::from(vec![
        Span::styled("● ", health_style(view.health)),
        Span::styled(view.health.display(), health_style(view.health)),
        Span::raw(" "),
    ])
    .right_aligned();

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" review-console ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .title(health),
        )
        .select(view.tabs.active().index())
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}

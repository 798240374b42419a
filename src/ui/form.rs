// Form pane rendering.
// Draws input fields and controls for the active tab, highlighting the focused element.

use ratatui::{prelude::*, widgets::*};

use crate::state::forms::layout;
use crate::state::{Focusable, ViewState};

/// Draw the form for the active tab.
pub fn draw_form(frame: &mut Frame, view: &ViewState, area: Rect) {
    let tab = view.tabs.active();
    let focused = view.forms.focused(tab);
    let mut lines: Vec<Line> = Vec::new();

    for item in layout(tab) {
        let is_focused = *item == focused;
        let marker = if is_focused {
            Span::styled("> ", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("  ")
        };

        match item {
            Focusable::Field(field) if view.forms.is_checkbox(*field) => {
                let mark = if view.forms.checked(*field) { "[x]" } else { "[ ]" };
                lines.push(Line::from(vec![
                    marker,
                    Span::styled(mark, Style::default().fg(Color::Cyan)),
                    Span::raw(format!(" {}", field.label())),
                ]));
            }
            Focusable::Field(field) => {
                lines.push(Line::from(vec![
                    marker,
                    Span::styled(field.label(), Style::default().fg(Color::DarkGray)),
                ]));
                let mut value = vec![
                    Span::raw("    "),
                    Span::styled(
                        view.forms.text(*field).to_string(),
                        Style::default().fg(Color::White),
                    ),
                ];
                if is_focused {
                    value.push(Span::styled("█", Style::default().fg(Color::Yellow)));
                }
                lines.push(Line::from(value));
            }
            Focusable::Control(control) => {
                let Some(state) = view.controls.get(*control) else {
                    continue;
                };
                let style = if state.disabled {
                    Style::default().fg(Color::DarkGray)
                } else if is_focused {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                lines.push(Line::from(vec![
                    marker,
                    Span::styled(format!("[ {} ]", state.label), style),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", tab.title()));
    let form = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(form, area);
}

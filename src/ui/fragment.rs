// Region rendering.
// Turns fragment blocks into styled lines inside a border colored by render kind.

use ratatui::{prelude::*, widgets::*};

use crate::state::{Block as ContentBlock, Fragment, Region, RegionId, RenderKind, ScoreCard};

fn kind_color(kind: RenderKind) -> Color {
    match kind {
        RenderKind::Success => Color::Green,
        RenderKind::Error => Color::Red,
        RenderKind::Info => Color::Cyan,
    }
}

fn score_span(card: &ScoreCard) -> Vec<Span<'static>> {
    let value_style = match card.passed {
        Some(true) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Some(false) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().add_modifier(Modifier::BOLD),
    };
    vec![
        Span::styled(format!("{} ", card.label), Style::default().fg(Color::DarkGray)),
        Span::styled(card.value.clone(), value_style),
        Span::raw("   "),
    ]
}

/// Convert fragment content to lines.
pub fn fragment_lines(fragment: &Fragment) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &fragment.blocks {
        match block {
            ContentBlock::Heading(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
            ContentBlock::Field { label, value } => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(value.clone()),
                ]));
            }
            ContentBlock::Text(text) => lines.push(Line::from(text.clone())),
            ContentBlock::Meta(text) => {
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ContentBlock::Scores(cards) => {
                lines.push(Line::from(cards.iter().flat_map(score_span).collect::<Vec<_>>()));
            }
            ContentBlock::Link { label, url, .. } => {
                lines.push(Line::from(vec![
                    Span::raw(format!("{} ", label)),
                    Span::styled(
                        url.clone(),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            ContentBlock::Preformatted(text) => {
                lines.extend(text.lines().map(|line| {
                    Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Gray),
                    ))
                }));
            }
        }
    }
    lines
}

/// Draw one result region.
pub fn draw_region(frame: &mut Frame, id: RegionId, region: &Region, area: Rect) {
    let color = kind_color(region.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", id.title()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(fragment_lines(&region.content))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((region.scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Placeholder for a tab with nothing rendered yet.
pub fn draw_empty(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Results appear here")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(text, area);
}

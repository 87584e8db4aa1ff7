//! Risk analysis result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::Analysis;
use crate::tui::styles::HeartTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// No analysis yet
    #[default]
    Idle,
    /// Completed analysis
    Complete { analysis: Analysis },
    /// Analysis failed
    Error { message: String },
}

/// Render the analysis result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { analysis } => render_analysis(f, chunks[1], analysis),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Risk Analysis", HeartTheme::title()),
        Span::styled(" │ Heart Attack Screening", HeartTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No analysis yet",
            HeartTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the patient form and press Enter",
            HeartTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_analysis(f: &mut Frame, area: Rect, analysis: &Analysis) {
    let block = Block::default()
        .title(Span::styled(" Screening Result ", HeartTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let advice_height = analysis.advice.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),             // Risk tier
            Constraint::Length(4),             // Probability gauge
            Constraint::Length(advice_height), // Advice
            Constraint::Min(0),                // Padding
        ])
        .margin(1)
        .split(inner);

    let tier = analysis.prediction.tier;
    let tier_style = HeartTheme::risk_tier(tier);
    let tier_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Risk status: {tier}"),
            tier_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tier.description(),
            HeartTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(tier_display, chunks[0]);

    let percent = analysis.prediction.percent();
    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Heart Attack Probability ",
                    HeartTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border()),
        )
        .gauge_style(tier_style)
        .percent((analysis.prediction.probability * 100.0) as u16)
        .label(format!("{percent:.1}%"));
    f.render_widget(prob_gauge, chunks[1]);

    let mut advice_lines = vec![Line::from(Span::styled(
        "Personal health advice:",
        HeartTheme::subtitle(),
    ))];
    for advice in &analysis.advice {
        advice_lines.push(Line::from(vec![
            Span::styled(" • ", HeartTheme::text_muted()),
            Span::styled(advice.message(), HeartTheme::text()),
        ]));
    }
    let advice_widget = Paragraph::new(advice_lines).wrap(Wrap { trim: true });
    f.render_widget(advice_widget, chunks[2]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", HeartTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, HeartTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HeartTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Back to Form ", HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Quit", HeartTheme::key_desc()),
        ]),
        _ => Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Back to Form ", HeartTheme::key_desc()),
            Span::styled("[N] ", HeartTheme::key_hint()),
            Span::styled("New Patient ", HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Quit", HeartTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(footer, area);
}

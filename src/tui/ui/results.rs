//! Clinical dashboard: placeholder, analyzing gauge, or the prediction.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::SymptomStore;
use crate::domain::{display_label, Prediction};
use crate::tui::styles::ClinicalTheme;

/// Render the right-hand results pane.
///
/// `progress` drives the gauge while an analysis is running.
pub fn render_results(f: &mut Frame, area: Rect, store: &SymptomStore, progress: f64) {
    if store.is_analyzing() {
        render_analyzing(f, area, progress, store.selection().len());
    } else if let Some(prediction) = store.prediction() {
        render_prediction(f, area, prediction);
    } else {
        render_awaiting(f, area);
    }
}

fn render_awaiting(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("♥", ClinicalTheme::text_muted())),
        Line::from(""),
        Line::from(Span::styled("AWAITING SYMPTOMS", ClinicalTheme::text_secondary())),
        Line::from(""),
        Line::from(Span::styled(
            "Select symptoms and press Enter to begin the analysis.",
            ClinicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_analyzing(f: &mut Frame, area: Rect, progress: f64, count: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(inner);

    let stage = Paragraph::new(Line::from(vec![
        Span::styled("Stage: ", ClinicalTheme::text_secondary()),
        Span::styled("Processing symptom map", ClinicalTheme::subtitle()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage, chunks[0]);

    let progress = progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ClinicalTheme::border()),
        )
        .gauge_style(ClinicalTheme::info())
        .percent((progress * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        format!("Sending {count} symptoms to the diagnostic service..."),
        ClinicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),      // Disease + description
            Constraint::Percentage(50), // Top card row
            Constraint::Min(0),         // Bottom card row
        ])
        .split(area);

    render_outcome(f, chunks[0], prediction);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let result = &prediction.result;
    render_list_card(f, top[0], "Medical Protocol", ClinicalTheme::ROSE, &result.medications);
    render_list_card(f, top[1], "Safety Steps", ClinicalTheme::EMERALD, &result.precautions);
    render_list_card(f, bottom[0], "Dietary Intake", ClinicalTheme::AMBER, &result.diets);
    render_text_card(f, bottom[1], "Recovery Plan", ClinicalTheme::BLUE, &result.workout);
}

fn render_outcome(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let block = Block::default()
        .title(Span::styled(" Inference Outcome ", ClinicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border_focused());

    let based_on: Vec<String> = prediction.symptoms.iter().map(|s| display_label(s)).collect();
    let description = if prediction.result.description.is_empty() {
        "Description not available.".to_string()
    } else {
        format!("\"{}\"", prediction.result.description)
    };

    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            prediction.result.disease.to_uppercase(),
            ClinicalTheme::title().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            description,
            ClinicalTheme::text_secondary().add_modifier(Modifier::ITALIC),
        )),
        Line::from(vec![
            Span::styled("Based on: ", ClinicalTheme::text_muted()),
            Span::styled(based_on.join(", "), ClinicalTheme::text()),
            Span::styled(
                format!("  at {}", prediction.received_at.format("%H:%M:%S UTC")),
                ClinicalTheme::text_muted(),
            ),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(content, area);
}

fn card_block(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title.to_uppercase()),
            ClinicalTheme::card(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::card(accent))
}

fn render_list_card(f: &mut Frame, area: Rect, title: &str, accent: Color, items: &[String]) {
    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::from(Span::styled("None listed", ClinicalTheme::text_muted()))]
    } else {
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled("• ", ClinicalTheme::card(accent)),
                    Span::styled(item.as_str(), ClinicalTheme::text()),
                ])
            })
            .collect()
    };

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(card_block(title, accent));
    f.render_widget(p, area);
}

fn render_text_card(f: &mut Frame, area: Rect, title: &str, accent: Color, text: &str) {
    let body = if text.is_empty() {
        Span::styled("None listed", ClinicalTheme::text_muted())
    } else {
        Span::styled(text, ClinicalTheme::text())
    };

    let p = Paragraph::new(Line::from(body))
        .wrap(Wrap { trim: true })
        .block(card_block(title, accent));
    f.render_widget(p, area);
}

//! UI module: View components for the TUI.

pub mod notice;
pub mod results;
pub mod symptoms;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::CatalogStatus;
use crate::tui::styles::ClinicalTheme;

/// Top bar: product name and backend link status.
pub fn render_header(f: &mut Frame, area: Rect, backend_label: &str, status: &CatalogStatus) {
    let (dot, link) = match status {
        CatalogStatus::Pending => (ClinicalTheme::warning(), "Connecting"),
        CatalogStatus::Ready => (ClinicalTheme::success(), "Link Active"),
        CatalogStatus::Unavailable(_) => (ClinicalTheme::danger(), "Link Offline"),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" NEURO", ClinicalTheme::title()),
        Span::styled("DX", ClinicalTheme::subtitle()),
        Span::styled(" │ Diagnostic Intelligence", ClinicalTheme::text_secondary()),
        Span::styled("   ● ", dot),
        Span::styled(link, dot),
        Span::styled(format!("  {backend_label}"), ClinicalTheme::text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Key hints, one line.
pub fn render_key_hints(f: &mut Frame, area: Rect, notice_open: bool) {
    let pairs: &[(&str, &str)] = if notice_open {
        &[("[Enter/Esc] ", "Dismiss "), ("[Ctrl-Q] ", "Quit")]
    } else {
        &[
            ("[type] ", "Search "),
            ("[↑↓] ", "Move "),
            ("[Space] ", "Toggle "),
            ("[←→] ", "Category "),
            ("[Enter] ", "Diagnose "),
            ("[Ctrl-R] ", "Reset "),
            ("[Ctrl-L] ", "Reload "),
            ("[Ctrl-Q] ", "Quit"),
        ]
    };

    let spans: Vec<Span> = pairs
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, ClinicalTheme::key_hint()),
                Span::styled(*desc, ClinicalTheme::key_desc()),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: Predictions come from pattern recognition and do not replace professional medical consultation.",
        ClinicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Rectangle of the given percentage size centered in `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

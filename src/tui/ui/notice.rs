//! Blocking notice popup.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::Notice;
use crate::tui::styles::ClinicalTheme;
use crate::tui::ui::centered_rect;

/// Draw `notice` centered over everything else.
pub fn render_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let popup = centered_rect(60, 30, area);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice.message.as_str(), ClinicalTheme::text())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Failure type: {}", notice.kind),
            ClinicalTheme::text_muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", ClinicalTheme::key_hint()),
            Span::styled("OK", ClinicalTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(ClinicalTheme::popup())
    .block(
        Block::default()
            .title(Span::styled(
                format!(" ! {} ", notice.title),
                ClinicalTheme::danger(),
            ))
            .borders(Borders::ALL)
            .border_style(ClinicalTheme::danger()),
    );

    f.render_widget(Clear, popup);
    f.render_widget(content, popup);
}

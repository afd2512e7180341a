//! Symptom checklist: search box, category tabs and the filtered list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::application::{CatalogStatus, SymptomStore};
use crate::domain::{display_label, CategoryFilter};
use crate::tui::styles::ClinicalTheme;

/// Render the left-hand symptom pane.
pub fn render_symptom_pane(f: &mut Frame, area: Rect, store: &SymptomStore, cursor: usize) {
    let block = Block::default()
        .title(Span::styled(" Symptom Log ", ClinicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // List
            Constraint::Length(3), // Selection summary
        ])
        .split(inner);

    render_search(f, chunks[0], store.search_term());
    render_tabs(f, chunks[1], store.category());
    render_list(f, chunks[2], store, cursor);
    render_selection_summary(f, chunks[3], store);
}

fn render_search(f: &mut Frame, area: Rect, term: &str) {
    let block = Block::default()
        .title(Span::styled(" Search ", ClinicalTheme::text_secondary()))
        .borders(Borders::ALL)
        .border_style(ClinicalTheme::border());

    let content = if term.is_empty() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("Search symptoms...", ClinicalTheme::text_muted()),
        ])
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(term, ClinicalTheme::text()),
            Span::styled("▌", ClinicalTheme::key_hint()),
        ])
    };

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_tabs(f: &mut Frame, area: Rect, active: CategoryFilter) {
    let titles: Vec<Line> = CategoryFilter::tabs()
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.name().to_uppercase())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.tab_index())
        .style(ClinicalTheme::text_secondary())
        .highlight_style(ClinicalTheme::tab_active())
        .divider(" ");

    f.render_widget(tabs, area);
}

fn render_list(f: &mut Frame, area: Rect, store: &SymptomStore, cursor: usize) {
    let visible = store.visible_symptoms();

    if visible.is_empty() {
        let (message, style) = match store.catalog_status() {
            CatalogStatus::Pending => ("Loading symptom catalog...".to_string(), ClinicalTheme::text_muted()),
            CatalogStatus::Unavailable(reason) => (
                format!("Catalog unavailable: {reason}  [Ctrl-L] Retry"),
                ClinicalTheme::danger(),
            ),
            CatalogStatus::Ready if store.catalog().is_empty() => (
                "The diagnostic service reported no symptoms.".to_string(),
                ClinicalTheme::text_muted(),
            ),
            CatalogStatus::Ready => (
                "No symptoms match this search and category.".to_string(),
                ClinicalTheme::text_muted(),
            ),
        };

        let p = Paragraph::new(Line::from(Span::styled(message, style)))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::NONE));
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|symptom| {
            let checked = store.selection().contains(symptom);
            let (mark, style) = if checked {
                ("[x] ", ClinicalTheme::checked())
            } else {
                ("[ ] ", ClinicalTheme::text())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(display_label(symptom), style),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(ClinicalTheme::cursor());
    let mut state = ListState::default().with_selected(Some(cursor.min(visible.len() - 1)));

    f.render_stateful_widget(list, area, &mut state);
}

fn render_selection_summary(f: &mut Frame, area: Rect, store: &SymptomStore) {
    let selection = store.selection();
    let summary = if selection.is_empty() {
        Span::styled("Nothing selected", ClinicalTheme::text_muted())
    } else {
        let labels: Vec<String> = selection.as_slice().iter().map(|s| display_label(s)).collect();
        Span::styled(labels.join(", "), ClinicalTheme::text())
    };

    let p = Paragraph::new(Line::from(summary))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Selected ({}) ", selection.len()),
                    ClinicalTheme::text_secondary(),
                ))
                .borders(Borders::TOP)
                .border_style(ClinicalTheme::border()),
        );

    f.render_widget(p, area);
}

//! Event log pane rendering

use super::utils::{clamp_scroll, pane_block, visible_rows};
use crate::snapshot::EventLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the event log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &EventLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Event Log ", is_focused);

    if log.lines.is_empty() {
        let paragraph = Paragraph::new("(no instructions processed)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = log
        .lines
        .iter()
        .map(|line| {
            let color = if line.failed {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3} ", line.step),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(line.text.as_str(), Style::default().fg(color)),
            ]))
        })
        .collect();

    // usize::MAX from the app means "follow the tail"
    let visible_height = visible_rows(area.height);
    *scroll_offset = clamp_scroll(*scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

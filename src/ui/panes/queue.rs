//! Pending instruction queue pane

use super::utils::{clamp_scroll, pane_block, visible_rows};
use crate::simulator::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the pending queue, head first
pub fn render_queue_pane(
    frame: &mut Frame,
    area: Rect,
    pending: &[Instruction],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Pending ({}) ", pending.len());
    let block = pane_block(&title, is_focused);

    if pending.is_empty() {
        let paragraph = Paragraph::new("(queue drained)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let all_items: Vec<ListItem> = pending
        .iter()
        .enumerate()
        .map(|(i, instruction)| {
            let (marker, style) = if i == 0 {
                (
                    "▸ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.fg))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{:>3} ", i), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(instruction.to_string(), style),
            ]))
        })
        .collect();

    let visible_height = visible_rows(area.height);
    *scroll_offset = clamp_scroll(*scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

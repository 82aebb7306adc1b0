//! Block pane rendering: allocated blocks and free slots
//!
//! Lists the block table (id, range, length) in address order followed by the
//! derived free slots. The block touched by the most recent instruction is
//! emphasized, and each block row is tagged with its memory map color.

use super::utils::{clamp_scroll, pane_block, visible_rows};
use crate::diagnostics::{block_table, free_slot_table};
use crate::memory::AddressSpace;
use crate::simulator::Outcome;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the block pane
pub struct BlocksScrollState {
    pub offset: usize,
}

/// Data needed to render the block pane
pub struct BlocksRenderData<'a> {
    pub space: &'a AddressSpace,
    pub last_outcome: Option<&'a Outcome>,
}

/// Render the block pane
pub fn render_blocks_pane(
    frame: &mut Frame,
    area: Rect,
    data: BlocksRenderData,
    is_focused: bool,
    scroll_state: &mut BlocksScrollState,
) {
    let block = pane_block(" Blocks ", is_focused);
    let header_style = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);

    let touched = match data.last_outcome {
        Some(Outcome::Allocated(b)) => Some(b.block_id),
        _ => None,
    };

    let mut all_items = vec![ListItem::new(Line::from(Span::styled(
        "Allocated Blocks:",
        header_style,
    )))];

    let rows = block_table(data.space);
    if rows.is_empty() {
        all_items.push(
            ListItem::new("  (no allocations)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }
    for (index, row) in rows.iter().enumerate() {
        let mut id_style = Style::default().fg(DEFAULT_THEME.fg);
        if touched == Some(row.block_id) {
            id_style = id_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(
                "  ■ ",
                Style::default().fg(DEFAULT_THEME.block_color(index)),
            ),
            Span::styled(
                format!("({}-{})", row.low, row.high),
                Style::default().fg(DEFAULT_THEME.number),
            ),
            Span::styled(" --> ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format!("ID {}", row.block_id), id_style),
            Span::styled(
                format!("  [{}]", row.length),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ])));
    }

    all_items.push(ListItem::new(""));
    all_items.push(ListItem::new(Line::from(Span::styled(
        "Free Slots:",
        header_style,
    ))));

    let gaps = free_slot_table(data.space);
    if gaps.is_empty() {
        all_items.push(
            ListItem::new("  (memory full)").style(Style::default().fg(DEFAULT_THEME.error)),
        );
    }
    for gap in gaps {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(
                "  □ ",
                Style::default().fg(DEFAULT_THEME.free_cell),
            ),
            Span::styled(
                format!("({}-{})", gap.low, gap.high),
                Style::default().fg(DEFAULT_THEME.number),
            ),
            Span::styled(" --> EMPTY", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                format!("  [{}]", gap.len()),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ])));
    }

    let visible_height = visible_rows(area.height);
    scroll_state.offset = clamp_scroll(scroll_state.offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

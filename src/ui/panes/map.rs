//! Memory map pane
//!
//! Draws the address space as a grid of cells, one cell per address when the
//! pane is large enough, otherwise one cell per run of addresses. A cell takes
//! the color of the block owning its first address, or the free color.

use super::utils::pane_block;
use crate::memory::{AddressSpace, Address};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ALLOCATED_CELL: &str = "█";
const FREE_CELL: &str = "·";

/// Render the memory map pane
pub fn render_map_pane(frame: &mut Frame, area: Rect, space: &AddressSpace, is_focused: bool) {
    let block = pane_block(" Memory Map ", is_focused);

    let inner_width = area.width.saturating_sub(2).max(1) as u64;
    // Two rows go to the summary line and a spacer
    let grid_rows = (area.height.saturating_sub(4) as u64).max(1);
    let per_cell = space.size().div_ceil(inner_width * grid_rows).max(1);

    let mut lines = vec![summary_line(space, per_cell), Line::default()];
    let mut row: Vec<Span> = Vec::with_capacity(inner_width as usize);

    let mut addr: Address = 0;
    while addr < space.size() {
        let cell = match owner_index(space, addr) {
            Some(index) => Span::styled(
                ALLOCATED_CELL,
                Style::default().fg(DEFAULT_THEME.block_color(index)),
            ),
            None => Span::styled(FREE_CELL, Style::default().fg(DEFAULT_THEME.free_cell)),
        };
        row.push(cell);

        if row.len() as u64 == inner_width {
            lines.push(Line::from(std::mem::take(&mut row)));
        }
        addr += per_cell;
    }
    if !row.is_empty() {
        lines.push(Line::from(row));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn summary_line(space: &AddressSpace, per_cell: u64) -> Line<'static> {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.number);

    let mut spans = vec![
        Span::styled("size ", label),
        Span::styled(space.size().to_string(), value),
        Span::styled(" │ used ", label),
        Span::styled(space.used().to_string(), value),
        Span::styled(" │ free ", label),
        Span::styled(space.free_total().to_string(), value),
        Span::styled(" │ frag ", label),
        Span::styled(format!("{:.3}", space.fragmentation()), value),
    ];
    if per_cell > 1 {
        spans.push(Span::styled(format!(" │ 1 cell = {} addr", per_cell), label));
    }
    Line::from(spans)
}

/// Position (in address order) of the block containing `addr`
fn owner_index(space: &AddressSpace, addr: Address) -> Option<usize> {
    space
        .intervals()
        .iter()
        .position(|b| b.low <= addr && addr <= b.high)
}

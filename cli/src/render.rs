use std::fmt::Write;

use hexsweeper_core::{BoardView, CellView, GameOutcome};

fn glyph(cell: &CellView, triggered: bool) -> char {
    match (cell.has_mine, cell.is_flagged, cell.neighbor_mine_count) {
        _ if triggered => 'X',
        // only visible once the game is lost
        (Some(false), true, _) => '!',
        (_, true, _) => 'F',
        (Some(true), false, _) => '*',
        (_, false, Some(0)) => ' ',
        (_, false, Some(count)) => char::from(b'0' + count.min(9)),
        (_, false, None) if cell.is_revealed => '?',
        _ => '.',
    }
}

/// Draws the board column by column, each line shifted so the columns form a hexagon on its side.
pub fn render(view: &BoardView) -> String {
    let status = match view.outcome {
        GameOutcome::InProgress => "in progress",
        GameOutcome::Won => "you win",
        GameOutcome::Lost => "game over",
    };
    let center = usize::from(view.size.saturating_sub(1));

    let mut out = String::new();
    let _ = writeln!(out, "mines left: {}  ({status})", view.remaining_mines);
    for (col, cells) in view.columns.iter().enumerate() {
        let indent = " ".repeat(col.abs_diff(center));
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                let triggered = view.triggered_mine == Some((col as u8, row as u8));
                glyph(cell, triggered).to_string()
            })
            .collect();
        let _ = writeln!(out, "{col:>3} | {indent}{}", line.join(" "));
    }
    out
}

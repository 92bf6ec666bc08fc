//! Board rendering, generated from the geometry tables

use stonehenge_core::{GameState, LineId, Orientation, Player};

fn mark(owner: Option<Player>, open: char) -> char {
    match owner {
        Some(Player::One) => '1',
        Some(Player::Two) => '2',
        None => open,
    }
}

/// Format a state for the terminal: the cell triangle with owners filled
/// in, followed by a ley-line claim table.
pub fn render(state: &GameState) -> String {
    let geometry = state.geometry();
    let width = geometry.size() as usize + 1;
    let mut out = String::new();

    for row in geometry.rows() {
        out.push_str(&" ".repeat(width - row.len()));
        let cells: Vec<String> = row
            .iter()
            .map(|&c| mark(state.owner(c), geometry.label(c)).to_string())
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    let total = geometry.line_count();
    out.push('\n');
    out.push_str(&format!(
        "ley-lines: p1 {}/{}, p2 {}/{} (first to {} wins)\n",
        state.claimed_count(Player::One),
        total,
        state.claimed_count(Player::Two),
        total,
        (total + 1) / 2,
    ));

    for orientation in [
        Orientation::Horizontal,
        Orientation::Ascending,
        Orientation::Descending,
    ] {
        let marks: Vec<String> = geometry
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| line.orientation == orientation)
            .map(|(id, _)| mark(state.claimed_by(id as LineId), '.').to_string())
            .collect();
        out.push_str(&format!(
            "  {:<12}{}\n",
            format!("{:?}:", orientation).to_lowercase(),
            marks.join(" ")
        ));
    }

    out
}

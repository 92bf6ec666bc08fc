//! Triangular board geometry with precomputed ley-line tables

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Smallest supported side length
pub const MIN_SIZE: u8 = 1;
/// Largest supported side length
pub const MAX_SIZE: u8 = 5;

/// Index into a geometry's cell arena. Labels run 'A'.. in row-major order.
pub type CellId = u8;

/// Index into a geometry's ley-line arena
pub type LineId = u8;

/// Direction class of a ley-line. Every cell lies on exactly one ley-line
/// of each orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Ascending,
    Descending,
}

/// A designated group of cells, claimed permanently once a player owns at
/// least half of it.
#[derive(Clone, Debug, Serialize)]
pub struct LeyLine {
    pub orientation: Orientation,
    pub cells: Vec<CellId>,
}

/// Fixed geometry for one board size: cell arena, ley-line membership, and
/// the per-cell table of the three lines through it.
///
/// Built once per size and shared read-only by every state of that size
/// (wrap in `Arc`). For side length n there are (n^2 + 5n) / 2 cells laid
/// out as n rows of lengths 2..=n+1 plus a final row of length n, and
/// 3 * (n + 1) ley-lines.
#[derive(Debug)]
pub struct BoardGeometry {
    size: u8,
    lines: Vec<LeyLine>,
    lines_through: Vec<[LineId; 3]>,
    label_index: FxHashMap<char, CellId>,
}

impl BoardGeometry {
    pub fn new(size: u8) -> Result<Self, GameError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::Configuration { size });
        }

        let rows = build_rows(size);
        let lines = build_lines(size, &rows);
        let lines_through = index_lines_through(&rows, &lines);

        let label_index = lines_through
            .iter()
            .enumerate()
            .map(|(id, _)| (label_for(id as CellId), id as CellId))
            .collect();

        Ok(Self {
            size,
            lines,
            lines_through,
            label_index,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.lines_through.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LeyLine] {
        &self.lines
    }

    /// The three lines through a cell, ordered horizontal / ascending /
    /// descending.
    pub fn lines_through(&self, cell: CellId) -> [LineId; 3] {
        self.lines_through[cell as usize]
    }

    pub fn label(&self, cell: CellId) -> char {
        label_for(cell)
    }

    pub fn cell_by_label(&self, label: char) -> Option<CellId> {
        self.label_index.get(&label.to_ascii_uppercase()).copied()
    }

    /// Cell ids grouped by display row: n rows of lengths 2..=n+1, then a
    /// final row of length n.
    pub fn rows(&self) -> Vec<Vec<CellId>> {
        build_rows(self.size)
    }
}

fn label_for(cell: CellId) -> char {
    (b'A' + cell) as char
}

fn build_rows(size: u8) -> Vec<Vec<CellId>> {
    let size = size as usize;
    let mut rows = Vec::with_capacity(size + 1);
    let mut next: CellId = 0;

    for i in 0..size {
        let row: Vec<CellId> = (0..i + 2).map(|_| post_inc(&mut next)).collect();
        rows.push(row);
    }
    rows.push((0..size).map(|_| post_inc(&mut next)).collect());

    rows
}

fn post_inc(next: &mut CellId) -> CellId {
    let id = *next;
    *next += 1;
    id
}

/// Ley-line membership for the fixed Stonehenge layout.
///
/// Horizontal lines are the rows. Ascending lines run down-left: column k
/// of the left-justified upper rows, closed by cell k-1 of the final row.
/// Descending lines run down-right: one step right per row down, closed by
/// the matching final-row cell, plus the line of row-ending cells.
fn build_lines(size: u8, rows: &[Vec<CellId>]) -> Vec<LeyLine> {
    let n = size as usize;
    let last = &rows[n];
    let mut lines = Vec::with_capacity(3 * (n + 1));

    for row in rows {
        lines.push(LeyLine {
            orientation: Orientation::Horizontal,
            cells: row.clone(),
        });
    }

    for k in 0..=n {
        let mut cells: Vec<CellId> = rows[..n]
            .iter()
            .filter(|row| k < row.len())
            .map(|row| row[k])
            .collect();
        if k >= 1 {
            cells.push(last[k - 1]);
        }
        lines.push(LeyLine {
            orientation: Orientation::Ascending,
            cells,
        });
    }

    for i in 0..n {
        let mut cells: Vec<CellId> = rows[i..n]
            .iter()
            .enumerate()
            .map(|(t, row)| row[t])
            .collect();
        cells.push(last[cells.len() - 1]);
        lines.push(LeyLine {
            orientation: Orientation::Descending,
            cells,
        });
    }
    lines.push(LeyLine {
        orientation: Orientation::Descending,
        cells: rows[..n].iter().enumerate().map(|(t, row)| row[t + 1]).collect(),
    });

    lines
}

fn index_lines_through(rows: &[Vec<CellId>], lines: &[LeyLine]) -> Vec<[LineId; 3]> {
    let cell_count = rows.iter().map(Vec::len).sum();
    let mut through: Vec<Vec<LineId>> = vec![Vec::new(); cell_count];

    for (id, line) in lines.iter().enumerate() {
        for &cell in &line.cells {
            through[cell as usize].push(id as LineId);
        }
    }

    // Lines are built orientation by orientation, so each cell collects its
    // horizontal, ascending, and descending line in that order.
    through
        .into_iter()
        .map(|ids| {
            assert_eq!(ids.len(), 3, "every cell lies on exactly three ley-lines");
            [ids[0], ids[1], ids[2]]
        })
        .collect()
}

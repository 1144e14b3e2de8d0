use dg_base::Cell;
use dg_base::constants::MAX_DIMENSION;

/// The button grid: `rows * cols` cells addressed row-major by a single index.
///
/// Regenerating the grid always replaces every cell. Nothing carries over
/// from the previous layout, even at indices both layouts share.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStore {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole grid with `rows * cols` fresh empty cells.
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) {
        let len = rows.saturating_mul(cols);
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![Cell::default(); len];
        log::info!("grid regenerated: {}x{} ({} cells)", rows, cols, len);
    }

    /// Cell at `idx`. Callers only use indices taken from the current grid;
    /// anything else is a bug in the caller and panics.
    pub fn get_cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Overwrite the cell at `idx` in place. Same bounds contract as `get_cell`.
    pub fn set_cell(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    /// Bounds-checked lookup for callers holding an index from elsewhere
    /// (mouse hit-testing, stale view state).
    pub fn get(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index for (row, col), or None outside the grid.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols { Some(row * self.cols + col) } else { None }
    }

    /// (row, col) for a linear index, or None outside the grid.
    pub fn coords_of(&self, idx: usize) -> Option<(usize, usize)> {
        if idx < self.cells.len() && self.cols > 0 { Some((idx / self.cols, idx % self.cols)) } else { None }
    }
}

/// Coerce free-typed dimension text into a grid dimension.
///
/// Numbers are truncated toward zero. Empty, non-numeric, negative and
/// non-finite input all become 0. Results are capped at `MAX_DIMENSION`.
pub fn parse_dimension(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => (value.trunc() as usize).min(MAX_DIMENSION),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(rows: usize, cols: usize) -> GridStore {
        let mut grid = GridStore::new();
        grid.set_dimensions(rows, cols);
        for idx in 0..grid.len() {
            grid.set_cell(idx, Cell { command: Some(format!("cmd{}", idx)), ..Default::default() });
        }
        grid
    }

    #[test]
    fn new_grid_has_rows_times_cols_empty_cells() {
        for (rows, cols) in [(0, 0), (0, 5), (3, 0), (1, 1), (2, 3), (7, 4)] {
            let mut grid = GridStore::new();
            grid.set_dimensions(rows, cols);
            assert_eq!(grid.len(), rows * cols);
            assert!(grid.cells().iter().all(Cell::is_empty));
        }
    }

    #[test]
    fn regenerating_discards_content_even_when_sizes_overlap() {
        let mut grid = filled(2, 2);
        grid.set_dimensions(3, 3);
        assert_eq!(grid.len(), 9);
        assert!(grid.cells().iter().all(|c| *c == Cell::default()));

        let mut same = filled(2, 2);
        same.set_dimensions(2, 2);
        assert!(same.cells().iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn set_cell_keeps_length() {
        let mut grid = GridStore::new();
        grid.set_dimensions(2, 1);
        grid.set_cell(1, Cell { command: Some("ls".into()), ..Default::default() });
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get_cell(1).command.as_deref(), Some("ls"));
        assert!(grid.get_cell(0).is_empty());
    }

    #[test]
    #[should_panic]
    fn get_cell_out_of_bounds_panics() {
        let mut grid = GridStore::new();
        grid.set_dimensions(1, 1);
        let _ = grid.get_cell(1);
    }

    #[test]
    fn index_is_row_major() {
        let mut grid = GridStore::new();
        grid.set_dimensions(2, 3);
        assert_eq!(grid.index_of(0, 0), Some(0));
        assert_eq!(grid.index_of(1, 0), Some(3));
        assert_eq!(grid.index_of(1, 2), Some(5));
        assert_eq!(grid.index_of(2, 0), None);
        assert_eq!(grid.coords_of(4), Some((1, 1)));
        assert_eq!(grid.coords_of(6), None);
    }

    #[test]
    fn parse_dimension_coerces() {
        assert_eq!(parse_dimension("3"), 3);
        assert_eq!(parse_dimension(" 4 "), 4);
        assert_eq!(parse_dimension("2.9"), 2);
        assert_eq!(parse_dimension(""), 0);
        assert_eq!(parse_dimension("abc"), 0);
        assert_eq!(parse_dimension("-2"), 0);
        assert_eq!(parse_dimension("0.5"), 0);
        assert_eq!(parse_dimension("NaN"), 0);
        assert_eq!(parse_dimension("inf"), 0);
        assert_eq!(parse_dimension("100000"), MAX_DIMENSION);
    }
}

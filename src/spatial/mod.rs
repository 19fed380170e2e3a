use glam::IVec2;

/// Grid columns.
pub const GRID_COLS: usize = 3;
/// Grid rows.
pub const GRID_ROWS: usize = 3;
pub const GRID_CELLS: usize = GRID_COLS * GRID_ROWS;

/// Coarse fixed grid over the canvas for collision candidate lookup.
///
/// Each bucket holds up to `CAP` entity indices. With `CAP` equal to the
/// collider population, every entity fits even when all of them share one
/// cell, so nothing is ever dropped.
pub struct SpatialGrid<const CAP: usize> {
    cell_w: i32,
    cell_h: i32,
    buckets: [[usize; CAP]; GRID_CELLS],
    counts: [usize; GRID_CELLS],
    /// Inserts rejected because a bucket was full.
    dropped: usize,
}

impl<const CAP: usize> SpatialGrid<CAP> {
    pub fn new(width: i32, height: i32) -> Self {
        // Round up so the last column/row reaches the canvas edge.
        let cols = GRID_COLS as i32;
        let rows = GRID_ROWS as i32;
        Self {
            cell_w: ((width + cols - 1) / cols).max(1),
            cell_h: ((height + rows - 1) / rows).max(1),
            buckets: [[0; CAP]; GRID_CELLS],
            counts: [0; GRID_CELLS],
            dropped: 0,
        }
    }

    /// Clear all buckets. Call at start of each rebuild.
    pub fn clear(&mut self) {
        self.counts = [0; GRID_CELLS];
        self.dropped = 0;
    }

    /// Cell index for `pos`, clamping off-grid positions to the border cells.
    pub fn cell_of(&self, pos: IVec2) -> usize {
        let cx = (pos.x.div_euclid(self.cell_w)).clamp(0, GRID_COLS as i32 - 1) as usize;
        let cy = (pos.y.div_euclid(self.cell_h)).clamp(0, GRID_ROWS as i32 - 1) as usize;
        cy * GRID_COLS + cx
    }

    /// Insert an entity and return the cell it landed in.
    pub fn insert(&mut self, pos: IVec2, entity_index: usize) -> usize {
        let cell = self.cell_of(pos);
        let count = &mut self.counts[cell];
        if *count < CAP {
            self.buckets[cell][*count] = entity_index;
            *count += 1;
        } else {
            self.dropped += 1;
            log::trace!("grid bucket {cell} full, dropping entity {entity_index}");
        }
        cell
    }

    pub fn bucket(&self, cell: usize) -> &[usize] {
        &self.buckets[cell][..self.counts[cell]]
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Visit all entities in `cell` and its 8 neighbours, clipped at the
    /// grid edges. Cells are visited row by row, buckets in insertion order.
    pub fn query_neighbors(&self, cell: usize, mut callback: impl FnMut(usize)) {
        let cx = (cell % GRID_COLS) as i32;
        let cy = (cell / GRID_COLS) as i32;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let (nx, ny) = (cx + dx, cy + dy);
                if nx < 0 || ny < 0 || nx >= GRID_COLS as i32 || ny >= GRID_ROWS as i32 {
                    continue;
                }
                for &entity_index in self.bucket(ny as usize * GRID_COLS + nx as usize) {
                    callback(entity_index);
                }
            }
        }
    }

    /// Whether `pos` lies in the spatial extent of `cell`. Border cells
    /// extend outward to cover clamped positions.
    #[cfg(test)]
    pub fn cell_contains(&self, cell: usize, pos: IVec2) -> bool {
        let cx = (cell % GRID_COLS) as i32;
        let cy = (cell / GRID_COLS) as i32;
        let x_ok = (cx == 0 || pos.x >= cx * self.cell_w)
            && (cx == GRID_COLS as i32 - 1 || pos.x < (cx + 1) * self.cell_w);
        let y_ok = (cy == 0 || pos.y >= cy * self.cell_h)
            && (cy == GRID_ROWS as i32 - 1 || pos.y < (cy + 1) * self.cell_h);
        x_ok && y_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let mut grid: SpatialGrid<4> = SpatialGrid::new(144, 168);
        grid.insert(IVec2::new(10, 10), 0);
        grid.insert(IVec2::new(60, 70), 1);
        grid.insert(IVec2::new(140, 160), 2);

        let mut found = Vec::new();
        grid.query_neighbors(grid.cell_of(IVec2::new(5, 5)), |idx| found.push(idx));

        assert_eq!(found, [0, 1]);
    }

    #[test]
    fn clear_and_reuse() {
        let mut grid: SpatialGrid<4> = SpatialGrid::new(144, 168);
        let cell = grid.insert(IVec2::new(50, 50), 3);
        grid.clear();

        let mut found = Vec::new();
        grid.query_neighbors(cell, |idx| found.push(idx));
        assert!(found.is_empty());
    }

    #[test]
    fn cells_cover_canvas_and_clamp_edges() {
        let grid: SpatialGrid<1> = SpatialGrid::new(144, 168);
        assert_eq!(grid.cell_of(IVec2::new(0, 0)), 0);
        assert_eq!(grid.cell_of(IVec2::new(144, 168)), GRID_CELLS - 1);
        assert_eq!(grid.cell_of(IVec2::new(-5, 80)), 3);
        assert_eq!(grid.cell_of(IVec2::new(200, -3)), 2);
        assert_eq!(grid.cell_of(IVec2::new(48, 56)), 4);
    }

    #[test]
    fn worst_case_capacity_drops_nothing() {
        let mut grid: SpatialGrid<8> = SpatialGrid::new(144, 168);
        for i in 0..8 {
            grid.insert(IVec2::new(70, 80), i);
        }
        assert_eq!(grid.bucket(4).len(), 8);
        assert_eq!(grid.dropped(), 0);

        grid.insert(IVec2::new(70, 80), 8);
        assert_eq!(grid.dropped(), 1);
    }

    #[test]
    fn every_position_lands_in_a_containing_cell() {
        let mut grid: SpatialGrid<1> = SpatialGrid::new(144, 168);
        for y in (0..=168).step_by(7) {
            for x in (0..=144).step_by(5) {
                grid.clear();
                let pos = IVec2::new(x, y);
                let cell = grid.insert(pos, 0);
                assert!(grid.cell_contains(cell, pos), "{pos} not in cell {cell}");
                let holders = (0..GRID_CELLS)
                    .filter(|&c| grid.cell_contains(c, pos))
                    .count();
                assert_eq!(holders, 1);
            }
        }
    }

    #[test]
    fn corner_query_is_clipped() {
        let mut grid: SpatialGrid<2> = SpatialGrid::new(144, 168);
        grid.insert(IVec2::new(140, 160), 7);
        grid.insert(IVec2::new(5, 160), 9);

        let mut found = Vec::new();
        grid.query_neighbors(0, |idx| found.push(idx));
        assert!(found.is_empty());

        grid.query_neighbors(GRID_CELLS - 1, |idx| found.push(idx));
        assert_eq!(found, [7]);
    }
}

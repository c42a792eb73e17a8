use glam::Vec3;

/// Copy of a boid's kinematic state taken at the start of a tick.
/// Every boid steers from the same snapshot so update order never matters.
#[derive(Debug, Clone, Copy)]
pub struct BoidSnapshot {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Spatial hash grid for neighbor queries in 3D.
///
/// Cell size should be at least the largest perception radius so a query
/// of the 27 surrounding cells sees every neighbor in range.
/// Uses multiplicative hash for even distribution.
pub struct SpatialHash {
    inv_cell_size: f32,
    table_size: usize,
    /// Each bucket holds snapshot indices. Pre-allocated, cleared each tick.
    buckets: Vec<Vec<u32>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        let table_size = table_size.max(1);
        let mut buckets = Vec::with_capacity(table_size);
        for _ in 0..table_size {
            buckets.push(Vec::with_capacity(4));
        }
        Self {
            inv_cell_size: 1.0 / cell_size.max(f32::EPSILON),
            table_size,
            buckets,
        }
    }

    /// Clear all buckets. Call at start of each rebuild.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear(); // Keeps allocation.
        }
    }

    /// Insert an index at the given position.
    pub fn insert(&mut self, pos: Vec3, index: u32) {
        let hash = self.hash(pos);
        self.buckets[hash].push(index);
    }

    /// Query the cell containing `pos` and its 26 neighbors.
    /// Each stored index is reported at most once even when cells collide
    /// in the table.
    pub fn query_neighbors(&self, pos: Vec3, mut callback: impl FnMut(u32)) {
        let (cx, cy, cz) = self.cell_coords(pos);
        let mut visited = [usize::MAX; 27];
        let mut n = 0;
        for dz in -1i32..=1 {
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let hash = self.hash_cell(
                        cx.wrapping_add(dx),
                        cy.wrapping_add(dy),
                        cz.wrapping_add(dz),
                    );
                    if visited[..n].contains(&hash) {
                        continue;
                    }
                    visited[n] = hash;
                    n += 1;
                    for &index in &self.buckets[hash] {
                        callback(index);
                    }
                }
            }
        }
    }

    fn cell_coords(&self, pos: Vec3) -> (i32, i32, i32) {
        let c = (pos * self.inv_cell_size).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }

    fn hash(&self, pos: Vec3) -> usize {
        let (cx, cy, cz) = self.cell_coords(pos);
        self.hash_cell(cx, cy, cz)
    }

    fn hash_cell(&self, cx: i32, cy: i32, cz: i32) -> usize {
        let h = (cx as u32).wrapping_mul(73_856_093)
            ^ (cy as u32).wrapping_mul(19_349_663)
            ^ (cz as u32).wrapping_mul(83_492_791);
        (h as usize) % self.table_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let mut grid = SpatialHash::new(6.0, 256);
        grid.insert(Vec3::new(1.0, 1.0, 1.0), 0);
        grid.insert(Vec3::new(5.0, -2.0, 3.0), 1);
        grid.insert(Vec3::new(90.0, 90.0, 90.0), 2);

        let mut found = Vec::new();
        grid.query_neighbors(Vec3::new(2.0, 0.0, 2.0), |idx| found.push(idx));

        assert!(found.contains(&0));
        assert!(found.contains(&1));
    }

    #[test]
    fn colliding_cells_report_once() {
        // A one-bucket table forces every cell onto the same bucket.
        let mut grid = SpatialHash::new(1.0, 1);
        grid.insert(Vec3::ZERO, 7);

        let mut found = Vec::new();
        grid.query_neighbors(Vec3::ZERO, |idx| found.push(idx));
        assert_eq!(found, vec![7]);
    }

    #[test]
    fn clear_and_reuse() {
        let mut grid = SpatialHash::new(6.0, 256);
        grid.insert(Vec3::splat(3.0), 42);
        grid.clear();

        let mut found = Vec::new();
        grid.query_neighbors(Vec3::splat(3.0), |idx| found.push(idx));
        assert!(found.is_empty());
    }
}

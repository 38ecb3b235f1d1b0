//! Static uniform grid over points.
//!
//! [`StaticGrid3`] buckets `(point, value)` pairs into the cells of a regular
//! grid covering their bounding box. The grid is built once and is read-only
//! afterwards, so it can be queried concurrently.
//!
//! Storage is a single array of entries sorted by cell index, plus one offset
//! per cell pointing at the first entry of that cell.

use nalgebra::{Point3, Vector3};

use super::bbox::BoundingBox;
use super::sphere::Sphere;

/// Integer cell coordinates.
pub type CellPos = [usize; 3];

/// A value stored in the grid, with the point it was inserted at.
#[derive(Debug, Clone)]
pub struct GridEntry<T> {
    /// The position of the value.
    pub point: Point3<f64>,
    /// The stored value.
    pub value: T,
    cell: usize,
}

/// A static uniform grid in 3D.
#[derive(Debug, Clone)]
pub struct StaticGrid3<T> {
    bbox: BoundingBox,
    sizes: CellPos,
    cell_lengths: Vector3<f64>,
    entries: Vec<GridEntry<T>>,
    cell_start: Vec<usize>,
}

/// Cell resolution for `n` elements spread over a box with the given extent.
///
/// Targets about one cell per element, with cells as close to cubic as the
/// extent allows. Axes shorter than `1e-4` of the diagonal get a single cell.
pub fn best_grid_size(lengths: &Vector3<f64>, n: usize) -> CellPos {
    let mut sizes = [1usize; 3];
    let diag = lengths.norm();
    let eps = diag * 1e-4;

    if n == 0 || !lengths.iter().all(|&l| l > 0.0) {
        return sizes;
    }

    let ncell = n as f64;
    let thin: Vec<bool> = lengths.iter().map(|&l| l < eps).collect();
    let wide = thin.iter().filter(|&&t| !t).count();

    if wide == 3 {
        let product = lengths.x * lengths.y * lengths.z;
        let k = (ncell / product).powf(1.0 / 3.0);
        for i in 0..3 {
            sizes[i] = (lengths[i] * k) as usize;
        }
    } else if wide == 1 {
        // One cell per element along the only extended axis
        for i in 0..3 {
            if !thin[i] {
                sizes[i] = n;
            }
        }
    } else {
        for i in 0..3 {
            if thin[i] {
                sizes[i] = 1;
            } else {
                let product: f64 = (0..3)
                    .filter(|&j| j != i && !thin[j])
                    .map(|j| lengths[j])
                    .product();
                sizes[i] = (ncell * lengths[i] / product).powf(1.0 / wide as f64) as usize;
            }
        }
    }

    for s in &mut sizes {
        *s = (*s).max(1);
    }
    sizes
}

impl<T> StaticGrid3<T> {
    /// Build a grid from `(point, value)` pairs.
    ///
    /// The grid box is the bounding box of the points inflated by
    /// `diagonal / n` on every side.
    pub fn new(items: impl IntoIterator<Item = (Point3<f64>, T)>) -> Self {
        let items: Vec<(Point3<f64>, T)> = items.into_iter().collect();
        let n = items.len();

        let mut bbox = BoundingBox::from_points(items.iter().map(|(p, _)| p));
        let sizes = if n > 0 {
            bbox.inflate(bbox.diagonal() / n as f64);
            best_grid_size(&bbox.size(), n)
        } else {
            [1, 1, 1]
        };
        let size = bbox.size();
        let cell_lengths = Vector3::new(
            size.x / sizes[0] as f64,
            size.y / sizes[1] as f64,
            size.z / sizes[2] as f64,
        );

        let mut grid = Self {
            bbox,
            sizes,
            cell_lengths,
            entries: Vec::with_capacity(n),
            cell_start: Vec::new(),
        };

        for (point, value) in items {
            let cell = grid.index_of_cell(&grid.cell_of(&point));
            grid.entries.push(GridEntry { point, value, cell });
        }
        grid.build();
        grid
    }

    fn build(&mut self) {
        // Stable: values in the same cell keep insertion order
        self.entries.sort_by_key(|e| e.cell);

        let num_cells = self.sizes[0] * self.sizes[1] * self.sizes[2];
        self.cell_start = vec![self.entries.len(); num_cells];
        for (i, e) in self.entries.iter().enumerate().rev() {
            self.cell_start[e.cell] = i;
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the grid stores no value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cells along each axis.
    pub fn cell_numbers(&self) -> CellPos {
        self.sizes
    }

    /// The box covered by the grid.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Length of the diagonal of a cell.
    pub fn cell_diagonal(&self) -> f64 {
        self.cell_lengths.norm()
    }

    /// All stored entries, sorted by cell.
    pub fn iter(&self) -> impl Iterator<Item = &GridEntry<T>> + '_ {
        self.entries.iter()
    }

    /// The cell containing `p`. Points outside the grid map to the nearest
    /// border cell.
    pub fn cell_of(&self, p: &Point3<f64>) -> CellPos {
        let mut c = [0usize; 3];
        for i in 0..3 {
            c[i] = self.cell_coord(i, p[i]);
        }
        c
    }

    fn cell_coord(&self, axis: usize, s: f64) -> usize {
        let last = self.sizes[axis] - 1;
        if !(s > self.bbox.min[axis]) || self.cell_lengths[axis] <= 0.0 {
            return 0;
        }
        if s >= self.bbox.max[axis] {
            return last;
        }
        (((s - self.bbox.min[axis]) / self.cell_lengths[axis]) as usize).min(last)
    }

    fn index_of_cell(&self, c: &CellPos) -> usize {
        (c[0] * self.sizes[1] + c[1]) * self.sizes[2] + c[2]
    }

    /// Entries stored in cell `c`.
    pub fn values_in_cell(&self, c: &CellPos) -> &[GridEntry<T>] {
        let idx = self.index_of_cell(c);
        let start = self.cell_start[idx];
        let end = self.entries[start..]
            .iter()
            .position(|e| e.cell != idx)
            .map_or(self.entries.len(), |off| start + off);
        &self.entries[start..end]
    }

    /// Number of entries stored in cell `c`.
    pub fn count_in_cell(&self, c: &CellPos) -> usize {
        self.values_in_cell(c).len()
    }

    /// Entries of every cell in the inclusive range `first..=last`.
    fn values_in_cells(
        &self,
        first: CellPos,
        last: CellPos,
    ) -> impl Iterator<Item = &GridEntry<T>> + '_ {
        (first[0]..=last[0]).flat_map(move |i| {
            (first[1]..=last[1]).flat_map(move |j| {
                (first[2]..=last[2]).flat_map(move |k| self.values_in_cell(&[i, j, k]).iter())
            })
        })
    }

    /// Entries whose point lies inside `sphere`, in cell order.
    pub fn values_in_sphere(&self, sphere: &Sphere) -> Vec<&GridEntry<T>> {
        if self.is_empty() {
            return Vec::new();
        }
        let bb = sphere.bounding_box();
        self.values_in_cells(self.cell_of(&bb.min), self.cell_of(&bb.max))
            .filter(|e| sphere.is_inside(&e.point))
            .collect()
    }

    /// The entry closest to `p` within `max_dist`, with its distance.
    ///
    /// Searches spheres of doubling radius, starting from one cell diagonal,
    /// until a candidate is found inside the current radius or the whole grid
    /// is covered.
    pub fn closest_value(&self, p: &Point3<f64>, max_dist: f64) -> Option<(&GridEntry<T>, f64)> {
        if self.is_empty() {
            return None;
        }
        let far = (p - self.bbox.min).norm().max((p - self.bbox.max).norm()) + self.bbox.diagonal();
        let limit = max_dist.min(far);
        let mut radius = self.cell_diagonal().min(limit).max(f64::MIN_POSITIVE);

        loop {
            let best = self
                .values_in_sphere(&Sphere::new(*p, radius))
                .into_iter()
                .map(|e| (e, (e.point - p).norm()))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if best.is_some() || radius >= limit {
                return best.filter(|(_, d)| *d <= max_dist);
            }
            radius = (radius * 2.0).min(limit);
        }
    }
}

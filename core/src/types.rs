/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, i.e. `(column, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Moore neighborhood offsets, self excluded, ordered x-major.
pub(crate) const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbors of `center` that fall inside `bounds`, for arrays without a border ring.
pub fn iter_neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&(dx, dy)| {
        let x = center.0.checked_add_signed(dx.try_into().ok()?)?;
        let y = center.1.checked_add_signed(dy.try_into().ok()?)?;
        (x < bounds.0 && y < bounds.1).then_some((x, y))
    })
}

/// Column-major scan over every coordinate of a `size` board.
pub fn iter_coords((x_end, y_end): Coord2) -> impl Iterator<Item = Coord2> {
    (0..x_end).flat_map(move |x| (0..y_end).map(move |y| (x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = iter_neighbors((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors_without_self() {
        let neighbors: Vec<_> = iter_neighbors((1, 1), (3, 3)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn scan_is_column_major() {
        let coords: Vec<_> = iter_coords((2, 2)).collect();
        assert_eq!(coords, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}

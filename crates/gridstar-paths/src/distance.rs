use gridstar_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// With unit step costs and four-way movement this never overestimates the
/// remaining cost, so A* driven by it returns shortest paths.
#[inline]
pub fn manhattan(a: Position, b: Position) -> u32 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(1, 5);
        let b = Position::new(4, 2);
        assert_eq!(manhattan(a, b), 6);
        assert_eq!(manhattan(b, a), 6);
        assert_eq!(manhattan(a, a), 0);
    }
}

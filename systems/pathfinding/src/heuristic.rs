//! Integer distance estimates used to order the search frontier.

use bastion_core::{CellCoord, Heuristic};

/// `weight * (|dx| + |dy|)`.
#[must_use]
pub fn manhattan(from: CellCoord, to: CellCoord, weight: u32) -> u32 {
    weight.saturating_mul(from.manhattan_distance(to))
}

/// `weight * sqrt(dx² + dy²)`, truncated toward zero.
#[must_use]
pub fn euclidean(from: CellCoord, to: CellCoord, weight: u32) -> u32 {
    let dx = u64::from(from.column().abs_diff(to.column()));
    let dy = u64::from(from.row().abs_diff(to.row()));
    let distance = ((dx * dx + dy * dy) as f64).sqrt();
    (f64::from(weight) * distance) as u32
}

/// Evaluates the selected heuristic.
#[must_use]
pub fn estimate(heuristic: Heuristic, from: CellCoord, to: CellCoord, weight: u32) -> u32 {
    match heuristic {
        Heuristic::Manhattan => manhattan(from, to, weight),
        Heuristic::Euclidean => euclidean(from, to, weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_scales_axis_sum() {
        let origin = CellCoord::new(1, 1);
        assert_eq!(manhattan(origin, CellCoord::new(4, 5), 1), 7);
        assert_eq!(manhattan(origin, CellCoord::new(4, 5), 10), 70);
        assert_eq!(manhattan(origin, origin, 10), 0);
    }

    #[test]
    fn euclidean_truncates_after_scaling() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(euclidean(origin, CellCoord::new(1, 1), 1), 1);
        assert_eq!(euclidean(origin, CellCoord::new(1, 1), 10), 14);
        assert_eq!(euclidean(origin, CellCoord::new(3, 4), 10), 50);
        assert_eq!(euclidean(CellCoord::new(2, 0), origin, 3), 6);
    }

    #[test]
    fn estimate_dispatches_on_kind() {
        let from = CellCoord::new(0, 0);
        let to = CellCoord::new(2, 2);
        assert_eq!(estimate(Heuristic::Manhattan, from, to, 10), 40);
        assert_eq!(estimate(Heuristic::Euclidean, from, to, 10), 28);
    }
}

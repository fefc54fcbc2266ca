use crate::ir::{Cell, Level};

/// Highest count among cells that are not in the future.
pub fn max_count(cells: &[Cell]) -> u32 {
    cells
        .iter()
        .filter(|cell| !cell.is_future)
        .map(|cell| cell.count)
        .max()
        .unwrap_or(0)
}

/// Quartile bucket of `count / max`: `(0, .25] -> 1` up to `(.75, 1] -> 4`.
pub fn level_for(count: u32, max: u32) -> u8 {
    if count == 0 || max == 0 {
        return 0;
    }
    let ratio = count as f64 / max as f64;
    if ratio <= 0.25 {
        1
    } else if ratio <= 0.5 {
        2
    } else if ratio <= 0.75 {
        3
    } else {
        4
    }
}

/// Levels relative to the busiest day of this grid; future cells get `None`.
pub fn classify_intensity(cells: &[Cell]) -> Vec<Level> {
    let max = max_count(cells);
    cells
        .iter()
        .map(|cell| {
            if cell.is_future {
                None
            } else {
                Some(level_for(cell.count, max))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(count: u32) -> Cell {
        Cell {
            date: None,
            count,
            is_future: false,
        }
    }

    fn future(count: u32) -> Cell {
        Cell {
            is_future: true,
            ..cell(count)
        }
    }

    #[test]
    fn quartile_boundaries() {
        assert_eq!(level_for(0, 8), 0);
        assert_eq!(level_for(2, 8), 1);
        assert_eq!(level_for(3, 8), 2);
        assert_eq!(level_for(4, 8), 2);
        assert_eq!(level_for(6, 8), 3);
        assert_eq!(level_for(7, 8), 4);
        assert_eq!(level_for(8, 8), 4);
        assert_eq!(level_for(5, 0), 0);
    }

    #[test]
    fn single_active_day_is_top_level() {
        let mut cells = vec![cell(0); 364];
        cells[100] = cell(5);
        let levels = classify_intensity(&cells);
        assert_eq!(levels[100], Some(4));
        assert_eq!(levels.iter().filter(|level| **level == Some(0)).count(), 363);
    }

    #[test]
    fn future_cells_are_masked_and_excluded_from_max() {
        let cells = vec![cell(2), future(100), cell(4)];
        let levels = classify_intensity(&cells);
        assert_eq!(levels, vec![Some(2), None, Some(4)]);
    }

    #[test]
    fn all_zero_grid_is_level_zero() {
        let cells = vec![cell(0); 10];
        assert!(classify_intensity(&cells).iter().all(|level| *level == Some(0)));
    }

    #[test]
    fn monotonic_in_count() {
        let max = 37;
        let mut previous = 0;
        for count in 0..=max {
            let level = level_for(count, max);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn classification_is_repeatable() {
        let cells: Vec<Cell> = (0..50).map(|idx| cell(idx * 7 % 13)).collect();
        assert_eq!(classify_intensity(&cells), classify_intensity(&cells));
    }
}

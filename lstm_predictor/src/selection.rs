//! Score matrix and argmin selection of winning groups

use crate::error::{ForecastError, Result};
use std::collections::HashMap;

/// Explicit `(group, bucket)` address of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub group: usize,
    pub bucket: usize,
}

impl CellId {
    pub fn new(group: usize, bucket: usize) -> Self {
        Self { group, bucket }
    }
}

/// `groups × buckets` validation scores
///
/// Cells are addressed by index, so the matrix can be filled in any order.
/// A `None` cell was excluded from the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    groups: usize,
    buckets: usize,
    cells: Vec<Option<f64>>,
}

impl ScoreMatrix {
    /// Matrix with every cell missing
    pub fn new(groups: usize, buckets: usize) -> Self {
        Self {
            groups,
            buckets,
            cells: vec![None; groups * buckets],
        }
    }

    /// Fully scored matrix from row-major values
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let buckets = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != buckets) {
            return Err(ForecastError::InvalidParameter(
                "All score rows must have the same length".to_string(),
            ));
        }

        let groups = rows.len();
        let cells = rows.into_iter().flatten().map(Some).collect();
        Ok(Self {
            groups,
            buckets,
            cells,
        })
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    pub fn set(&mut self, cell: CellId, score: Option<f64>) -> Result<()> {
        let index = self.index(cell)?;
        self.cells[index] = score;
        Ok(())
    }

    pub fn get(&self, cell: CellId) -> Option<f64> {
        self.index(cell).ok().and_then(|index| self.cells[index])
    }

    /// Scores of one bucket, one entry per group
    pub fn column(&self, bucket: usize) -> Vec<Option<f64>> {
        (0..self.groups)
            .map(|group| self.get(CellId::new(group, bucket)))
            .collect()
    }

    /// Number of excluded cells
    pub fn missing(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    fn index(&self, cell: CellId) -> Result<usize> {
        if cell.group >= self.groups || cell.bucket >= self.buckets {
            return Err(ForecastError::InvalidParameter(format!(
                "Cell ({}, {}) is outside a {}x{} score matrix",
                cell.group, cell.bucket, self.groups, self.buckets
            )));
        }
        Ok(cell.group * self.buckets + cell.bucket)
    }
}

/// Index of the first strict minimum, skipping missing entries
pub fn arg_min(scores: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.iter().enumerate() {
        if let Some(score) = *score {
            match best {
                Some((_, min)) if score >= min => {}
                _ => best = Some((index, score)),
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Winning group of every bucket
///
/// Rows are scanned in ascending order and only a strictly smaller score
/// replaces the current minimum, so ties go to the lowest group. Buckets
/// without any score are left out.
pub fn arg_min_per_column(matrix: &ScoreMatrix) -> Result<Vec<CellId>> {
    if matrix.groups() == 0 || matrix.buckets() == 0 {
        return Err(ForecastError::EmptyMatrix);
    }

    Ok((0..matrix.buckets())
        .filter_map(|bucket| {
            arg_min(&matrix.column(bucket)).map(|group| CellId::new(group, bucket))
        })
        .collect())
}

/// Most frequent value, smallest value on ties, `None` for empty input
pub fn mode_of(indices: &[usize]) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for index in indices {
        *counts.entry(*index).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(value_a, count_a), (value_b, count_b)| {
            count_a.cmp(count_b).then(value_b.cmp(value_a))
        })
        .map(|(value, _)| value)
}

/// Winners of one validation run
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome {
    winners: Vec<CellId>,
}

impl SelectionOutcome {
    pub fn new(winners: Vec<CellId>) -> Self {
        Self { winners }
    }

    pub fn winners(&self) -> &[CellId] {
        &self.winners
    }

    /// Winning group of `bucket`, if that bucket was scored at all
    pub fn winner_for(&self, bucket: usize) -> Option<usize> {
        self.winners
            .iter()
            .find(|cell| cell.bucket == bucket)
            .map(|cell| cell.group)
    }

    /// The group that won the most buckets
    pub fn dominant_group(&self) -> Option<usize> {
        let groups: Vec<usize> = self.winners.iter().map(|cell| cell.group).collect();
        mode_of(&groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_by_two_selection() {
        let matrix = ScoreMatrix::from_rows(vec![vec![1.0, 5.0], vec![2.0, 0.5]]).unwrap();

        assert_eq!(
            arg_min_per_column(&matrix).unwrap(),
            vec![CellId::new(0, 0), CellId::new(1, 1)]
        );
    }

    #[test]
    fn test_unique_minimum_anywhere_in_column() {
        let matrix =
            ScoreMatrix::from_rows(vec![vec![3.0, 0.2], vec![4.0, 0.9], vec![0.1, 0.3]]).unwrap();

        let winners = arg_min_per_column(&matrix).unwrap();
        assert_eq!(winners[0].group, 2);
        assert_eq!(winners[1].group, 0);
    }

    #[test]
    fn test_ties_go_to_lowest_group() {
        let matrix =
            ScoreMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();

        let winners = arg_min_per_column(&matrix).unwrap();
        assert_eq!(winners[0].group, 1);
        assert_eq!(winners[1].group, 0);
    }

    #[test]
    fn test_missing_cells_are_skipped() {
        let mut matrix = ScoreMatrix::new(3, 2);
        matrix.set(CellId::new(1, 0), Some(4.0)).unwrap();
        matrix.set(CellId::new(2, 0), Some(3.0)).unwrap();

        assert_eq!(matrix.missing(), 4);
        assert_eq!(arg_min_per_column(&matrix).unwrap(), vec![CellId::new(2, 0)]);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(matches!(
            arg_min_per_column(&ScoreMatrix::new(0, 4)),
            Err(ForecastError::EmptyMatrix)
        ));
        assert!(matches!(
            arg_min_per_column(&ScoreMatrix::new(2, 0)),
            Err(ForecastError::EmptyMatrix)
        ));
    }

    #[test]
    fn test_out_of_range_cell() {
        let mut matrix = ScoreMatrix::new(1, 1);
        assert!(matrix.set(CellId::new(1, 0), Some(1.0)).is_err());
        assert_eq!(matrix.get(CellId::new(0, 5)), None);
    }

    #[test]
    fn test_arg_min_flat() {
        assert_eq!(arg_min(&[None, Some(2.0), Some(1.0), Some(1.0)]), Some(2));
        assert_eq!(arg_min(&[None, None]), None);
        assert_eq!(arg_min(&[]), None);
    }

    #[test]
    fn test_mode_of() {
        assert_eq!(mode_of(&[3, 1, 3, 2, 1, 3]), Some(3));
        assert_eq!(mode_of(&[4, 2, 2, 4]), Some(2));
        assert_eq!(mode_of(&[]), None);
    }

    #[test]
    fn test_dominant_group() {
        let outcome = SelectionOutcome::new(vec![
            CellId::new(1, 0),
            CellId::new(0, 1),
            CellId::new(1, 2),
        ]);

        assert_eq!(outcome.dominant_group(), Some(1));
        assert_eq!(outcome.winner_for(1), Some(0));
        assert_eq!(outcome.winner_for(3), None);
    }
}

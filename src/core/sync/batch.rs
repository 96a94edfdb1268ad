//! Batch splitting for export units
//!
//! Units are fetched and downloaded in fixed-size batches: one image-URL
//! request per batch, bounded-concurrency downloads within it. Order is
//! preserved end to end so output is deterministic.

use crate::domain::{ExportUnit, FigsyncError, Result};

/// Split export units into fixed-size ordered batches
///
/// Every batch except possibly the last has exactly `batch_size` units, and
/// concatenating the batches reconstructs the input order. Empty input
/// yields zero batches.
///
/// # Errors
///
/// Returns a configuration error if `batch_size` is zero, regardless of
/// input length.
///
/// # Examples
///
/// ```
/// use figsync::core::sync::batch::split_into_batches;
/// use figsync::domain::{ExportUnit, ids::NodeId};
/// use std::str::FromStr;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let units = vec![
///     ExportUnit::new(NodeId::from_str("1:1")?, "a"),
///     ExportUnit::new(NodeId::from_str("1:2")?, "b"),
///     ExportUnit::new(NodeId::from_str("1:3")?, "c"),
/// ];
///
/// let batches = split_into_batches(units, 2)?;
/// assert_eq!(batches.len(), 2);
/// assert_eq!(batches[0].len(), 2);
/// assert_eq!(batches[1].len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn split_into_batches(
    units: Vec<ExportUnit>,
    batch_size: usize,
) -> Result<Vec<Vec<ExportUnit>>> {
    if batch_size == 0 {
        return Err(FigsyncError::Configuration(
            "batch_size must be > 0".to_string(),
        ));
    }

    let mut batches = Vec::with_capacity(units.len().div_ceil(batch_size));
    let mut remaining = units;

    while remaining.len() > batch_size {
        let rest = remaining.split_off(batch_size);
        batches.push(remaining);
        remaining = rest;
    }
    if !remaining.is_empty() {
        batches.push(remaining);
    }

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::NodeId;
    use std::str::FromStr;
    use test_case::test_case;

    fn units(count: usize) -> Vec<ExportUnit> {
        (0..count)
            .map(|i| {
                ExportUnit::new(
                    NodeId::from_str(&format!("1:{i}")).unwrap(),
                    format!("unit-{i}"),
                )
            })
            .collect()
    }

    #[test_case(10, 3, 4; "uneven split")]
    #[test_case(10, 5, 2; "even split")]
    #[test_case(10, 10, 1; "single batch")]
    #[test_case(10, 50, 1; "batch larger than input")]
    #[test_case(1, 1, 1; "single unit")]
    fn test_batch_count(unit_count: usize, batch_size: usize, expected_batches: usize) {
        let batches = split_into_batches(units(unit_count), batch_size).unwrap();
        assert_eq!(batches.len(), expected_batches);
    }

    #[test]
    fn test_batches_preserve_order() {
        let batches = split_into_batches(units(7), 3).unwrap();

        let flattened: Vec<String> = batches
            .iter()
            .flatten()
            .map(|u| u.export_name.clone())
            .collect();

        let expected: Vec<String> = (0..7).map(|i| format!("unit-{i}")).collect();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_all_batches_full_except_last() {
        let batches = split_into_batches(units(11), 4).unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 4);
        assert_eq!(batches[1].len(), 4);
        assert_eq!(batches[2].len(), 3);
    }

    #[test]
    fn test_empty_input_yields_zero_batches() {
        let batches = split_into_batches(Vec::new(), 5).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let result = split_into_batches(units(3), 0);
        assert!(matches!(result, Err(FigsyncError::Configuration(_))));
    }

    #[test]
    fn test_zero_batch_size_rejected_even_for_empty_input() {
        let result = split_into_batches(Vec::new(), 0);
        assert!(matches!(result, Err(FigsyncError::Configuration(_))));
    }
}

//! Block placement lookup.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::BlockPlacement;

/// The first placement covering `date`, in file order.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::DateParse`] if a placement checked
/// before a match has an unknown month name.
///
/// # Example
///
/// ```
/// use rota_engine::calculation::block_for_date;
/// use rota_engine::models::BlockPlacement;
/// use chrono::NaiveDate;
///
/// let blocks = vec![BlockPlacement {
///     block_name: "Neuro".to_string(),
///     start_month: "February".to_string(),
///     start_year: 2025,
///     end_month: "Apr".to_string(),
///     end_year: 2025,
/// }];
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let block = block_for_date(&blocks, date).unwrap().unwrap();
/// assert_eq!(block.block_name, "Neuro");
/// ```
pub fn block_for_date(
    blocks: &[BlockPlacement],
    date: NaiveDate,
) -> EngineResult<Option<&BlockPlacement>> {
    for block in blocks {
        if block.covers(date)? {
            return Ok(Some(block));
        }
    }
    Ok(None)
}

/// Placements ordered by start date.
///
/// Placements starting in the same month keep their file order.
pub fn sorted_blocks(blocks: &[BlockPlacement]) -> EngineResult<Vec<BlockPlacement>> {
    let mut keyed = blocks
        .iter()
        .map(|block| -> EngineResult<(NaiveDate, BlockPlacement)> {
            Ok((block.start_date()?, block.clone()))
        })
        .collect::<EngineResult<Vec<_>>>()?;

    keyed.sort_by_key(|(start, _)| *start);
    Ok(keyed.into_iter().map(|(_, block)| block).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn placement(
        name: &str,
        start_month: &str,
        start_year: i32,
        end_month: &str,
        end_year: i32,
    ) -> BlockPlacement {
        BlockPlacement {
            block_name: name.to_string(),
            start_month: start_month.to_string(),
            start_year,
            end_month: end_month.to_string(),
            end_year,
        }
    }

    fn create_test_blocks() -> Vec<BlockPlacement> {
        vec![
            placement("Neuro", "February", 2025, "April", 2025),
            placement("MSK", "Nov", 2024, "Jan", 2025),
        ]
    }

    #[test]
    fn test_block_for_date_finds_covering_block() {
        let blocks = create_test_blocks();
        let block = block_for_date(&blocks, make_date("2025-01-13")).unwrap();
        assert_eq!(block.unwrap().block_name, "MSK");

        let block = block_for_date(&blocks, make_date("2025-04-30")).unwrap();
        assert_eq!(block.unwrap().block_name, "Neuro");
    }

    #[test]
    fn test_block_for_date_outside_all_blocks() {
        let blocks = create_test_blocks();
        assert!(block_for_date(&blocks, make_date("2025-05-01")).unwrap().is_none());
        assert!(block_for_date(&[], make_date("2025-05-01")).unwrap().is_none());
    }

    #[test]
    fn test_first_matching_block_wins() {
        let blocks = vec![
            placement("Chest", "Jan", 2025, "Mar", 2025),
            placement("Neuro", "Feb", 2025, "Feb", 2025),
        ];
        let block = block_for_date(&blocks, make_date("2025-02-10")).unwrap();
        assert_eq!(block.unwrap().block_name, "Chest");
    }

    #[test]
    fn test_sorted_blocks_are_chronological() {
        let sorted = sorted_blocks(&create_test_blocks()).unwrap();
        let names: Vec<&str> = sorted.iter().map(|b| b.block_name.as_str()).collect();
        assert_eq!(names, vec!["MSK", "Neuro"]);
    }

    #[test]
    fn test_sorted_blocks_rejects_unknown_month() {
        let blocks = vec![placement("Bad", "Smarch", 2025, "May", 2025)];
        assert!(matches!(
            sorted_blocks(&blocks),
            Err(EngineError::DateParse { .. })
        ));
    }
}

use serde::Serialize;

use crate::error::{Result, RollupError};
use crate::summary::classifier::ColumnLayout;
use crate::summary::markers::TOTAL;
use crate::summary::splitter::Sheet;
use crate::summary::tree::SummaryTree;

/// Row totals of the top-level sheet, one per member row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TotalColumn(Vec<String>);

impl TotalColumn {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Read the total column of the top-level sheet, skipping the header and subtotal rows.
pub fn extract_total(sheet: &Sheet) -> Result<TotalColumn> {
    let layout = ColumnLayout::classify(sheet.cols());
    let total = layout
        .total()
        .ok_or_else(|| RollupError::format(TOTAL, sheet.number(), "total column not found"))?;

    let values = layout
        .item_rows(sheet.row_count())
        .map(|row| total[row].clone())
        .collect();
    Ok(TotalColumn::new(values))
}

/// Every level-1 column must carry one item per total entry.
pub fn verify_totals(tree: &SummaryTree) -> Result<()> {
    let totals = tree.total().len();

    for id in tree.roots() {
        let Some(column) = tree.get(*id) else {
            continue;
        };
        if column.items.len() != totals {
            return Err(RollupError::TotalMismatch {
                column: column.name.clone(),
                items: column.items.len(),
                totals,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::tree::Column;

    fn sheet(rows: Vec<Vec<&str>>) -> Sheet {
        Sheet::new(
            1,
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }

    #[test]
    fn test_extract_skips_header_and_subtotals() {
        let sheet = sheet(vec![
            vec!["#1レベル名", "材質", "形状", "寸法", "合計", "上部構造"],
            vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
            vec!["サンプル橋", "SM400A", "PL", "9.0", "40", "40"],
            vec!["サンプル橋", "小計", "", "", "206", "206"],
        ]);

        let total = extract_total(&sheet).unwrap();
        assert_eq!(total.values(), ["166", "40"]);
        assert_eq!(total.get(1), Some("40"));
        assert_eq!(total.get(2), None);
    }

    #[test]
    fn test_extract_requires_total_column() {
        let sheet = sheet(vec![
            vec!["#1レベル名", "材質", "上部構造"],
            vec!["サンプル橋", "SMA490BW", "166"],
        ]);

        assert!(matches!(
            extract_total(&sheet),
            Err(RollupError::Format { sheet: 1, .. })
        ));
    }

    #[test]
    fn test_verify_totals() {
        let mut tree = SummaryTree::new();
        let mut column = Column::new("上部構造", 1, "サンプル橋");
        column.items.push(crate::summary::tree::Item {
            value: "166".to_string(),
            properties: Default::default(),
        });
        tree.insert(column, None).unwrap();

        tree.set_total(TotalColumn::new(vec!["166".to_string()]));
        assert!(verify_totals(&tree).is_ok());

        tree.set_total(TotalColumn::new(vec!["166".to_string(), "40".to_string()]));
        assert!(matches!(
            verify_totals(&tree),
            Err(RollupError::TotalMismatch { items: 1, totals: 2, .. })
        ));
    }
}

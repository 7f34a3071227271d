//! Category tree and bounds display formatting

use crate::models::RowKind;
use crate::services::{CategoryTree, InputBounds};

/// Format the selectable tree, one category per block
pub fn format_category_tree(tree: &CategoryTree) -> String {
    if tree.is_empty() {
        return "No categories with records found.".to_string();
    }

    let mut output = String::new();
    let rows = tree.rows();

    for (i, row) in rows.iter().enumerate() {
        match row.kind {
            RowKind::Aggregate | RowKind::Header => {
                if i > 0 {
                    output.push('\n');
                }
                let ids: Vec<String> = row
                    .subcategory_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                output.push_str(&format!(
                    "{} [{}] ({})\n",
                    row.label,
                    row.category_id,
                    ids.join(" ")
                ));
            }
            RowKind::Leaf => {
                let is_last = rows
                    .get(i + 1)
                    .map_or(true, |next| next.kind != RowKind::Leaf);
                let prefix = if is_last { "└── " } else { "├── " };
                let id = row
                    .subcategory_ids
                    .first()
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                output.push_str(&format!("  {}{} ({})\n", prefix, row.label, id));
            }
        }
    }

    output
}

/// Format input bounds and the default range
pub fn format_bounds(bounds: &InputBounds) -> String {
    format!(
        "First month:   {}\nLast month:    {}\nDefault range: {}\n",
        bounds.min, bounds.max, bounds.default_range
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialBalance;
    use crate::store::memory::tests::sample_store;

    #[test]
    fn test_format_category_tree() {
        let tree = CategoryTree::load(&sample_store(), &InitialBalance::default()).unwrap();
        let text = format_category_tree(&tree);

        assert!(text.starts_with("Empresa [cat-2] (sub-20)\n"));
        assert!(text.contains("Vivienda [cat-1] (sub-10 sub-11)\n"));
        assert!(text.contains("  ├── Alquiler (sub-10)\n"));
        assert!(text.contains("  └── Luz (sub-11)\n"));
        assert!(!text.contains("Saldo inicial"));
    }

    #[test]
    fn test_format_empty_tree() {
        assert_eq!(
            format_category_tree(&CategoryTree::default()),
            "No categories with records found."
        );
    }

    #[test]
    fn test_format_bounds() {
        let bounds = InputBounds::load(&sample_store(), &InitialBalance::default())
            .unwrap()
            .unwrap();
        let text = format_bounds(&bounds);
        assert!(text.contains("First month:   2022-12"));
        assert!(text.contains("Default range: 2023-01..2023-04"));
    }
}

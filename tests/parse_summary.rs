use std::fs;
use std::path::PathBuf;

use encoding_rs::SHIFT_JIS;
use tempfile::TempDir;

use rollup_sheet::RollupError;
use rollup_sheet::config::{ParseOptions, ReadOptions};
use rollup_sheet::grid::RectGrid;
use rollup_sheet::summary::{Properties, SummaryTree, parse_file, parse_grid, project_level};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/rollup_sample.csv")
}

fn sample_tree() -> SummaryTree {
    parse_file(fixture_path(), &ReadOptions::utf8(), &ParseOptions::default()).unwrap()
}

fn names(tree: &SummaryTree) -> Vec<String> {
    tree.descendants()
        .into_iter()
        .map(|id| tree.get(id).unwrap().name.clone())
        .collect()
}

#[test]
fn test_single_top_level_sheet() {
    let grid = RectGrid::from_cells(vec![
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "上部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
        vec!["サンプル橋", "小計", "", "", "166", "166"],
    ]);
    let tree = parse_grid(&grid, &ParseOptions::default()).unwrap();

    assert_eq!(tree.len(), 1);
    let root = tree.get(tree.roots()[0]).unwrap();
    assert_eq!(root.name, "上部構造");
    assert_eq!(root.level, 1);
    assert_eq!(root.items.len(), 1);
    assert_eq!(root.items[0].value, "166");
    assert_eq!(
        root.items[0].properties,
        Properties::new("SMA490BW", "PL", "19.0")
    );
    assert_eq!(tree.total().values(), ["166"]);
}

#[test]
fn test_missing_parent_is_named() {
    let grid = RectGrid::from_cells(vec![
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "下部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
        vec!["#2レベル名", "材質", "形状", "寸法", "合計", "主桁"],
        vec!["上部構造", "SMA490BW", "PL", "19.0", "166", "166"],
    ]);

    match parse_grid(&grid, &ParseOptions::default()) {
        Err(RollupError::ReferentialIntegrity {
            level_name, level, ..
        }) => {
            assert_eq!(level_name, "上部構造");
            assert_eq!(level, 1);
        }
        other => panic!("expected a referential integrity error, got {:?}", other),
    }
}

#[test]
fn test_sample_file_structure() {
    let tree = sample_tree();

    assert_eq!(tree.root_name(), Some("サンプル橋"));
    assert_eq!(
        names(&tree),
        ["上部構造", "主構造", "主桁", "横桁", "付属物", "排水装置", "取付金具"]
    );
    assert_eq!(tree.levels(), [1, 2, 3, 4]);
    assert_eq!(tree.columns_at(3).len(), 3);

    let fitting = tree.find(4, "取付金具").unwrap();
    let column = tree.get(fitting).unwrap();
    assert_eq!(column.level_name, "排水装置");
    assert_eq!(column.items.len(), 1);
    assert_eq!(column.items[0].value, "58");
    assert_eq!(
        column.items[0].properties,
        Properties::new("SM400A", "L", "75x75x9")
    );
}

#[test]
fn test_every_child_points_at_its_named_parent() {
    let tree = sample_tree();

    for id in tree.descendants() {
        let column = tree.get(id).unwrap();
        match tree.parent(id) {
            Some(parent_id) => {
                let parent = tree.get(parent_id).unwrap();
                assert_eq!(parent.level, column.level - 1);
                assert_eq!(parent.name, column.level_name);
                assert!(tree.children(parent_id).contains(&id));
            }
            None => assert_eq!(column.level, 1),
        }
    }
}

#[test]
fn test_subtotal_rows_are_excluded() {
    let tree = sample_tree();

    assert_eq!(tree.total().values(), ["166", "240", "58"]);
    for id in tree.roots() {
        assert_eq!(tree.get(*id).unwrap().items.len(), tree.total().len());
    }
    for id in tree.descendants() {
        let column = tree.get(id).unwrap();
        assert!(column.items.iter().all(|item| item.properties.material != "小計"));
    }
}

#[test]
fn test_cells_are_trimmed_and_blanks_kept() {
    let tree = sample_tree();
    let main = tree.get(tree.find(2, "主構造").unwrap()).unwrap();

    let values: Vec<&str> = main.items.iter().map(|item| item.value.as_str()).collect();
    assert_eq!(values, ["120", "240", ""]);
    assert_eq!(main.items[0].properties.dimension, "19.0");
}

#[test]
fn test_parsing_is_repeatable() {
    assert_eq!(sample_tree(), sample_tree());
}

#[test]
fn test_shift_jis_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("総括表.csv");
    let text = fs::read_to_string(fixture_path()).unwrap();
    let (bytes, _, had_errors) = SHIFT_JIS.encode(&text);
    assert!(!had_errors);
    fs::write(&path, &bytes).unwrap();

    let tree = parse_file(&path, &ReadOptions::default(), &ParseOptions::default()).unwrap();
    assert_eq!(tree, sample_tree());
}

#[test]
fn test_utf8_bom_overrides_fallback_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom.csv");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend(fs::read(fixture_path()).unwrap());
    fs::write(&path, bytes).unwrap();

    let tree = parse_file(&path, &ReadOptions::default(), &ParseOptions::default()).unwrap();
    assert_eq!(names(&tree), names(&sample_tree()));
}

#[test]
fn test_blank_rows_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank_rows.csv");
    let mut text = String::new();
    for (index, line) in fs::read_to_string(fixture_path()).unwrap().lines().enumerate() {
        text.push_str(line);
        text.push('\n');
        match index {
            1 => text.push_str(", , , , ,\n"),
            6 => text.push('\n'),
            9 => text.push_str(",,,,,,\n"),
            _ => {}
        }
    }
    fs::write(&path, text).unwrap();

    let tree = parse_file(&path, &ReadOptions::utf8(), &ParseOptions::default()).unwrap();
    assert_eq!(tree, sample_tree());
    assert_eq!(tree.total().values(), ["166", "240", "58"]);
}

#[test]
fn test_file_access_errors() {
    let dir = TempDir::new().unwrap();

    let missing = parse_file(
        dir.path().join("missing.csv"),
        &ReadOptions::utf8(),
        &ParseOptions::default(),
    );
    assert!(matches!(missing, Err(RollupError::FileAccess { .. })));

    let text_file = dir.path().join("summary.txt");
    fs::copy(fixture_path(), &text_file).unwrap();
    let wrong_extension = parse_file(&text_file, &ReadOptions::utf8(), &ParseOptions::default());
    assert!(matches!(wrong_extension, Err(RollupError::FileAccess { .. })));

    let directory = parse_file(dir.path(), &ReadOptions::utf8(), &ParseOptions::default());
    assert!(matches!(directory, Err(RollupError::FileAccess { .. })));
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let result = parse_file(&path, &ReadOptions::utf8(), &ParseOptions::default());
    assert!(matches!(result, Err(RollupError::EmptyInput { path: Some(_) })));
}

#[test]
fn test_first_row_must_be_a_header() {
    let grid = RectGrid::from_cells(vec![
        vec!["鋼材重量総括表", "", "", "", "", ""],
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "上部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
    ]);

    match parse_grid(&grid, &ParseOptions::default()) {
        Err(RollupError::Format { cell, sheet, .. }) => {
            assert_eq!(cell, "A1");
            assert_eq!(sheet, 1);
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_sheets_out_of_level_order() {
    let grid = RectGrid::from_cells(vec![
        vec!["#2レベル名", "材質", "形状", "寸法", "合計", "主桁"],
        vec!["上部構造", "SMA490BW", "PL", "19.0", "166", "166"],
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "上部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
    ]);
    let tree = parse_grid(&grid, &ParseOptions::default()).unwrap();

    let girder = tree.find(2, "主桁").unwrap();
    assert_eq!(tree.parent(girder), tree.find(1, "上部構造"));
    assert_eq!(tree.total().values(), ["166"]);
}

#[test]
fn test_total_mismatch() {
    let grid = RectGrid::from_cells(vec![
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "上部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "166", "166"],
        vec!["サンプル橋", "SM400A", "L", "75x75x9", "58", "58"],
        vec!["#1レベル名", "材質", "形状", "寸法", "合計", "下部構造"],
        vec!["サンプル橋", "SMA490BW", "PL", "19.0", "30", "30"],
    ]);

    match parse_grid(&grid, &ParseOptions::default()) {
        Err(RollupError::TotalMismatch {
            column,
            items,
            totals,
        }) => {
            assert_eq!(column, "下部構造");
            assert_eq!(items, 1);
            assert_eq!(totals, 2);
        }
        other => panic!("expected a total mismatch, got {:?}", other),
    }

    let options = ParseOptions {
        verify_totals: false,
        ..ParseOptions::default()
    };
    let tree = parse_grid(&grid, &options).unwrap();
    assert_eq!(tree.roots().len(), 2);
}

#[test]
fn test_max_level_rejects_deeper_sheets() {
    let options = ParseOptions::default().with_max_level(3);
    let result = parse_file(fixture_path(), &ReadOptions::utf8(), &options);
    assert!(matches!(result, Err(RollupError::Format { .. })));
}

#[test]
fn test_level_three_table() {
    let table = project_level(&sample_tree(), 3);

    assert_eq!(table.title, "サンプル橋");
    assert_eq!(table.columns, ["主桁", "横桁", "排水装置"]);

    let values: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row.values.iter().map(String::as_str).collect())
        .collect();
    assert_eq!(
        values,
        [vec!["80", "40", "46"], vec!["240", "", ""], vec!["", "", "58"]]
    );

    let totals: Vec<&str> = table.rows.iter().map(|row| row.total.as_str()).collect();
    assert_eq!(totals, ["166", "240", "58"]);
}

#[test]
fn test_merge_sibling_columns() {
    let mut tree = sample_tree();
    let main = tree.find(2, "主構造").unwrap();
    let attachments = tree.find(2, "付属物").unwrap();

    tree.merge_columns(main, attachments).unwrap();

    assert!(tree.get(attachments).is_none());
    assert_eq!(tree.columns_at(2), [main]);
    let children: Vec<&str> = tree
        .children(main)
        .iter()
        .map(|id| tree.get(*id).unwrap().name.as_str())
        .collect();
    assert_eq!(children, ["主桁", "横桁", "排水装置"]);

    let drain = tree.find(3, "排水装置").unwrap();
    assert_eq!(tree.parent(drain), Some(main));
    assert_eq!(tree.get(drain).unwrap().level_name, "付属物");
    assert_eq!(tree.len(), 6);

    let girder = tree.find(3, "主桁").unwrap();
    assert!(matches!(
        tree.merge_columns(main, girder),
        Err(RollupError::InvalidMerge(_))
    ));
}

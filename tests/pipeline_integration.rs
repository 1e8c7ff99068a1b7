//! End-to-end pipeline tests
//!
//! Split a dataset on disk, play the external training loop by writing
//! `miss_<i>.csv` for every test fold, then summarize.

use approx::assert_relative_eq;
use foldeval::config::{parse_config, RunSpec};
use foldeval::eval::{MissRecordAggregator, MissTable, RecordKind, Summary};
use foldeval::pipeline::{
    run_split, run_summary, AGGREGATE_FILE, CROSSTAB_FILE, ROC_FIGURE, SCATTER_FIGURE,
    SUMMARY_FILE,
};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

fn write_dataset(dir: &TempDir, rows: &[(String, String, String)]) -> std::path::PathBuf {
    let path = dir.path().join("labels.csv");
    let mut csv = String::from("image,label,subject\n");
    for (image, label, subject) in rows {
        csv.push_str(&format!("{image},{label},{subject}\n"));
    }
    std::fs::write(&path, csv).unwrap();
    path
}

fn run_spec(dir: &TempDir, dataset: &Path, mode: &str, n_splits: usize, grouped: bool) -> RunSpec {
    let group = if grouped { "subject" } else { "None" };
    let yaml = format!(
        r#"
dataset:
  path: {}
  columns:
    filename: image
    label: label
    group: {group}
task:
  mode: {mode}
split:
  n_splits: {n_splits}
  shuffle: true
  seed: 7
  output_dir: {}
summary:
  miss_dir: {}
  output_dir: {}
"#,
        dataset.display(),
        dir.path().join("dataset").display(),
        dir.path().join("miss").display(),
        dir.path().join("summary").display(),
    );
    parse_config(&yaml, &dir.path().join("run.yaml")).unwrap()
}

/// (filename, class) pairs from a class-column fold file
fn read_class_fold(path: &Path) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.unwrap();
        for (col, cell) in record.iter().enumerate() {
            if !cell.is_empty() {
                rows.push((cell.to_string(), headers[col].to_string()));
            }
        }
    }
    rows
}

/// (filename, target) pairs from a regression fold file
fn read_target_fold(path: &Path) -> Vec<(String, f64)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].parse().unwrap())
        })
        .collect()
}

fn one_hot(class: usize, n: usize) -> Vec<f64> {
    (0..n).map(|i| if i == class { 1.0 } else { 0.0 }).collect()
}

// =============================================================================
// Binary
// =============================================================================

/// Ten subjects of two images; subjects alternate benign/malignant
fn binary_rows() -> Vec<(String, String, String)> {
    (0..20)
        .map(|i| {
            let label = if (i / 2) % 2 == 0 { "benign" } else { "malignant" };
            (format!("img_{i}.png"), label.to_string(), format!("s{}", i / 2))
        })
        .collect()
}

fn binary_score(filename: &str, class: usize) -> f64 {
    match filename {
        "img_0.png" => 0.7,
        "img_2.png" => 0.1,
        _ if class == 1 => 0.9,
        _ => 0.2,
    }
}

#[test]
fn test_binary_split_then_summarize() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, &binary_rows());
    let spec = run_spec(&dir, &dataset, "binary", 5, true);

    let split = run_split(&spec).unwrap();
    assert_eq!(split.n_samples, 20);
    assert_eq!(split.n_groups, 10);
    assert_eq!(split.n_classes, 2);
    assert_eq!(split.folds.len(), 5);

    let names = vec!["benign".to_string(), "malignant".to_string()];
    let aggregator = MissRecordAggregator::new(&spec.summary.miss_dir, RecordKind::Classification);
    let mut fold_of_subject: HashMap<String, usize> = HashMap::new();
    let mut seen = 0;

    for fold in &split.folds {
        let rows = read_class_fold(&fold.files.test);
        assert_eq!(rows.len(), fold.n_test);
        seen += rows.len();

        let mut paths = Vec::new();
        let mut scores = Vec::new();
        let mut truth = Vec::new();
        for (filename, label) in rows {
            let index: usize = filename
                .trim_start_matches("img_")
                .trim_end_matches(".png")
                .parse()
                .unwrap();
            let subject = format!("s{}", index / 2);
            let previous = fold_of_subject.insert(subject, fold.index);
            assert!(previous.map_or(true, |f| f == fold.index), "{filename} split from its subject");

            let class = names.iter().position(|n| *n == label).unwrap();
            let s = binary_score(&filename, class);
            paths.push(format!("data/images/{filename}"));
            scores.push(vec![1.0 - s, s]);
            truth.push(one_hot(class, 2));
        }
        let table = MissTable::from_classification(&paths, &scores, &truth, &names).unwrap();
        aggregator.write_fold(fold.index, &table).unwrap();
    }
    assert_eq!(seen, 20);

    let report = run_summary(&spec, Some(5)).unwrap();
    assert_eq!(report.n_records, 20);
    assert_eq!(report.misses, 2);

    let out = &spec.summary.output_dir;
    for name in [AGGREGATE_FILE, CROSSTAB_FILE, SUMMARY_FILE, ROC_FIGURE] {
        assert!(out.join(name).exists(), "{name} missing");
    }
    let aggregate = std::fs::read_to_string(out.join(AGGREGATE_FILE)).unwrap();
    assert_eq!(aggregate.lines().count(), 21);
    assert!(!aggregate.contains("data/images"));

    let Summary::Binary(binary) = report.summary else {
        panic!("expected a binary summary");
    };
    assert_eq!(binary.positive_class, "malignant");
    assert_relative_eq!(binary.auc.point, 0.9, epsilon = 1e-12);
    assert_relative_eq!(binary.sensitivity.point, 0.9, epsilon = 1e-12);
    assert_relative_eq!(binary.specificity.point, 0.9, epsilon = 1e-12);
    assert!(binary.auc.lower < 0.9 && binary.auc.upper <= 1.0);
}

#[test]
fn test_summary_scans_directory_without_fold_count() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, &binary_rows());
    let spec = run_spec(&dir, &dataset, "binary", 2, true);
    let split = run_split(&spec).unwrap();

    let names = vec!["benign".to_string(), "malignant".to_string()];
    let aggregator = MissRecordAggregator::new(&spec.summary.miss_dir, RecordKind::Classification);
    for fold in &split.folds {
        let rows = read_class_fold(&fold.files.test);
        let paths: Vec<&str> = rows.iter().map(|(f, _)| f.as_str()).collect();
        let classes: Vec<usize> = rows
            .iter()
            .map(|(_, l)| names.iter().position(|n| n == l).unwrap())
            .collect();
        let scores: Vec<Vec<f64>> = classes.iter().map(|&c| one_hot(c, 2)).collect();
        let table = MissTable::from_classification(&paths, &scores, &scores, &names).unwrap();
        aggregator.write_fold(fold.index, &table).unwrap();
    }

    let report = run_summary(&spec, None).unwrap();
    assert_eq!(report.n_records, 20);
    assert_eq!(report.misses, 0);
}

// =============================================================================
// Categorical
// =============================================================================

#[test]
fn test_categorical_split_then_summarize() {
    let dir = TempDir::new().unwrap();
    let rows: Vec<_> = (0..18)
        .map(|i| {
            let label = ["a", "b", "c"][(i / 2) % 3];
            (format!("img_{i}.png"), label.to_string(), format!("s{}", i / 2))
        })
        .collect();
    let dataset = write_dataset(&dir, &rows);
    let spec = run_spec(&dir, &dataset, "categorical", 3, true);

    let split = run_split(&spec).unwrap();
    assert_eq!(split.n_classes, 3);

    let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let aggregator = MissRecordAggregator::new(&spec.summary.miss_dir, RecordKind::Classification);
    for fold in &split.folds {
        let rows = read_class_fold(&fold.files.test);
        let paths: Vec<&str> = rows.iter().map(|(f, _)| f.as_str()).collect();
        let truth: Vec<Vec<f64>> = rows
            .iter()
            .map(|(_, l)| one_hot(names.iter().position(|n| n == l).unwrap(), 3))
            .collect();
        let scores: Vec<Vec<f64>> = rows
            .iter()
            .zip(&truth)
            .map(|((f, _), t)| if f == "img_0.png" { one_hot(1, 3) } else { t.clone() })
            .collect();
        let table = MissTable::from_classification(&paths, &scores, &truth, &names).unwrap();
        aggregator.write_fold(fold.index, &table).unwrap();
    }

    let report = run_summary(&spec, Some(3)).unwrap();
    assert_eq!(report.misses, 1);
    let out = &spec.summary.output_dir;
    assert!(out.join(CROSSTAB_FILE).exists());
    assert!(!out.join(ROC_FIGURE).exists());

    let Summary::Categorical(categorical) = report.summary else {
        panic!("expected a categorical summary");
    };
    assert_relative_eq!(categorical.accuracy[0].point, 5.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(categorical.accuracy[1].point, 1.0, epsilon = 1e-12);
    assert_relative_eq!(categorical.accuracy[2].upper, 1.0, epsilon = 1e-12);
}

// =============================================================================
// Regression
// =============================================================================

#[test]
fn test_regression_split_then_summarize() {
    let dir = TempDir::new().unwrap();
    let rows: Vec<_> = (0..20)
        .map(|i| (format!("img_{i}.png"), format!("{}", i as f64 * 0.5), String::new()))
        .collect();
    let dataset = dir.path().join("labels.csv");
    let mut csv = String::from("image,label\n");
    for (image, label, _) in &rows {
        csv.push_str(&format!("{image},{label}\n"));
    }
    std::fs::write(&dataset, csv).unwrap();
    let spec = run_spec(&dir, &dataset, "regression", 4, false);

    let split = run_split(&spec).unwrap();
    assert_eq!(split.n_groups, 20);
    assert_eq!(split.n_classes, 10);

    let aggregator = MissRecordAggregator::new(&spec.summary.miss_dir, RecordKind::Regression);
    for fold in &split.folds {
        let rows = read_target_fold(&fold.files.test);
        let paths: Vec<&str> = rows.iter().map(|(f, _)| f.as_str()).collect();
        let truth: Vec<f64> = rows.iter().map(|(_, t)| *t).collect();
        let predicted: Vec<f64> = truth.iter().map(|t| 2.0 * t + 1.0).collect();
        let table = MissTable::from_regression(&paths, &predicted, &truth).unwrap();
        aggregator.write_fold(fold.index, &table).unwrap();
    }

    let report = run_summary(&spec, Some(4)).unwrap();
    assert_eq!(report.n_records, 20);
    let out = &spec.summary.output_dir;
    assert!(out.join(SCATTER_FIGURE).exists());
    assert!(!out.join(CROSSTAB_FILE).exists());

    let Summary::Regression(regression) = report.summary else {
        panic!("expected a regression summary");
    };
    assert_relative_eq!(regression.pearson.r, 1.0, epsilon = 1e-9);
    assert_eq!(regression.pearson.n, 20);
}

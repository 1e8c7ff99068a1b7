//! Split and summary stages driven by a validated run spec
//!
//! Model training and inference happen between the two stages, outside this
//! crate: it reads `train_<i>.csv` / `test_<i>.csv` and writes `miss_<i>.csv`
//! through [`MissRecordAggregator::write_fold`].

use crate::config::{RunSpec, TaskMode};
use crate::eval::{
    render_roc, render_scatter, CrossTab, MissRecordAggregator, MissTable, RecordKind, Summary,
};
use crate::split::{
    check_class_count, pseudo_labels, Fold, FoldDatasetWriter, FoldFiles, LabelGroupIndex,
    LabeledDataset, StratifiedGroupKFold,
};
use crate::{FoldevalError, Result};
use std::fs;
use std::path::PathBuf;

/// Aggregate of every fold's miss records
pub const AGGREGATE_FILE: &str = "miss_summary.csv";
/// Predicted × true table with margins
pub const CROSSTAB_FILE: &str = "crosstab.csv";
/// Point/lower/upper (or r/p) table
pub const SUMMARY_FILE: &str = "summary.csv";
/// Binary ROC figure
pub const ROC_FIGURE: &str = "roc.svg";
/// Regression scatter figure
pub const SCATTER_FIGURE: &str = "prediction.svg";

/// One fold of a finished split
#[derive(Clone, Debug, PartialEq)]
pub struct FoldReport {
    pub index: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub files: FoldFiles,
}

/// Outcome of [`run_split`]
#[derive(Clone, Debug, PartialEq)]
pub struct SplitReport {
    pub n_samples: usize,
    pub n_groups: usize,
    /// Distinct classes, or populated pseudo-label buckets in regression mode
    pub n_classes: usize,
    /// Mean per-class standard deviation of fold shares
    pub imbalance: f64,
    pub folds: Vec<FoldReport>,
}

/// Outcome of [`run_summary`]
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryReport {
    pub n_records: usize,
    pub misses: usize,
    pub summary: Summary,
    /// Every file written, in write order
    pub artifacts: Vec<PathBuf>,
}

struct Assigned {
    folds: Vec<Fold>,
    n_groups: usize,
    n_classes: usize,
    imbalance: f64,
}

fn assign<L: Ord + Clone>(
    splitter: &StratifiedGroupKFold,
    labels: &[L],
    groups: &[String],
    classification: bool,
) -> Result<Assigned> {
    let index = LabelGroupIndex::build(labels, groups)?;
    if classification {
        check_class_count(index.n_classes())?;
    }
    let assignment = splitter.assignment(&index)?;
    Ok(Assigned {
        folds: assignment.folds(&index),
        n_groups: index.n_groups(),
        n_classes: index.n_classes(),
        imbalance: assignment.imbalance(index.totals()),
    })
}

/// Read the dataset, assign groups to folds and write the fold files
pub fn run_split(spec: &RunSpec) -> Result<SplitReport> {
    let dataset = LabeledDataset::from_csv_path(&spec.dataset.path, &spec.dataset.columns)?;
    let splitter = StratifiedGroupKFold::new(spec.split.n_splits)
        .with_shuffle(spec.split.shuffle)
        .with_seed(spec.split.seed);
    let groups = dataset.groups();

    tracing::info!(
        samples = dataset.len(),
        grouped = dataset.is_grouped(),
        mode = %spec.task.mode,
        folds = spec.split.n_splits,
        "splitting dataset"
    );

    let targets = match spec.task.mode {
        TaskMode::Regression => Some(dataset.targets()?),
        TaskMode::Binary | TaskMode::Categorical => None,
    };
    let assigned = match &targets {
        Some(targets) => assign(&splitter, &pseudo_labels(targets)?, &groups, false)?,
        None => assign(&splitter, &dataset.labels(), &groups, true)?,
    };

    let writer = FoldDatasetWriter::create(&spec.split.output_dir)?;
    let folds = assigned
        .folds
        .iter()
        .map(|fold| {
            let files = match &targets {
                Some(targets) => writer.write_regression(fold, &dataset, targets)?,
                None => writer.write_classification(fold, &dataset)?,
            };
            Ok(FoldReport {
                index: fold.index,
                n_train: fold.train.len(),
                n_test: fold.test.len(),
                files,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(imbalance = assigned.imbalance, dir = %writer.dir().display(), "split written");
    Ok(SplitReport {
        n_samples: dataset.len(),
        n_groups: assigned.n_groups,
        n_classes: assigned.n_classes,
        imbalance: assigned.imbalance,
        folds,
    })
}

/// Aggregate the miss records and write every summary artifact
///
/// With `n_folds` the files `miss_0.csv` .. `miss_<k-1>.csv` are read;
/// without it the miss directory is scanned.
pub fn run_summary(spec: &RunSpec, n_folds: Option<usize>) -> Result<SummaryReport> {
    let mode = spec.task.mode;
    let kind = if mode.is_classification() {
        RecordKind::Classification
    } else {
        RecordKind::Regression
    };
    let aggregator = MissRecordAggregator::new(&spec.summary.miss_dir, kind);
    let table = match n_folds {
        Some(k) => aggregator.collect_folds(k)?,
        None => aggregator.collect_dir()?,
    };
    tracing::info!(rows = table.len(), misses = table.misses(), "aggregated miss records");

    let out = &spec.summary.output_dir;
    fs::create_dir_all(out).map_err(|e| FoldevalError::io(out, e))?;
    let mut artifacts = Vec::new();

    let aggregate = out.join(AGGREGATE_FILE);
    table.write_csv(&aggregate)?;
    artifacts.push(aggregate);

    if mode.is_classification() {
        let crosstab = out.join(CROSSTAB_FILE);
        CrossTab::from_table(&table)?.write_csv(&crosstab)?;
        artifacts.push(crosstab);
    }

    let summary = Summary::compute(
        &table,
        mode,
        spec.task.alpha,
        spec.task.positive_class.as_deref(),
    )?;
    let summary_path = out.join(SUMMARY_FILE);
    summary.write_csv(&summary_path)?;
    artifacts.push(summary_path);

    if let Some(figure) = render_figure(&summary, &table, out)? {
        artifacts.push(figure);
    }

    Ok(SummaryReport {
        n_records: table.len(),
        misses: table.misses(),
        summary,
        artifacts,
    })
}

fn render_figure(
    summary: &Summary,
    table: &MissTable,
    out: &std::path::Path,
) -> Result<Option<PathBuf>> {
    match summary {
        Summary::Binary(b) => {
            let path = out.join(ROC_FIGURE);
            render_roc(&path, &b.roc, b.operating_point, &b.auc)?;
            Ok(Some(path))
        }
        Summary::Regression(_) => {
            let path = out.join(SCATTER_FIGURE);
            render_scatter(&path, &table.true_values(), &table.predicted_values())?;
            Ok(Some(path))
        }
        Summary::Categorical(_) => Ok(None),
    }
}

//! Confusion matrix and predicted × true cross tabulation

use super::records::MissTable;
use crate::split::csv_error;
use crate::{FoldevalError, Result};
use std::fmt;
use std::path::Path;

/// Confusion matrix over a fixed class list
///
/// Element [i][j] counts samples with true class i predicted as j
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// matrix[true_class][predicted_class] = count
    matrix: Vec<Vec<usize>>,
    class_names: Vec<String>,
}

impl ConfusionMatrix {
    /// Create an empty matrix over the given classes
    pub fn new(class_names: Vec<String>) -> Self {
        let n = class_names.len();
        Self {
            matrix: vec![vec![0; n]; n],
            class_names,
        }
    }

    /// Tally the records of a classification miss table
    pub fn from_table(table: &MissTable) -> Result<Self> {
        let mut cm = Self::new(table.class_names().to_vec());
        for record in table.records() {
            match (record.truth.class(), record.predicted.class()) {
                (Some(t), Some(p)) if t < cm.n_classes() && p < cm.n_classes() => {
                    cm.matrix[t][p] += 1;
                }
                _ => {
                    return Err(FoldevalError::configuration(
                        format!("record '{}' has no valid class outcome", record.filename),
                        "Confusion matrices need a classification miss table",
                    ));
                }
            }
        }
        Ok(cm)
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Element at [true_class][predicted_class]
    pub fn get(&self, true_class: usize, predicted_class: usize) -> usize {
        self.matrix[true_class][predicted_class]
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Predicted as `class` but wasn't
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum()
    }

    /// Was `class` but predicted differently
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes())
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum()
    }

    pub fn true_negatives(&self, class: usize) -> usize {
        self.total()
            - self.true_positives(class)
            - self.false_positives(class)
            - self.false_negatives(class)
    }

    /// Number of samples whose true class is `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Fraction of correctly classified samples
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .class_names
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(6);

        write!(f, "{:>width$}", "true\\pred")?;
        for name in &self.class_names {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f)?;

        for (i, name) in self.class_names.iter().enumerate() {
            write!(f, "{name:>width$}")?;
            for count in &self.matrix[i] {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Predicted × true contingency table with "All" margins
///
/// Rows are the observed predicted classes and columns the observed true
/// classes, each ascending by class index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossTab {
    row_classes: Vec<usize>,
    col_classes: Vec<usize>,
    class_names: Vec<String>,
    /// cells[row][col]
    cells: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Cross tabulate a classification miss table
    pub fn from_table(table: &MissTable) -> Result<Self> {
        let cm = ConfusionMatrix::from_table(table)?;
        let n = cm.n_classes();

        let row_classes: Vec<usize> = (0..n)
            .filter(|&p| (0..n).any(|t| cm.get(t, p) > 0))
            .collect();
        let col_classes: Vec<usize> = (0..n).filter(|&t| cm.support(t) > 0).collect();
        let cells = row_classes
            .iter()
            .map(|&p| col_classes.iter().map(|&t| cm.get(t, p)).collect())
            .collect();

        Ok(Self {
            row_classes,
            col_classes,
            class_names: cm.class_names,
            cells,
        })
    }

    /// Predicted classes labelling the rows
    pub fn row_classes(&self) -> &[usize] {
        &self.row_classes
    }

    /// True classes labelling the columns
    pub fn col_classes(&self) -> &[usize] {
        &self.col_classes
    }

    /// Count of samples predicted as `predicted` whose truth is `truth`
    pub fn count(&self, predicted: usize, truth: usize) -> usize {
        let row = self.row_classes.iter().position(|&c| c == predicted);
        let col = self.col_classes.iter().position(|&c| c == truth);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }

    /// "All" column: total per predicted class
    pub fn row_totals(&self) -> Vec<usize> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// "All" row: total per true class
    pub fn col_totals(&self) -> Vec<usize> {
        (0..self.col_classes.len())
            .map(|c| self.cells.iter().map(|row| row[c]).sum())
            .collect()
    }

    /// Grand total
    pub fn total(&self) -> usize {
        self.row_totals().iter().sum()
    }

    fn name(&self, class: usize) -> String {
        self.class_names
            .get(class)
            .cloned()
            .unwrap_or_else(|| class.to_string())
    }

    /// Table rows including the header and the "All" margins
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.row_classes.len() + 2);

        let mut header = vec!["predict\\true".to_string()];
        header.extend(self.col_classes.iter().map(|&c| self.name(c)));
        header.push("All".to_string());
        rows.push(header);

        for ((&class, cells), total) in self
            .row_classes
            .iter()
            .zip(&self.cells)
            .zip(self.row_totals())
        {
            let mut row = vec![self.name(class)];
            row.extend(cells.iter().map(usize::to_string));
            row.push(total.to_string());
            rows.push(row);
        }

        let mut margin = vec!["All".to_string()];
        margin.extend(self.col_totals().iter().map(usize::to_string));
        margin.push(self.total().to_string());
        rows.push(margin);
        rows
    }

    /// Write the table, margins included, as CSV
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
        for row in self.to_rows() {
            writer.write_record(&row).map_err(|e| csv_error(path, e))?;
        }
        writer.flush().map_err(|e| FoldevalError::io(path, e))
    }
}

impl fmt::Display for CrossTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.to_rows();
        let width = rows.iter().flatten().map(String::len).max().unwrap_or(0);
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

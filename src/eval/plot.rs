//! SVG figures: ROC curve (binary) and prediction scatter (regression)

use super::stats::{Estimate, RocPoint};
use crate::{FoldevalError, Result};
use plotters::prelude::*;
use std::path::Path;

const PLOT_WIDTH: u32 = 640;
const PLOT_HEIGHT: u32 = 600;
const PLOT_MARGIN: u32 = 20;
const FONT_SIZE_TITLE: u32 = 22;

fn plot_error(err: impl std::fmt::Display) -> FoldevalError {
    FoldevalError::Plot {
        message: err.to_string(),
    }
}

/// ROC curve with the chance diagonal and the argmax operating point
pub fn render_roc(
    path: &Path,
    roc: &[RocPoint],
    operating_point: (f64, f64),
    auc: &Estimate,
) -> Result<()> {
    if roc.is_empty() {
        return Err(plot_error("ROC curve has no points"));
    }

    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let caption = format!(
        "ROC (AUC {:.3}, CI {:.3}-{:.3})",
        auc.point, auc.lower, auc.upper
    );
    let mut chart = ChartBuilder::on(&root)
        .margin(PLOT_MARGIN)
        .caption(caption, ("sans-serif", FONT_SIZE_TITLE))
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("1 - specificity")
        .y_desc("sensitivity")
        .draw()
        .map_err(plot_error)?;

    let pts: Vec<(f64, f64)> = roc.iter().map(|p| (p.fpr, p.tpr)).collect();
    chart
        .draw_series(LineSeries::new(pts, &BLUE))
        .map_err(plot_error)?
        .label("ROC")
        .legend(|(x, y)| PathElement::new(vec![(x - 5, y), (x + 5, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], &RED))
        .map_err(plot_error)?
        .label("Chance")
        .legend(|(x, y)| PathElement::new(vec![(x - 5, y), (x + 5, y)], &RED));

    chart
        .draw_series(std::iter::once(Circle::new(operating_point, 5, BLACK.filled())))
        .map_err(plot_error)?
        .label("Operating point")
        .legend(|(x, y)| Circle::new((x, y), 3, BLACK.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    tracing::info!(path = %path.display(), "ROC figure saved");
    Ok(())
}

/// Ground truth against prediction, with the identity line
pub fn render_scatter(path: &Path, truth: &[f64], predicted: &[f64]) -> Result<()> {
    if truth.is_empty() || truth.len() != predicted.len() {
        return Err(plot_error(format!(
            "scatter needs matching non-empty series, got {} and {}",
            truth.len(),
            predicted.len()
        )));
    }

    let (lo, hi) = truth
        .iter()
        .chain(predicted)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return Err(plot_error("scatter values must be finite"));
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    let range = (lo - pad)..(hi + pad);

    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(PLOT_MARGIN)
        .caption("Prediction", ("sans-serif", FONT_SIZE_TITLE))
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(range.clone(), range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("ground value")
        .y_desc("predicted value")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            vec![(lo - pad, lo - pad), (hi + pad, hi + pad)],
            &GREEN,
        ))
        .map_err(plot_error)?;

    chart
        .draw_series(
            truth
                .iter()
                .zip(predicted)
                .map(|(&x, &y)| Circle::new((x, y), 3, BLUE.filled())),
        )
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    tracing::info!(path = %path.display(), points = truth.len(), "scatter figure saved");
    Ok(())
}

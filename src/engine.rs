use std::path::Path;

use linreg::linear_regression;
use tracing::{info, warn};

use crate::dataset::{read_header_line, Dataset};
use crate::error::{RegressionError, Result};

/// Points drawn when no valid fit exists.
pub const PLACEHOLDER_X: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
pub const PLACEHOLDER_Y: [f64; 5] = [10.0, 1.0, 20.0, 3.0, 40.0];

/// The (x, y) column names chosen by the user, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub x: String,
    pub y: String,
}

/// Slope/intercept of an OLS fit plus the vectors it was fitted on.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub selection: ColumnSelection,
    pub slope: f64,
    pub intercept: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl FittedModel {
    /// Fit y on x. Fails on empty input or a vertical (constant x) line.
    pub fn fit(selection: ColumnSelection, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.is_empty() {
            return Err(RegressionError::DegenerateFit("no data rows".to_string()));
        }
        let (slope, intercept) = linear_regression::<f64, f64, f64>(&xs, &ys)
            .map_err(|err| RegressionError::DegenerateFit(format!("{:?}", err)))?;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(RegressionError::DegenerateFit(
                "slope is not finite".to_string(),
            ));
        }
        Ok(Self {
            selection,
            slope,
            intercept,
            xs,
            ys,
        })
    }

    /// Unrounded prediction.
    pub fn predict_raw(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sum of squared residuals of the fitted line.
    pub fn residual_sum_of_squares(&self) -> f64 {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| (y - self.predict_raw(x)).powi(2))
            .sum()
    }

    /// Sum of squares around the mean of y (the horizontal baseline).
    pub fn total_sum_of_squares(&self) -> f64 {
        if self.ys.is_empty() {
            return 0.0;
        }
        let mean = self.ys.iter().sum::<f64>() / self.ys.len() as f64;
        self.ys.iter().map(|&y| (y - mean).powi(2)).sum()
    }

    /// Coefficient of determination; 1.0 when y is constant and matched exactly.
    pub fn r_squared(&self) -> f64 {
        let tss = self.total_sum_of_squares();
        if tss == 0.0 {
            return 1.0;
        }
        1.0 - self.residual_sum_of_squares() / tss
    }
}

/// What a successful `load` reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    pub selection: ColumnSelection,
    pub slope: f64,
    pub intercept: f64,
    pub n: usize,
    pub r_squared: f64,
}

impl FitSummary {
    fn from_model(model: &FittedModel) -> Self {
        Self {
            selection: model.selection.clone(),
            slope: model.slope,
            intercept: model.intercept,
            n: model.len(),
            r_squared: model.r_squared(),
        }
    }

    /// Fitted line as text, e.g. `b = 2.0000·a + 0.0000`.
    pub fn equation(&self) -> String {
        // Sign of the value as printed, so -1e-16 shows as "+ 0.0000"
        let shown = (self.intercept * 1e4).round() / 1e4;
        let sign = if shown < 0.0 { '-' } else { '+' };
        format!(
            "{} = {:.4}·{} {} {:.4}",
            self.selection.y,
            self.slope,
            self.selection.x,
            sign,
            self.intercept.abs()
        )
    }
}

/// A fully recomputed plot description.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Fixed fallback scatter, no fitted line.
    Placeholder { points: Vec<[f64; 2]> },
    /// Actual data plus the fitted line, ordered by x.
    Fitted {
        x_label: String,
        y_label: String,
        points: Vec<[f64; 2]>,
        line: Vec<[f64; 2]>,
    },
}

impl Figure {
    pub fn placeholder() -> Self {
        Figure::Placeholder {
            points: PLACEHOLDER_X
                .iter()
                .zip(PLACEHOLDER_Y.iter())
                .map(|(&x, &y)| [x, y])
                .collect(),
        }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        match self {
            Figure::Placeholder { points } | Figure::Fitted { points, .. } => points,
        }
    }

    pub fn line(&self) -> Option<&[[f64; 2]]> {
        match self {
            Figure::Placeholder { .. } => None,
            Figure::Fitted { line, .. } => Some(line),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Figure::Placeholder { .. })
    }
}

impl Default for Figure {
    fn default() -> Self {
        Figure::placeholder()
    }
}

/// Holds the current dataset and fitted model.
///
/// The engine has no knowledge of any window; callers drive it one
/// operation at a time.
#[derive(Debug, Default)]
pub struct RegressionEngine {
    dataset: Option<Dataset>,
    model: Option<FittedModel>,
}

impl RegressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `file_path`, validate the column names against its header line
    /// and fit `y_column` on `x_column`.
    ///
    /// The parsed table replaces the current dataset even when the names are
    /// invalid. The fitted model is only replaced by a successful fit.
    pub fn load(&mut self, x_column: &str, y_column: &str, file_path: &Path) -> Result<FitSummary> {
        let parsed = Dataset::from_path(file_path)?;
        let header = read_header_line(file_path)?;
        let dataset = &*self.dataset.insert(parsed);

        let missing: Vec<String> = [x_column, y_column]
            .iter()
            .filter(|name| !header.iter().any(|h| h == *name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "requested columns absent from header");
            return Err(RegressionError::MissingColumn { missing });
        }

        let xs = dataset.numeric_column(x_column)?;
        let ys = dataset.numeric_column(y_column)?;

        let selection = ColumnSelection {
            x: x_column.to_string(),
            y: y_column.to_string(),
        };
        let model = FittedModel::fit(selection, xs, ys)?;
        let summary = FitSummary::from_model(&model);
        info!(
            slope = summary.slope,
            intercept = summary.intercept,
            n = summary.n,
            "fitted regression"
        );
        self.model = Some(model);
        Ok(summary)
    }

    /// Prediction for `x` rounded to two decimal places.
    pub fn predict(&self, x: f64) -> Result<f64> {
        match &self.model {
            Some(model) if !model.is_empty() => Ok(round2(model.predict_raw(x))),
            _ => Err(RegressionError::PredictionWithoutModel),
        }
    }

    /// Recompute the figure from scratch.
    pub fn render(&self) -> Figure {
        let Some(model) = &self.model else {
            return Figure::placeholder();
        };

        let points: Vec<[f64; 2]> = model
            .xs()
            .iter()
            .zip(model.ys())
            .map(|(&x, &y)| [x, y])
            .collect();
        let mut line: Vec<[f64; 2]> = model
            .xs()
            .iter()
            .map(|&x| [x, model.predict_raw(x)])
            .collect();
        line.sort_by(|a, b| a[0].total_cmp(&b[0]));

        Figure::Fitted {
            x_label: model.selection.x.clone(),
            y_label: model.selection.y.clone(),
            points,
            line,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

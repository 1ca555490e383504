//! Performance: cross-validation folds, per-class metrics, confusion matrix

use serde::Serialize;

use super::report::{AnalysisReport, ConfusionMatrix};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldScore {
    pub fold: String,
    pub accuracy: f64,
}

/// Grouped-bar record: one per (class, metric)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetricRow {
    pub class: String,
    pub metric: &'static str,
    pub value: f64,
}

/// Heatmap cell. Rows are true labels, columns predicted labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionCell {
    #[serde(rename = "true")]
    pub true_label: String,
    pub predicted: String,
    pub value: u64,
    /// `value / max(matrix)`, 0 for an all-zero matrix
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceView {
    pub train_accuracy: Option<f64>,
    pub cv_mean_accuracy: Option<f64>,
    pub cv_folds: Vec<FoldScore>,
    pub per_class: Vec<ClassMetricRow>,
    pub labels: Vec<String>,
    pub matrix: Vec<Vec<u64>>,
    pub confusion: Vec<ConfusionCell>,
}

pub fn build(report: &AnalysisReport) -> PerformanceView {
    let perf = report.performance.as_ref();

    let cv_folds = perf
        .map(|p| {
            p.cv_scores
                .iter()
                .enumerate()
                .map(|(i, score)| FoldScore {
                    fold: format!("Fold {}", i + 1),
                    accuracy: *score,
                })
                .collect()
        })
        .unwrap_or_default();

    let per_class = report
        .per_class_metrics
        .iter()
        .flat_map(|(name, m)| {
            [
                ("Precision", m.precision),
                ("Recall", m.recall),
                ("F1-Score", m.f1_score),
            ]
            .into_iter()
            .map(move |(metric, value)| ClassMetricRow {
                class: name.to_string(),
                metric,
                value,
            })
        })
        .collect();

    let matrix = report.confusion_matrix.clone().unwrap_or_default();

    PerformanceView {
        train_accuracy: perf.map(|p| p.train_accuracy),
        cv_mean_accuracy: perf.map(|p| p.cv_mean_accuracy),
        cv_folds,
        per_class,
        confusion: flatten_confusion(&matrix),
        labels: matrix.labels,
        matrix: matrix.cross_validation,
    }
}

/// Row-major `{true, predicted, value}` triples
pub fn flatten_confusion(matrix: &ConfusionMatrix) -> Vec<ConfusionCell> {
    let max = matrix
        .cross_validation
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);

    let label = |i: usize| {
        matrix
            .labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| i.to_string())
    };

    let mut cells = Vec::new();
    for (i, row) in matrix.cross_validation.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            cells.push(ConfusionCell {
                true_label: label(i),
                predicted: label(j),
                value: *value,
                intensity: if max == 0 { 0.0 } else { *value as f64 / max as f64 },
            });
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::report_body;

    #[test]
    fn test_flatten_two_by_two() {
        let matrix = ConfusionMatrix {
            cross_validation: vec![vec![5, 1], vec![2, 8]],
            labels: vec!["A".into(), "B".into()],
        };

        let cells = flatten_confusion(&matrix);

        assert_eq!(cells.len(), 4);
        assert!(cells
            .iter()
            .any(|c| c.true_label == "A" && c.predicted == "B" && c.value == 1));
        assert_eq!(cells[3].intensity, 1.0);
        assert_eq!(cells[0].intensity, 5.0 / 8.0);
    }

    #[test]
    fn test_cell_serializes_with_true_key() {
        let cells = flatten_confusion(&ConfusionMatrix {
            cross_validation: vec![vec![3]],
            labels: vec!["A".into()],
        });
        let json = serde_json::to_value(&cells[0]).unwrap();
        assert_eq!(json["true"], "A");
        assert_eq!(json["predicted"], "A");
    }

    #[test]
    fn test_all_zero_matrix_has_zero_intensity() {
        let cells = flatten_confusion(&ConfusionMatrix {
            cross_validation: vec![vec![0, 0], vec![0, 0]],
            labels: vec!["A".into(), "B".into()],
        });
        assert!(cells.iter().all(|c| c.intensity == 0.0));
    }

    #[test]
    fn test_build_from_report() {
        let report: AnalysisReport = serde_json::from_value(report_body()).unwrap();
        let view = build(&report);

        let folds: Vec<_> = view.cv_folds.iter().map(|f| f.fold.as_str()).collect();
        assert_eq!(folds, vec!["Fold 1", "Fold 2", "Fold 3"]);
        assert_eq!(view.per_class.len(), 6);
        assert_eq!(view.per_class[2].metric, "F1-Score");
        assert_eq!(view.per_class[2].value, 0.88);
        assert_eq!(view.confusion.len(), 4);
    }
}

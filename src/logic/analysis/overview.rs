//! Overview: headline metrics, model health and learning curve

use serde::Serialize;

use super::report::{AnalysisReport, LearningCurvePoint};
use super::{chart_rows, ChartRow};
use crate::logic::predict::format_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Red,
    Yellow,
    Green,
}

impl HealthLevel {
    /// `High` → red, `Moderate` → yellow, anything else → green
    pub fn from_status(status: &str) -> Self {
        match status {
            "High" => HealthLevel::Red,
            "Moderate" => HealthLevel::Yellow,
            _ => HealthLevel::Green,
        }
    }

    /// Independence statuses come as e.g. `High Violation`
    pub fn from_independence(status: &str) -> Self {
        if status.contains("High") {
            HealthLevel::Red
        } else if status == "Moderate" {
            HealthLevel::Yellow
        } else {
            HealthLevel::Green
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCard {
    pub title: &'static str,
    pub value: String,
    pub score: String,
    pub level: HealthLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub model_type: Option<String>,
    pub metrics: Vec<MetricCard>,
    pub health: Vec<HealthCard>,
    pub learning_curve: Vec<LearningCurvePoint>,
    pub class_distribution: Vec<ChartRow>,
    pub parameters: Vec<ParamCard>,
}

pub fn build(report: &AnalysisReport) -> OverviewView {
    let health = report.model_health.clone().unwrap_or_default();
    let params = report.model_parameters.clone().unwrap_or_default();
    let overlap = report.class_overlap.clone().unwrap_or_default();

    let mut metrics = vec![MetricCard {
        title: "Total Samples",
        value: report.total_samples.unwrap_or(0).to_string(),
        status: None,
    }];
    if let Some(perf) = &report.performance {
        metrics.push(MetricCard {
            title: "Train Accuracy",
            value: format_percent(perf.train_accuracy),
            status: Some(health.overfitting_status.clone()).filter(|s| !s.is_empty()),
        });
        metrics.push(MetricCard {
            title: "CV Accuracy",
            value: format_percent(perf.cv_mean_accuracy),
            status: None,
        });
    }
    metrics.push(MetricCard {
        title: "Features",
        value: params.n_features.to_string(),
        status: None,
    });

    let mut cards = Vec::new();
    if report.model_health.is_some() {
        cards.push(HealthCard {
            title: "Overfitting",
            value: health.overfitting_status.clone(),
            score: format_percent(health.overfitting_score),
            level: HealthLevel::from_status(&health.overfitting_status),
        });
        cards.push(HealthCard {
            title: "Underfitting",
            value: health.underfitting_status.clone(),
            score: format!("Bias: {}", format_percent(health.bias)),
            level: HealthLevel::from_status(&health.underfitting_status),
        });
    }
    let independence = report
        .naive_bayes_specific
        .as_ref()
        .and_then(|nb| nb.conditional_independence.as_ref());
    if let Some(ci) = independence {
        cards.push(HealthCard {
            title: "Independence Violation",
            value: ci.status.clone(),
            score: format!("{:.2}%", ci.violation_ratio * 100.0),
            level: HealthLevel::from_independence(&ci.status),
        });
    }

    let parameters = vec![
        ParamCard { label: "Alpha (Smoothing)", value: params.alpha.to_string() },
        ParamCard { label: "Features", value: params.n_features.to_string() },
        ParamCard { label: "Classes", value: report.classes.len().to_string() },
        ParamCard { label: "Variance", value: format!("{:.4}", health.variance) },
        ParamCard { label: "Avg Confidence", value: format_percent(overlap.avg_confidence) },
        ParamCard { label: "Low Confidence", value: overlap.low_confidence_samples.to_string() },
    ];

    OverviewView {
        model_type: report.model_type.clone(),
        metrics,
        health: cards,
        learning_curve: report.learning_curve.clone(),
        class_distribution: chart_rows(&report.class_distribution, |c| *c as f64),
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::report_body;

    fn view() -> OverviewView {
        let report: AnalysisReport = serde_json::from_value(report_body()).unwrap();
        build(&report)
    }

    #[test]
    fn test_metric_cards() {
        let view = view();
        let values: Vec<_> = view.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["420", "91.2%", "83.4%", "500"]);
        assert_eq!(view.metrics[1].status.as_deref(), Some("Moderate"));
    }

    #[test]
    fn test_health_levels() {
        let view = view();
        let levels: Vec<_> = view.health.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![HealthLevel::Yellow, HealthLevel::Green, HealthLevel::Red]);
        assert_eq!(view.health[1].score, "Bias: 8.8%");
        assert_eq!(view.health[2].score, "12.34%");
    }

    #[test]
    fn test_parameter_cards() {
        let view = view();
        let variance = view.parameters.iter().find(|p| p.label == "Variance").unwrap();
        assert_eq!(variance.value, "0.0004");
        let classes = view.parameters.iter().find(|p| p.label == "Classes").unwrap();
        assert_eq!(classes.value, "2");
    }

    #[test]
    fn test_empty_report_still_renders() {
        let view = build(&AnalysisReport::default());
        assert!(view.health.is_empty());
        assert!(view.learning_curve.is_empty());
        assert_eq!(view.metrics.len(), 2);
    }
}

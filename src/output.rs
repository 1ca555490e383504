//! Terminal rendering for command responses

use colored::Colorize;
use serde::Serialize;

use crate::api::{
    AnalysisResponse, ClearResponse, DeleteResponse, ModelsResponse, PredictionView,
    SelectResponse, SessionResponse,
};
use crate::logic::analysis::features::FeaturesView;
use crate::logic::analysis::naive_bayes::NaiveBayesView;
use crate::logic::analysis::overview::{HealthLevel, OverviewView};
use crate::logic::analysis::performance::PerformanceView;
use crate::logic::analysis::{ChartRow, ModelSummary, ReportView};
use crate::logic::client::{HealthStatus, TrainResponse};
use crate::logic::history::HistoryRow;
use crate::logic::predict::format_percent;

const BAR_WIDTH: usize = 30;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

pub(crate) fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Pretty JSON on stdout (`--json`)
pub(crate) fn json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Horizontal bar for a ratio in [0,1]; out-of-range input is clamped
pub(crate) fn bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bars scaled against the largest value of the set
fn chart(rows: &[ChartRow], fmt: impl Fn(f64) -> String) {
    let max = rows.iter().map(|r| r.value).fold(0.0, f64::max);
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        let ratio = if max > 0.0 { row.value / max } else { 0.0 };
        println!(
            "  {:<width$}  {} {}",
            row.label,
            bar(ratio, BAR_WIDTH).blue(),
            fmt(row.value),
            width = width
        );
    }
}

// ============================================================================
// MODELS / PREDICTION / HISTORY
// ============================================================================

pub(crate) fn models(response: &ModelsResponse) {
    section("Models");
    if response.models.is_empty() {
        info("No trained models available");
        return;
    }
    for model in &response.models {
        let marker = if model.selected { "*".green().bold() } else { " ".normal() };
        println!("  {} {}", marker, model.label);
    }
    if let Some(latest) = &response.latest {
        kv("Latest", format!("v{latest}"));
    }
}

pub(crate) fn selected(response: &SelectResponse) {
    success(&format!("Selected model v{}", response.selected));
}

pub(crate) fn prediction(view: &PredictionView) {
    section("Prediction");
    kv("Title", &view.title);
    kv("Predicted KBK", view.predicted_kbk.green().bold());
    kv("Model", format!("v{}", view.model_version));

    println!();
    let width = view
        .probabilities
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    for row in &view.probabilities {
        println!(
            "  {:<width$}  {} {:>6}",
            row.label,
            bar(row.probability, BAR_WIDTH).green(),
            row.percent,
            width = width
        );
    }
}

pub(crate) fn history(rows: &[HistoryRow]) {
    section("History");
    if rows.is_empty() {
        info("No predictions yet");
        return;
    }
    for row in rows {
        println!(
            "  {}  {}  {}  {} {}",
            row.when.dimmed(),
            row.model.cyan(),
            row.predicted_kbk.bold(),
            row.confidence,
            format!("[{}]", row.id).dimmed()
        );
        println!("      {}", row.judul);
    }
}

pub(crate) fn deleted(response: &DeleteResponse) {
    success(&format!("Deleted {}", response.deleted));
    match &response.remaining {
        Some(rows) => history(rows),
        None => info("Remaining history unavailable"),
    }
}

pub(crate) fn cleared(response: &ClearResponse) {
    if response.cleared {
        success("History cleared");
    } else {
        info("Nothing cleared");
    }
}

// ============================================================================
// ANALYSIS
// ============================================================================

pub(crate) fn analysis(response: &AnalysisResponse) {
    match response {
        AnalysisResponse::Overview(view) => report_or_summary(view, overview),
        AnalysisResponse::Performance(view) => report_or_summary(view, performance),
        AnalysisResponse::NaiveBayes(view) => report_or_summary(view, naive_bayes),
        AnalysisResponse::Features(view) => report_or_summary(view, features),
    }
}

fn report_or_summary<V>(view: &ReportView<V>, render: fn(&V)) {
    match view {
        ReportView::Report(v) => render(v),
        ReportView::Summary(summary) => model_summary(summary),
    }
}

fn model_summary(summary: &ModelSummary) {
    section(&format!("Model v{}", summary.version));
    info("Full analysis report unavailable, showing model metadata");
    kv("Name", &summary.name);
    kv("Accuracy", &summary.accuracy);
    kv("CV Accuracy", &summary.cv_accuracy);
    if let Some(created) = &summary.created_at {
        kv("Created", created);
    }
    if let Some(description) = &summary.description {
        kv("Description", description);
    }
}

fn overview(view: &OverviewView) {
    section(&format!(
        "Overview ({})",
        view.model_type.as_deref().unwrap_or("Naive Bayes")
    ));
    for card in &view.metrics {
        match &card.status {
            Some(status) => kv(card.title, format!("{} ({})", card.value, status)),
            None => kv(card.title, &card.value),
        }
    }

    if !view.health.is_empty() {
        section("Model Health");
        for card in &view.health {
            let value = match card.level {
                HealthLevel::Red => card.value.red(),
                HealthLevel::Yellow => card.value.yellow(),
                HealthLevel::Green => card.value.green(),
            };
            kv(card.title, format!("{} ({})", value, card.score));
        }
    }

    if !view.learning_curve.is_empty() {
        section("Learning Curve");
        for point in &view.learning_curve {
            println!(
                "  {:>8}  train {:>6.1}%  validation {:>6.1}%",
                point.complexity, point.training, point.validation
            );
        }
    }

    if !view.class_distribution.is_empty() {
        section("Class Distribution");
        chart(&view.class_distribution, |v| format!("{v}"));
    }

    section("Parameters");
    for param in &view.parameters {
        kv(param.label, &param.value);
    }
}

fn performance(view: &PerformanceView) {
    section("Performance");
    if let Some(train) = view.train_accuracy {
        kv("Train Accuracy", format_percent(train));
    }
    if let Some(cv) = view.cv_mean_accuracy {
        kv("CV Mean Accuracy", format_percent(cv));
    }
    for fold in &view.cv_folds {
        println!(
            "  {:<8} {} {}",
            fold.fold,
            bar(fold.accuracy, BAR_WIDTH).blue(),
            format_percent(fold.accuracy)
        );
    }

    if !view.per_class.is_empty() {
        section("Per-class Metrics");
        for row in &view.per_class {
            println!("  {:<30} {:<10} {}", row.class, row.metric, format_percent(row.value));
        }
    }

    if !view.matrix.is_empty() {
        section("Confusion Matrix (rows: true, columns: predicted)");
        let header: String = view
            .labels
            .iter()
            .map(|l| format!("{:>8}", truncate(l, 8)))
            .collect();
        println!("  {:>12} {}", "", header);
        for (i, row) in view.matrix.iter().enumerate() {
            let label = view.labels.get(i).map(String::as_str).unwrap_or("?");
            let cells: String = row.iter().map(|v| format!("{v:>8}")).collect();
            println!("  {:>12} {}", truncate(label, 12), cells);
        }
    }
}

fn naive_bayes(view: &NaiveBayesView) {
    section("Class Priors");
    chart(&view.class_priors, format_percent);

    section("Prediction Confidence");
    chart(&view.confidence_distribution, |v| format!("{v}"));

    section("Top Misclassifications");
    chart(&view.misclassifications, |v| format!("{v}"));

    section("Zero-probability Features");
    chart(&view.zero_probability_features, |v| format!("{v:.1}%"));

    section("Class Separability (KL divergence)");
    chart(&view.kl_divergence, |v| format!("{v:.3}"));
}

fn features(view: &FeaturesView) {
    if let Some(stats) = &view.vectorizer {
        section("TF-IDF Vectorizer");
        kv("Vocabulary", stats.vocabulary_size);
        kv("Avg Document Length", format!("{:.1}", stats.avg_document_length));
        kv("Sparsity", format_percent(stats.sparsity));
        if let Some(max) = stats.max_features {
            kv("Max Features", max);
        }
        if let [lo, hi] = stats.ngram_range.as_slice() {
            kv("N-gram Range", format!("({lo}, {hi})"));
        }
        kv("Min DF", stats.min_df);
        kv("Max DF", stats.max_df);
    }

    section("Feature Counts per Class");
    chart(&view.feature_counts, |v| format!("{v:.0}"));

    section("Log-probabilities");
    for row in &view.log_probabilities {
        println!("  {:<30} {:<5} {:.3}", row.class, row.stat, row.value);
    }

    section("Top Features");
    for class in &view.top_features {
        kv(&class.class, class.features.join(", "));
    }
}

fn truncate(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

// ============================================================================
// SESSION / BACKEND
// ============================================================================

pub(crate) fn session(response: &SessionResponse) {
    section("Session");
    if response.reset {
        success("Started a new session");
    }
    kv("Session ID", &response.session_id);
    kv("Storage", &response.storage_dir);
}

pub(crate) fn health(status: &HealthStatus) {
    section("Backend Health");
    let colored = if status.status == "healthy" {
        status.status.green()
    } else {
        status.status.yellow()
    };
    kv("Status", colored);
    if let Some(redis) = &status.redis {
        kv("Redis", redis);
    }
    if let Some(models) = &status.models_available {
        kv("Models", models);
    }
}

pub(crate) fn trained(response: &TrainResponse) {
    success(response.message.as_deref().unwrap_or("Training started"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_fixed() {
        assert_eq!(bar(0.0, 10).chars().count(), 10);
        assert_eq!(bar(1.0, 10), "█".repeat(10));
        assert_eq!(bar(0.5, 10).chars().filter(|c| *c == '█').count(), 5);
    }

    #[test]
    fn test_bar_clamps_out_of_range() {
        assert_eq!(bar(1.7, 4), "████");
        assert_eq!(bar(-0.2, 4), "░░░░");
        assert_eq!(bar(f64::NAN, 4), "░░░░");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("AI / Machine Learning", 5), "AI / ");
        assert_eq!(truncate("A", 8), "A");
    }

    #[test]
    fn test_renderers_do_not_panic() {
        chart(&[], |v| format!("{v}"));
        chart(
            &[ChartRow { label: "A".into(), value: 0.0 }],
            |v| format!("{v}"),
        );
        history(&[]);
    }
}

//! Shared fixtures for unit tests

use serde_json::{json, Value};
use wiremock::MockServer;

use super::client::ApiClient;
use super::config::DashboardConfig;

pub fn client_for(server: &MockServer) -> ApiClient {
    let config = DashboardConfig::default().with_api_url(&server.uri());
    ApiClient::new(&config).unwrap()
}

pub fn models_body() -> Value {
    json!({
        "models": [
            {
                "version": "1.2",
                "name": "MLK2 Tuned",
                "accuracy": 0.91,
                "cv_accuracy": 0.834,
                "created_at": "2025-06-01T10:00:00"
            },
            {
                "version": "1.0",
                "name": "MLK2 Initial Model",
                "accuracy": 0.88,
                "cv_accuracy": 0.79,
                "created_at": "2025-05-20T08:30:00"
            }
        ],
        "latest": "1.2",
        "total": 2
    })
}

pub fn history_body() -> Value {
    json!({
        "history": [
            {
                "id": "h-2",
                "timestamp": "2025-06-02T14:05:00.123456",
                "judul": "Sistem monitoring jaringan berbasis mikrotik",
                "predicted_kbk": "Jaringan",
                "probabilities": {"Jaringan": 0.81, "Software": 0.19},
                "model_version": "1.2"
            },
            {
                "id": "h-1",
                "timestamp": "2025-06-01T09:00:00",
                "judul": "Implementasi algoritma naive bayes",
                "predicted_kbk": "AI / Machine Learning",
                "probabilities": {"AI / Machine Learning": 0.7, "Software": 0.3},
                "model_version": "1.0"
            }
        ]
    })
}

pub fn report_body() -> Value {
    json!({
        "model_type": "MultinomialNB",
        "total_samples": 420,
        "classes": ["AI / Machine Learning", "Software"],
        "class_distribution": {"AI / Machine Learning": 250, "Software": 170},
        "performance": {
            "train_accuracy": 0.912,
            "cv_mean_accuracy": 0.834,
            "cv_std_accuracy": 0.021,
            "cv_scores": [0.81, 0.85, 0.84]
        },
        "model_health": {
            "overfitting_status": "Moderate",
            "overfitting_score": 0.078,
            "underfitting_status": "Low",
            "bias": 0.088,
            "variance": 0.00044
        },
        "model_parameters": {"n_features": 500, "alpha": 0.1},
        "naive_bayes_specific": {
            "conditional_independence": {"status": "High Violation", "violation_ratio": 0.1234},
            "class_overlap": {"avg_confidence": 0.76, "low_confidence_samples": 31},
            "class_priors": {"AI / Machine Learning": 0.595, "Software": 0.405},
            "prediction_confidence_distribution": {"0.5-0.6": 12, "0.6-0.8": 40, "0.8-1.0": 368},
            "misclassification_patterns": {
                "Software_to_AI / Machine Learning": 9,
                "AI / Machine Learning_to_Software": 14
            },
            "zero_probability_features": {
                "AI / Machine Learning": {"count": 120, "percentage": 24.0},
                "Software": {"count": 150, "percentage": 30.0}
            },
            "class_separability_kl_divergence": {"AI / Machine Learning_vs_Software": 1.37},
            "tfidf_vectorizer_stats": {
                "vocabulary_size": 500,
                "avg_document_length": 6.4,
                "sparsity": 0.987,
                "max_features": 500,
                "ngram_range": [1, 3],
                "min_df": 2,
                "max_df": 0.8
            },
            "feature_log_probabilities": {
                "AI / Machine Learning": {"mean": -6.1, "std": 0.9, "min": -8.0, "max": -2.5},
                "Software": {"mean": -6.3, "std": 1.1, "min": -8.4, "max": -2.1}
            },
            "feature_counts_per_class": {"AI / Machine Learning": 310, "Software": 280}
        },
        "class_overlap": {
            "avg_confidence": 0.76,
            "avg_confidence_gap": 0.41,
            "low_confidence_samples": 31,
            "high_overlap_samples": 12
        },
        "learning_curve": [
            {"complexity": 100, "training": 85.0, "validation": 78.5},
            {"complexity": 500, "training": 91.2, "validation": 83.4}
        ],
        "per_class_metrics": {
            "AI / Machine Learning": {"precision": 0.86, "recall": 0.9, "f1_score": 0.88, "support": 250},
            "Software": {"precision": 0.8, "recall": 0.74, "f1_score": 0.77, "support": 170}
        },
        "confusion_matrix": {
            "cross_validation": [[5, 1], [2, 8]],
            "labels": ["A", "B"]
        },
        "top_features_per_class": {
            "AI / Machine Learning": ["naive", "bayes", "prediksi", "klasifikasi", "algoritma", "knn"],
            "Software": ["aplikasi", "web", "android"]
        }
    })
}

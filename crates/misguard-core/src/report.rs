//! Analysis results and the `/api/analyze` wire format.

use serde::{Deserialize, Serialize};

use crate::form::AnalysisMode;

/// Message stored on the error card when a submission fails.
pub const GENERIC_FAILURE: &str =
    "Failed to analyze content. Please check your backend connection.";

/// Request body for `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub headline: String,
    pub url: String,
    pub mode: AnalysisMode,
}

/// Response body for `POST /api/analyze`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    pub credibility_score: Option<f64>,
    #[serde(default)]
    pub analysis: AnalysisBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisBody {
    pub confidence: Option<f64>,
    pub bias_score: Option<f64>,
    pub readability: Option<String>,
    pub sources_found: Vec<String>,
    pub fact_check_results: Vec<serde_json::Value>,
    pub summary: Option<String>,
    pub recommendations: Vec<String>,
}

/// Successful analysis, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub credibility_score: f64,
    pub confidence: f64,
    pub bias_score: f64,
    pub readability: String,
    pub sources_found: Vec<String>,
    pub fact_check_count: usize,
    pub summary: String,
    pub recommendations: Vec<String>,
}

impl From<AnalyzeResponse> for AnalysisReport {
    fn from(resp: AnalyzeResponse) -> Self {
        let a = resp.analysis;
        Self {
            credibility_score: unit(resp.credibility_score.unwrap_or(0.5)),
            confidence: unit(a.confidence.unwrap_or(0.5)),
            bias_score: unit(a.bias_score.unwrap_or(0.0)),
            readability: a.readability.unwrap_or_else(|| "N/A".to_string()),
            sources_found: a.sources_found,
            fact_check_count: a.fact_check_results.len(),
            summary: a.summary.unwrap_or_default(),
            recommendations: a.recommendations,
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn percent(v: f64) -> u8 {
    (v * 100.0).round() as u8
}

impl AnalysisReport {
    /// The fixed demo payload returned when no live backend is used.
    pub fn mock() -> Self {
        Self {
            credibility_score: 0.85,
            confidence: 0.92,
            bias_score: 0.2,
            readability: "High".to_string(),
            sources_found: vec![
                "https://example.com/source1".to_string(),
                "https://example.com/source2".to_string(),
            ],
            fact_check_count: 2,
            summary: "The content appears credible based on cross-referenced sources.".to_string(),
            recommendations: vec![
                "Always check multiple sources.".to_string(),
                "Be cautious of sensational headlines.".to_string(),
            ],
        }
    }

    /// Per-dimension scores for the "Detailed Analysis" chart. The backend
    /// does not report these yet, so every report shows the sample axes.
    pub fn breakdown(&self) -> &'static [Dimension] {
        &DETAILED_ANALYSIS
    }

    pub fn band(&self) -> CredibilityBand {
        CredibilityBand::from_score(self.credibility_score)
    }

    pub fn credibility_pct(&self) -> u8 {
        percent(self.credibility_score)
    }

    pub fn confidence_pct(&self) -> u8 {
        percent(self.confidence)
    }

    /// Inverse of the bias score, shown as "Bias Score" in the metrics row.
    pub fn balance_pct(&self) -> u8 {
        percent(1.0 - self.bias_score)
    }
}

/// One axis of the detailed breakdown, scored 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub name: &'static str,
    pub value: u8,
}

pub const DETAILED_ANALYSIS: [Dimension; 6] = [
    Dimension { name: "Credibility", value: 85 },
    Dimension { name: "Bias", value: 15 },
    Dimension { name: "Sources", value: 92 },
    Dimension { name: "Factual", value: 88 },
    Dimension { name: "Clarity", value: 76 },
    Dimension { name: "Relevance", value: 94 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityBand {
    High,
    Medium,
    Low,
}

impl CredibilityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Highly Credible",
            Self::Medium => "Moderately Credible",
            Self::Low => "Low Credibility",
        }
    }
}

/// Terminal outcome of a session: a report or an error card.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success(AnalysisReport),
    Error { message: String },
}

impl AnalysisResult {
    pub fn failure() -> Self {
        Self::Error {
            message: GENERIC_FAILURE.to_string(),
        }
    }
}

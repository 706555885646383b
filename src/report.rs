use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::Serialize;

use crate::classifier::DetectionResult;
use crate::util::mean;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: &'static str,
    pub advice: &'static str,
}

/// Summary shown after a detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub results: Vec<DetectionResult>,
    pub items_detected: usize,
    pub avg_confidence: u8,
    pub categories: usize,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn from_results(results: Vec<DetectionResult>) -> Self {
        let confidences: Vec<f64> = results.iter().map(|r| r.confidence as f64).collect();
        let avg_confidence = mean(&confidences).map(|m| m.round() as u8).unwrap_or(0);
        let categories = results.iter().map(|r| r.item.category).unique().count();
        let recommendations = results
            .iter()
            .map(|r| Recommendation {
                name: r.item.name,
                advice: r.item.recycling,
            })
            .collect();

        Self {
            items_detected: results.len(),
            avg_confidence,
            categories,
            recommendations,
            results,
        }
    }

    pub fn headline(&self) -> String {
        format!("Detected {} waste item(s)!", self.items_detected)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub report: AnalysisReport,
}

/// Detections made during this session, oldest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionHistory {
    entries: Vec<HistoryEntry>,
}

impl DetectionHistory {
    pub fn record(&mut self, report: AnalysisReport) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            timestamp: Local::now(),
            report,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.entries.iter().map(|e| e.report.items_detected).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

use crate::catalog::{Catalog, WasteItem};
use crate::error::SimError;

pub const MIN_CONFIDENCE: i32 = 85;
pub const MAX_CONFIDENCE: i32 = 99;
pub const JITTER: i32 = 3;
pub const MAX_DETECTIONS: i32 = 2;

/// Source of integer draws for the simulator.
///
/// Any [`rand::Rng`] is a draw source; [`ScriptedDraws`] replays fixed values.
pub trait DrawSource {
    /// Uniform integer in `low..=high`
    fn int_in(&mut self, low: i32, high: i32) -> i32;

    /// True with roughly `percent`% probability
    fn chance(&mut self, percent: i32) -> bool {
        self.int_in(0, 99) < percent
    }
}

impl<R: Rng> DrawSource for R {
    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws.
///
/// Values are clamped into the requested range. Once exhausted, `int_in`
/// yields `low` and `chance` yields false, so a live camera stays idle
/// after its script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<i32>,
}

impl ScriptedDraws {
    pub fn new<I: IntoIterator<Item = i32>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DrawSource for ScriptedDraws {
    fn int_in(&mut self, low: i32, high: i32) -> i32 {
        match self.values.pop_front() {
            Some(v) => v.clamp(low, high.max(low)),
            None => low,
        }
    }

    fn chance(&mut self, percent: i32) -> bool {
        self.values
            .pop_front()
            .is_some_and(|v| v.clamp(0, 99) < percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub item: WasteItem,
    pub confidence: u8,
}

pub fn jittered_confidence(base: u8, jitter: i32) -> u8 {
    (base as i32 + jitter).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
}

/// Simulated multi-object classifier over a catalog
#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: Catalog,
}

impl Classifier {
    pub fn new(catalog: Catalog) -> Result<Self, SimError> {
        if catalog.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produces one or two detections, highest confidence first.
    ///
    /// Draw order: one count draw, then `(index, jitter)` per detection.
    /// Items are picked with replacement.
    pub fn detect<D: DrawSource + ?Sized>(&self, draws: &mut D) -> Vec<DetectionResult> {
        let items = self.catalog.all_items();
        let count = draws.int_in(1, MAX_DETECTIONS);

        let mut results: Vec<DetectionResult> = (0..count)
            .map(|_| {
                let idx = draws.int_in(0, items.len() as i32 - 1) as usize;
                let jitter = draws.int_in(-JITTER, JITTER);
                let item = items[idx.min(items.len() - 1)];
                let confidence = jittered_confidence(item.base_confidence, jitter);
                debug!(item = item.name, jitter, confidence, "drew detection");
                DetectionResult { item, confidence }
            })
            .collect();

        // sort_by is stable: equal confidences keep draw order
        results.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        results
    }
}

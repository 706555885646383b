use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, CategoryTag, WasteItem};
use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropOutcome {
    pub correct: bool,
}

/// Checks a dragged item against the bin it was dropped on
pub fn validate_drop(item: &WasteItem, zone: CategoryTag) -> DropOutcome {
    DropOutcome {
        correct: item.category == zone,
    }
}

/// Like [`validate_drop`] for a zone given as text; an unknown zone is a mismatch.
pub fn validate_drop_tag(item: &WasteItem, zone: &str) -> DropOutcome {
    match zone.parse::<CategoryTag>() {
        Ok(tag) => validate_drop(item, tag),
        Err(err) => {
            debug!(%err, item = item.name, "drop on unknown zone");
            DropOutcome { correct: false }
        }
    }
}

pub fn is_quiz_complete(total_items: usize, sorted_count: usize) -> bool {
    sorted_count == total_items
}

/// Items laid out on the segregation board
pub const QUIZ_DECK: [&str; 7] = [
    "Banana Peel",
    "PET Plastic Bottle (Water)",
    "Newspaper",
    "Alkaline Battery (AA)",
    "Smartphone",
    "Coffee Grounds",
    "Paint Can (Oil-based)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizDrop {
    pub item: WasteItem,
    pub zone: CategoryTag,
    pub outcome: DropOutcome,
    pub completed: bool,
}

/// Drag-and-drop segregation quiz
#[derive(Debug, Clone)]
pub struct SortingQuiz {
    deck: Vec<WasteItem>,
    sorted: Vec<bool>,
}

impl SortingQuiz {
    pub fn new(deck: Vec<WasteItem>) -> Self {
        let sorted = vec![false; deck.len()];
        Self { deck, sorted }
    }

    /// The standard board; deck names missing from `catalog` are skipped.
    pub fn standard(catalog: &Catalog) -> Self {
        Self::new(
            QUIZ_DECK
                .iter()
                .filter_map(|name| catalog.find(name).copied())
                .collect(),
        )
    }

    pub fn deck(&self) -> &[WasteItem] {
        &self.deck
    }

    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.get(index).copied().unwrap_or(false)
    }

    pub fn sorted_count(&self) -> usize {
        self.sorted.iter().filter(|s| **s).count()
    }

    pub fn is_complete(&self) -> bool {
        is_quiz_complete(self.deck.len(), self.sorted_count())
    }

    /// Items of a zone that have been sorted into it
    pub fn zone_items(&self, zone: CategoryTag) -> impl Iterator<Item = &WasteItem> {
        self.deck
            .iter()
            .zip(self.sorted.iter())
            .filter(move |(item, sorted)| **sorted && item.category == zone)
            .map(|(item, _)| item)
    }

    pub fn drop_item(&mut self, index: usize, zone: CategoryTag) -> Result<QuizDrop, SimError> {
        let item = *self.deck.get(index).ok_or(SimError::UnknownItem(index))?;
        if self.sorted[index] {
            return Err(SimError::AlreadySorted(index));
        }

        let outcome = validate_drop(&item, zone);
        if outcome.correct {
            self.sorted[index] = true;
        }

        let completed = outcome.correct && self.is_complete();
        if completed {
            info!(items = self.deck.len(), "sorting quiz complete");
        }

        Ok(QuizDrop {
            item,
            zone,
            outcome,
            completed,
        })
    }

    pub fn reset(&mut self) {
        self.sorted.iter_mut().for_each(|s| *s = false);
    }
}

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};

use crate::catalog::Catalog;

/// Names offered for selection, optionally restricted to non-toxic plants, in display order.
pub fn list_names(catalog: &Catalog, only_non_toxic: bool) -> Vec<String> {
    let mut names: Vec<String> = catalog
        .iter()
        .filter(|(_, record)| !only_non_toxic || record.is_non_toxic())
        .map(|(name, _)| name.to_string())
        .collect();
    let order = NameOrder::new();
    names.sort_by(|a, b| order.compare(a, b));
    tracing::debug!(only_non_toxic, count = names.len(), "plant names listed");
    names
}

/// Root-locale collation at secondary strength: accents matter, case does not.
/// Collation ties fall back to byte order so distinct names never compare equal.
pub struct NameOrder {
    collator: Option<CollatorBorrowed<'static>>,
}

impl NameOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Secondary);
        let collator = match Collator::try_new(Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(%err, "collator unavailable, falling back to case-folded order");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-collection ordering: eligibility classes, the visible window, and the
//! tail.
//!
//! The visible window is filled greedily one slot at a time (see [`tiers`]).
//! A relaxed pick is never revisited. Once built, the window is committed to
//! the run's [`GlobalMerchState`] so later collections cannot repeat its
//! products or drop groups.

mod partition;
pub mod tiers;

use std::collections::HashSet;

use serde::Serialize;

use crate::classify::ClassifiedProduct;
use crate::facets::{Color, GarmentType};
use crate::state::GlobalMerchState;

pub use partition::{partition, ClassSizes, EligibilityClasses};
use tiers::{pick, recent_colors, SlotContext, SlotTarget};

/// Number of leading window entries written to the debug log.
const LOGGED_WINDOW_ENTRIES: usize = 12;

/// Knobs for sequencing one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Upper bound on the visible window length.
    pub visible_window_size: usize,
    /// How many of the most recent window colors a candidate should avoid.
    /// `0` turns the color preference off.
    pub color_gap_window: usize,
    /// Alternate main garment types with others (main, main, other).
    pub alternate_types: bool,
    /// Zero-based window offset for the special item, if it should be shown.
    pub insert_special_at: Option<usize>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            visible_window_size: 24,
            color_gap_window: 3,
            alternate_types: true,
            insert_special_at: None,
        }
    }
}

/// A visible-window entry, kept for logs and dry runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowEntry {
    pub id: String,
    pub title: String,
    pub color: Option<Color>,
    pub drop_group: Option<String>,
    pub garment_type: GarmentType,
    pub sales_count: u64,
}

impl From<&ClassifiedProduct> for WindowEntry {
    fn from(p: &ClassifiedProduct) -> Self {
        Self {
            id: p.product.id.clone(),
            title: p.product.title.clone(),
            color: p.facets.color,
            drop_group: p.facets.drop_group.clone(),
            garment_type: p.facets.garment_type,
            sales_count: p.facets.sales_count,
        }
    }
}

/// Final ordering for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionPlacement {
    /// Every input product exactly once: window first, then the tail.
    pub ordered_ids: Vec<String>,
    /// The visible window, special item included when it was spliced in.
    pub window: Vec<WindowEntry>,
    pub special_inserted: bool,
    pub class_sizes: ClassSizes,
}

impl CollectionPlacement {
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

/// Orders one collection's classified products and commits its visible
/// window to `global`.
///
/// Never fails: when constraints cannot all be met the soft ones are relaxed,
/// and when no candidate is left the window is simply shorter.
pub fn sequence(
    products: &[ClassifiedProduct],
    config: &SequenceConfig,
    global: &mut GlobalMerchState,
) -> CollectionPlacement {
    let classes = partition(products);
    let class_sizes = classes.sizes();

    let mut window = build_window(&classes.eligible, config, global);

    let special = classes.special.first().copied();
    let special_inserted = match (config.insert_special_at, special) {
        (Some(offset), Some(item)) if can_insert_special(item, offset, &window, config, global) => {
            window.insert(offset, item);
            window.truncate(config.visible_window_size);
            true
        }
        _ => false,
    };

    global.commit(
        window.iter().map(|p| p.id().to_owned()),
        window.iter().filter_map(|p| p.facets.drop_group.clone()),
    );

    let in_window: HashSet<&str> = window.iter().map(|p| p.id()).collect();
    let tail = classes
        .eligible
        .iter()
        .filter(|p| !in_window.contains(p.id()))
        .chain(&classes.insufficient_sizes)
        .chain(&classes.seasonally_excluded)
        .chain(&classes.sold_out)
        .chain(classes.special.iter().filter(|p| !in_window.contains(p.id())));

    let ordered_ids: Vec<String> = window
        .iter()
        .chain(tail)
        .map(|p| p.id().to_owned())
        .collect();

    tracing::info!(
        eligible = class_sizes.eligible,
        insufficient_sizes = class_sizes.insufficient_sizes,
        seasonally_excluded = class_sizes.seasonally_excluded,
        sold_out = class_sizes.sold_out,
        window = window.len(),
        special_inserted,
        "collection sequenced"
    );
    for (position, p) in window.iter().take(LOGGED_WINDOW_ENTRIES).enumerate() {
        tracing::debug!(
            position = position + 1,
            title = %p.product.title,
            color = p.facets.color.map_or("N/A", Color::as_str),
            group = p.facets.drop_group.as_deref().unwrap_or("-"),
            "window entry"
        );
    }

    CollectionPlacement {
        ordered_ids,
        window: window.iter().map(|p| WindowEntry::from(*p)).collect(),
        special_inserted,
        class_sizes,
    }
}

/// Greedily fills the visible window from `eligible` (already in sales order).
fn build_window<'a>(
    eligible: &[&'a ClassifiedProduct],
    config: &SequenceConfig,
    global: &GlobalMerchState,
) -> Vec<&'a ClassifiedProduct> {
    let mut remaining: Vec<&'a ClassifiedProduct> = eligible.to_vec();
    let mut window: Vec<&'a ClassifiedProduct> = Vec::new();
    let mut window_ids: HashSet<&'a str> = HashSet::new();
    let mut window_groups: HashSet<&'a str> = HashSet::new();
    let mut target = config.alternate_types.then_some(SlotTarget::START);

    while window.len() < config.visible_window_size {
        let recent = recent_colors(&window, config.color_gap_window);
        let ctx = SlotContext {
            global,
            window_ids: &window_ids,
            window_groups: &window_groups,
            recent_colors: &recent,
            target,
        };
        let Some(idx) = pick(&remaining, &ctx) else {
            break;
        };

        let chosen = remaining.remove(idx);
        window_ids.insert(chosen.id());
        if let Some(group) = chosen.facets.drop_group.as_deref() {
            window_groups.insert(group);
        }
        window.push(chosen);
        target = target.map(SlotTarget::advance);
    }

    window
}

/// The special item goes in only when the window already reaches `offset`,
/// the offset lies inside the window bound, and neither the item nor its
/// drop group has been shown yet.
fn can_insert_special(
    item: &ClassifiedProduct,
    offset: usize,
    window: &[&ClassifiedProduct],
    config: &SequenceConfig,
    global: &GlobalMerchState,
) -> bool {
    window.len() >= offset
        && offset < config.visible_window_size
        && !global.is_product_placed(item.id())
        && item.facets.drop_group.as_deref().is_none_or(|group| {
            !global.is_group_placed(group)
                && window
                    .iter()
                    .all(|p| p.facets.drop_group.as_deref() != Some(group))
        })
}

#[cfg(test)]
#[path = "../sequence_test.rs"]
mod tests;

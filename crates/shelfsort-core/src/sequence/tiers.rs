//! Candidate filters for filling one visible-window slot.
//!
//! Hard constraints (product and drop-group dedupe) apply on every tier.
//! The soft ones (slot garment type, color gap) are dropped tier by tier
//! until some candidate passes.

use std::collections::HashSet;

use crate::classify::ClassifiedProduct;
use crate::facets::{Color, GarmentType};
use crate::state::GlobalMerchState;

/// Garment type wanted for the next slot when alternation is on.
///
/// Cycles main, main, other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTarget {
    NeedMain { remaining: u8 },
    NeedOther,
}

impl SlotTarget {
    pub const START: Self = Self::NeedMain { remaining: 2 };

    /// State for the slot after a successful placement.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Self::NeedMain { remaining } if remaining > 1 => Self::NeedMain {
                remaining: remaining - 1,
            },
            Self::NeedMain { .. } => Self::NeedOther,
            Self::NeedOther => Self::START,
        }
    }

    #[must_use]
    pub fn accepts(self, garment: GarmentType) -> bool {
        match self {
            Self::NeedMain { .. } => garment.is_main(),
            Self::NeedOther => !garment.is_main(),
        }
    }
}

/// Which soft constraints a pass over the candidates enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub respect_type: bool,
    pub respect_color: bool,
}

/// Strictest first. The first tier with a passing candidate wins.
pub const TIERS: [Tier; 4] = [
    Tier {
        respect_type: true,
        respect_color: true,
    },
    Tier {
        respect_type: true,
        respect_color: false,
    },
    Tier {
        respect_type: false,
        respect_color: true,
    },
    Tier {
        respect_type: false,
        respect_color: false,
    },
];

/// What the window looks like while choosing the next slot.
#[derive(Debug)]
pub struct SlotContext<'a> {
    pub global: &'a GlobalMerchState,
    pub window_ids: &'a HashSet<&'a str>,
    pub window_groups: &'a HashSet<&'a str>,
    /// Most recent first; see [`recent_colors`].
    pub recent_colors: &'a [Color],
    /// `None` when alternation is off.
    pub target: Option<SlotTarget>,
}

/// Product and drop-group dedupe against the run and the current window.
#[must_use]
pub fn is_placeable(candidate: &ClassifiedProduct, ctx: &SlotContext<'_>) -> bool {
    let id = candidate.id();
    if ctx.global.is_product_placed(id) || ctx.window_ids.contains(id) {
        return false;
    }
    match candidate.facets.drop_group.as_deref() {
        Some(group) => !ctx.global.is_group_placed(group) && !ctx.window_groups.contains(group),
        None => true,
    }
}

/// Colorless products always pass.
#[must_use]
pub fn passes_color_gap(candidate: &ClassifiedProduct, recent_colors: &[Color]) -> bool {
    candidate
        .facets
        .color
        .is_none_or(|color| !recent_colors.contains(&color))
}

#[must_use]
pub fn matches_target(candidate: &ClassifiedProduct, target: Option<SlotTarget>) -> bool {
    target.is_none_or(|t| t.accepts(candidate.facets.garment_type))
}

#[must_use]
pub fn tier_accepts(tier: Tier, candidate: &ClassifiedProduct, ctx: &SlotContext<'_>) -> bool {
    is_placeable(candidate, ctx)
        && (!tier.respect_type || matches_target(candidate, ctx.target))
        && (!tier.respect_color || passes_color_gap(candidate, ctx.recent_colors))
}

/// Index into `candidates` of the product for the next slot, or `None` when
/// no candidate satisfies the hard constraints.
#[must_use]
pub fn pick(candidates: &[&ClassifiedProduct], ctx: &SlotContext<'_>) -> Option<usize> {
    TIERS.iter().find_map(|&tier| {
        candidates
            .iter()
            .position(|candidate| tier_accepts(tier, candidate, ctx))
    })
}

/// The last `gap` colors placed in `window`, most recent first. Colorless
/// entries are skipped and do not count toward `gap`.
#[must_use]
pub fn recent_colors(window: &[&ClassifiedProduct], gap: usize) -> Vec<Color> {
    window
        .iter()
        .rev()
        .filter_map(|p| p.facets.color)
        .take(gap)
        .collect()
}

//! Mapping of Admin API nodes into `shelfsort-core` domain types.

use shelfsort_core::{Product, Variant};

use crate::types::{ProductNode, SelectedOption, VariantNode};

/// Option names treated as the size axis, compared case-insensitively.
const SIZE_OPTION_NAMES: [&str; 2] = ["size", "talla"];

/// Returns the value of the variant's size option, if it has one.
///
/// Blank values are treated as absent.
#[must_use]
pub fn size_option(options: &[SelectedOption]) -> Option<String> {
    options
        .iter()
        .find(|o| {
            SIZE_OPTION_NAMES
                .iter()
                .any(|name| o.name.trim().eq_ignore_ascii_case(name))
        })
        .map(|o| o.value.trim())
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

fn normalize_variant(node: &VariantNode) -> Variant {
    Variant {
        inventory_quantity: node.inventory_quantity.unwrap_or(0),
        size: size_option(&node.selected_options),
    }
}

/// Converts a product node into a core [`Product`].
///
/// A missing `totalInventory` is read as zero.
#[must_use]
pub fn normalize_product(node: ProductNode) -> Product {
    let variants = node.variants.nodes.iter().map(normalize_variant).collect();
    Product {
        id: node.id,
        title: node.title,
        tags: node.tags,
        total_inventory: node.total_inventory.unwrap_or(0),
        tracks_inventory: node.tracks_inventory,
        variants,
    }
}

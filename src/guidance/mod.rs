//! Directional guidance data: loading, normalisation and lookup.
//!
//! Guidance arrives as named sets, one per room category. A set is either a
//! list of records that carry their own direction or a mapping keyed by
//! direction text; both shapes collapse into the same [`GuidanceCatalog`].

mod catalog;
mod normalize;

pub use catalog::{GuidanceCatalog, GuidanceEntry, GuidanceSet};
pub use normalize::{DEFAULT_ZONE, normalize_direction_key, normalize_zone, split_list};

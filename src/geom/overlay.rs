use std::collections::BTreeMap;

use geo::{Area, BooleanOps, BoundingRect, MultiPolygon};
use rstar::RTree;

use super::BoundingBox;

/// Intersect every source polygon with every overlapping mask polygon.
/// Returns `(source index, fragment)` pairs; empty and zero-area fragments are dropped.
/// Candidate pairs come from an R-tree over the mask bounding boxes.
pub fn overlay_intersection(sources: &[MultiPolygon<f64>], masks: &[MultiPolygon<f64>]) -> Vec<(usize, MultiPolygon<f64>)> {
    let rtree = RTree::bulk_load(
        masks.iter().enumerate()
            .filter_map(|(i, mask)| mask.bounding_rect().map(|bbox| BoundingBox::new(i, bbox)))
            .collect()
    );

    sources.iter().enumerate()
        .filter_map(|(i, source)| source.bounding_rect().map(|bbox| (i, source, bbox)))
        .flat_map(|(i, source, bbox)| {
            rtree.locate_in_envelope_intersecting(&BoundingBox::aabb(&bbox))
                .map(move |candidate| (i, source.intersection(&masks[candidate.idx()])))
                .collect::<Vec<_>>()
        })
        .filter(|(_, fragment)| !fragment.0.is_empty() && fragment.unsigned_area() > 0.0)
        .collect()
}

/// Union all fragments sharing a key into one (possibly multi-part) polygon per key.
/// A key with a single fragment keeps that fragment unchanged, so dissolving is idempotent.
pub fn dissolve<K: Ord>(fragments: impl IntoIterator<Item = (K, MultiPolygon<f64>)>) -> BTreeMap<K, MultiPolygon<f64>> {
    let mut groups: BTreeMap<K, Vec<MultiPolygon<f64>>> = BTreeMap::new();
    for (key, fragment) in fragments {
        groups.entry(key).or_default().push(fragment);
    }

    groups.into_iter()
        .filter_map(|(key, parts)| {
            parts.into_iter()
                .reduce(|a, b| a.union(&b))
                .map(|shape| (key, shape))
        })
        .collect()
}

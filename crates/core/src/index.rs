//! Bulk-loaded spatial index over one annotation set.
//!
//! Built once per comparison with a static geo-index R-tree (Hilbert-sorted
//! packing), then queried with the probe set's boxes. Queries are a broad
//! phase: they return every entry whose envelope touches the query
//! rectangle, and callers re-check overlap with `geometry::similarity`.

use geo_index::rtree::sort::HilbertSort;
use geo_index::rtree::{RTree, RTreeBuilder, RTreeIndex};

use crate::annotation::{Annotation, BoundingBox};
use crate::error::{Result, ValidationError};
use crate::geometry::HasBBox;

/// An annotation stored in the index, tagged with its position in the input set.
#[derive(Clone, Copy, Debug)]
pub struct IndexedAnnotation<'a> {
    pub id: usize,
    pub bbox: BoundingBox,
    pub annotation: &'a Annotation,
}

impl IndexedAnnotation<'_> {
    pub fn label(&self) -> &str {
        &self.annotation.label
    }
}

impl HasBBox for IndexedAnnotation<'_> {
    fn x0(&self) -> f64 {
        self.bbox.x0()
    }

    fn y0(&self) -> f64 {
        self.bbox.y0()
    }

    fn x1(&self) -> f64 {
        self.bbox.x1()
    }

    fn y1(&self) -> f64 {
        self.bbox.y1()
    }
}

/// Immutable R-tree of labelled rectangles.
pub struct AnnotationIndex<'a> {
    /// Entries in input order (id == index)
    entries: Vec<IndexedAnnotation<'a>>,
    /// None for an empty set
    tree: Option<RTree<f64>>,
}

impl<'a> AnnotationIndex<'a> {
    /// Bulk-loads every annotation's bounding box.
    ///
    /// Every annotation must carry a bounding box; the set is not otherwise
    /// validated here.
    pub fn build(annotations: &'a [Annotation]) -> Result<Self> {
        let mut entries = Vec::with_capacity(annotations.len());
        for (id, annotation) in annotations.iter().enumerate() {
            let bbox = annotation
                .bounding_box
                .ok_or_else(|| ValidationError::MissingBoundingBox {
                    field: format!("annotations[{id}].boundingBox"),
                })?;
            entries.push(IndexedAnnotation {
                id,
                bbox,
                annotation,
            });
        }

        if entries.is_empty() {
            return Ok(Self {
                entries,
                tree: None,
            });
        }

        let count =
            u32::try_from(entries.len()).map_err(|_| ValidationError::TooManyAnnotations {
                field: "annotations".to_string(),
                count: entries.len(),
            })?;
        let mut builder: RTreeBuilder<f64> = RTreeBuilder::new(count);
        for entry in &entries {
            let (x0, y0, x1, y1) = entry.bbox();
            builder.add(x0, y0, x1, y1);
        }

        Ok(Self {
            entries,
            tree: Some(builder.finish::<HilbertSort>()),
        })
    }

    /// Finds entries whose rectangle may overlap `rect`, in input order.
    ///
    /// Rectangles that merely touch `rect` are included.
    pub fn query(&self, rect: &BoundingBox) -> Vec<&IndexedAnnotation<'a>> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let (x0, y0, x1, y1) = rect.bbox();
        let mut ids: Vec<usize> = tree
            .search(x0, y0, x1, y1)
            .into_iter()
            .map(|id| id as usize)
            .collect();
        // Stable order by id for determinism
        ids.sort_unstable();
        ids.into_iter().map(|id| &self.entries[id]).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedAnnotation<'a>> {
        self.entries.iter()
    }
}

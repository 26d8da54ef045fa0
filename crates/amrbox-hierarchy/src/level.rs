//! Level descriptors: the canonical boxes of one refinement level.

use crate::error::HierarchyError;
use amrbox_config::LevelSpec;
use amrbox_core::{Index, LevelNumber};
use amrbox_geom::{boxset, BoxError, IndexBox};

/// One refinement level, normalized.
///
/// Whatever shape the boxes were written in (built boxes, corner pairs,
/// named boxes), a `Level` holds a plain `Vec<IndexBox>` in the order the
/// boxes were given. A constructed `Level` is internally consistent: every
/// box has the domain's dimensionality, lies inside the domain, and no two
/// boxes overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    number: LevelNumber,
    boxes: Vec<IndexBox>,
    names: Vec<Option<String>>,
}

impl Level {
    /// Normalize the boxes of `spec` and check them against `domain`, the
    /// level's extent in its own index space.
    ///
    /// Boxes are converted in order; the first that fails is reported.
    /// Then, in order: any overlapping pair rejects with
    /// [`HierarchyError::Overlap`], any box outside the domain with
    /// [`HierarchyError::OutOfDomain`].
    pub fn from_spec(
        number: LevelNumber,
        spec: &LevelSpec,
        domain: &[Index],
    ) -> Result<Self, HierarchyError> {
        let mut boxes = Vec::with_capacity(spec.boxes.len());
        let mut names = Vec::with_capacity(spec.boxes.len());
        for (index, entry) in spec.boxes.iter().enumerate() {
            let b = entry.spec.to_box().map_err(|source| HierarchyError::Box {
                level: number,
                index,
                source,
            })?;
            boxes.push(b);
            names.push(entry.name.clone());
        }
        Self::checked(number, boxes, names, domain)
    }

    /// Build a level from already-constructed boxes, with the same checks
    /// as [`from_spec`](Self::from_spec).
    pub fn new(
        number: LevelNumber,
        boxes: Vec<IndexBox>,
        domain: &[Index],
    ) -> Result<Self, HierarchyError> {
        let names = vec![None; boxes.len()];
        Self::checked(number, boxes, names, domain)
    }

    fn checked(
        number: LevelNumber,
        boxes: Vec<IndexBox>,
        names: Vec<Option<String>>,
        domain: &[Index],
    ) -> Result<Self, HierarchyError> {
        if let Some((index, b)) = boxes
            .iter()
            .enumerate()
            .find(|(_, b)| b.ndim() != domain.len())
        {
            return Err(HierarchyError::Box {
                level: number,
                index,
                source: BoxError::DimensionMismatch {
                    expected: domain.len(),
                    got: b.ndim(),
                },
            });
        }
        if let Some((first, second)) = boxset::first_overlap(&boxes) {
            return Err(HierarchyError::Overlap {
                level: number,
                first,
                second,
            });
        }
        if let Some(index) = boxset::first_outside_domain(&boxes, domain) {
            return Err(HierarchyError::OutOfDomain {
                level: number,
                index,
                region: boxes[index].clone(),
                cells: domain.into(),
            });
        }
        tracing::trace!(level = %number, boxes = boxes.len(), "level normalized");
        Ok(Self {
            number,
            boxes,
            names,
        })
    }

    /// The level number.
    pub fn number(&self) -> LevelNumber {
        self.number
    }

    /// Boxes in the order they were given.
    pub fn boxes(&self) -> &[IndexBox] {
        &self.boxes
    }

    /// Name of box `index`, if it was given in a named-box map.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|n| n.as_deref())
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the level has no boxes. Never true for a level built from a
    /// configuration.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Smallest box covering every box of the level.
    pub fn extent(&self) -> Option<IndexBox> {
        boxset::bounding_box(&self.boxes)
    }

    /// Cells covered by the level's boxes.
    pub fn cell_count(&self) -> u64 {
        boxset::total_cells(&self.boxes)
    }
}

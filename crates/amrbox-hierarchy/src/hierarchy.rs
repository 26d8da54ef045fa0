//! The accepted hierarchy and its mesh levels.

use crate::level::Level;
use amrbox_config::{ConfigValue, PatchPolicy};
use amrbox_core::{Index, IndexVec, LevelNumber};
use amrbox_geom::{boxset, tile_boxes, IndexBox};
use indexmap::IndexMap;

/// A hierarchy that passed every check.
///
/// Only [`validate`](fn@crate::validate) and
/// [`validate_config`](crate::validate_config) construct one, so holding a
/// `ValidatedHierarchy` is proof that its levels are nested, disjoint, and
/// inside their domains.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedHierarchy {
    pub(crate) cells: IndexVec,
    pub(crate) root: IndexBox,
    pub(crate) interp_order: u8,
    pub(crate) refinement_ratio: Index,
    pub(crate) policy: PatchPolicy,
    pub(crate) levels: Vec<Level>,
    /// `refined[k]` is `levels[k]` mapped into mesh level `k + 1`.
    pub(crate) refined: Vec<Vec<IndexBox>>,
    pub(crate) passthrough: IndexMap<String, ConfigValue>,
}

impl ValidatedHierarchy {
    /// Number of spatial dimensions.
    pub fn ndim(&self) -> usize {
        self.cells.len()
    }

    /// Root-domain extent per axis.
    pub fn cells(&self) -> &[Index] {
        &self.cells
    }

    /// The root domain as a box.
    pub fn root(&self) -> &IndexBox {
        &self.root
    }

    /// Interpolation order the patch policy was resolved for.
    pub fn interp_order(&self) -> u8 {
        self.interp_order
    }

    /// Index-space ratio between consecutive levels.
    pub fn refinement_ratio(&self) -> Index {
        self.refinement_ratio
    }

    /// Resolved patch-size policy.
    pub fn policy(&self) -> &PatchPolicy {
        &self.policy
    }

    /// Refinement-box levels, coarsest first. Empty when the configuration
    /// had no refinement boxes.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The refinement-box level `number`, if present.
    pub fn level(&self, number: LevelNumber) -> Option<&Level> {
        self.levels.get(number.index())
    }

    /// Pass-through options, in input order.
    pub fn passthrough(&self) -> &IndexMap<String, ConfigValue> {
        &self.passthrough
    }

    /// Number of mesh levels: the root plus one per refinement-box level.
    pub fn mesh_level_count(&self) -> usize {
        self.levels.len() + 1
    }

    /// Domain extent of refinement-box level `number`, in its own index
    /// space. Saturates at [`Index::MAX`] for levels deeper than the
    /// hierarchy.
    pub fn domain_of(&self, number: LevelNumber) -> IndexVec {
        let scale = self.refinement_ratio.max(1).saturating_pow(number.0);
        self.cells.iter().map(|&n| n.saturating_mul(scale)).collect()
    }

    /// Every mesh level, coarsest first, tiled into patches.
    ///
    /// Mesh level 0 is the whole root domain. Mesh level `k + 1` is the
    /// refinement of the boxes given for `Lk`. The tiling is deterministic.
    pub fn mesh_levels(&self) -> Vec<MeshLevel> {
        let root = std::iter::once(vec![self.root.clone()]);
        root.chain(self.refined.iter().cloned())
            .enumerate()
            .map(|(k, boxes)| {
                let patches = tile_boxes(&boxes, self.policy.smallest(), self.policy.largest());
                MeshLevel {
                    number: k,
                    boxes,
                    patches,
                }
            })
            .collect()
    }

    /// Total patch count over every mesh level.
    pub fn patch_count(&self) -> usize {
        self.mesh_levels().iter().map(|m| m.patches.len()).sum()
    }
}

/// One level of the simulation mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshLevel {
    /// Mesh level index; 0 is the root.
    pub number: usize,
    /// Refined regions in this level's index space.
    pub boxes: Vec<IndexBox>,
    /// `boxes` cut into patches.
    pub patches: Vec<IndexBox>,
}

impl MeshLevel {
    /// Cells covered by this mesh level.
    pub fn cell_count(&self) -> u64 {
        boxset::total_cells(&self.boxes)
    }
}

/// `cells * ratio^k` per axis, or `None` if it does not fit in an [`Index`].
pub(crate) fn level_domain(
    cells: &[Index],
    ratio: Index,
    number: LevelNumber,
) -> Option<IndexVec> {
    let scale = ratio.max(1).checked_pow(number.0)?;
    cells.iter().map(|&n| n.checked_mul(scale)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(cells: &[Index], ratio: Index, k: u32) -> Option<Vec<Index>> {
        level_domain(cells, ratio, LevelNumber(k)).map(|d| d.to_vec())
    }

    #[test]
    fn level_domain_scales_by_ratio_power() {
        assert_eq!(domain(&[65], 2, 0), Some(vec![65]));
        assert_eq!(domain(&[65], 2, 2), Some(vec![260]));
        assert_eq!(domain(&[10, 20], 3, 1), Some(vec![30, 60]));
        assert_eq!(domain(&[65], 1, 5), Some(vec![65]));
    }

    #[test]
    fn level_domain_outside_index_range() {
        assert_eq!(domain(&[65], 2, 200), None);
        assert_eq!(domain(&[1, Index::MAX], 2, 1), None);
        assert_eq!(domain(&[Index::MAX / 2], 2, 1), Some(vec![Index::MAX - 1]));
        assert_eq!(domain(&[Index::MAX], 1, 40), Some(vec![Index::MAX]));
    }
}

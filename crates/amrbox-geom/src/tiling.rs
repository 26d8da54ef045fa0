//! Deterministic patch tiling.
//!
//! An accepted level is cut into patches axis by axis. Along an axis of
//! extent `n`, the chunk count is `ceil(n / largest)`; if that would leave
//! chunks narrower than `smallest`, it falls back to `max(1, n / smallest)`.
//! Chunks differ in width by at most one cell, wider chunks first.
//!
//! A box narrower than `smallest` becomes a single patch. Nothing here
//! assumes a minimum number of patches: one patch for a whole level is a
//! legal outcome.

use crate::index_box::IndexBox;
use amrbox_core::{Index, IndexVec};
use smallvec::SmallVec;

type Chunks = SmallVec<[(Index, Index); 8]>;

/// Split `b` into patches.
///
/// `smallest` and `largest` hold one entry per axis of `b`; `largest = None`
/// leaves every axis unsplit. Patches are returned in row-major order (the
/// last axis varies fastest) and exactly partition `b`.
pub fn tile_box(b: &IndexBox, smallest: &[Index], largest: Option<&[Index]>) -> Vec<IndexBox> {
    let per_axis: SmallVec<[Chunks; 3]> = (0..b.ndim())
        .map(|axis| {
            let min = smallest.get(axis).copied().unwrap_or(1);
            let max = largest.and_then(|l| l.get(axis).copied());
            split_axis(b.lower()[axis], b.upper()[axis], min, max)
        })
        .collect();

    let mut patches = Vec::with_capacity(per_axis.iter().map(|c| c.len()).product());
    let mut cursor: SmallVec<[usize; 3]> = smallvec::smallvec![0; per_axis.len()];
    loop {
        let lower: IndexVec = cursor
            .iter()
            .zip(&per_axis)
            .map(|(&i, chunks)| chunks[i].0)
            .collect();
        let upper: IndexVec = cursor
            .iter()
            .zip(&per_axis)
            .map(|(&i, chunks)| chunks[i].1)
            .collect();
        patches.push(IndexBox::from_valid_corners(lower, upper));

        // Odometer increment, last axis fastest.
        let mut axis = per_axis.len();
        loop {
            if axis == 0 {
                return patches;
            }
            axis -= 1;
            cursor[axis] += 1;
            if cursor[axis] < per_axis[axis].len() {
                break;
            }
            cursor[axis] = 0;
        }
    }
}

/// Tile every box of a level, concatenating the patches in box order.
pub fn tile_boxes(
    boxes: &[IndexBox],
    smallest: &[Index],
    largest: Option<&[Index]>,
) -> Vec<IndexBox> {
    boxes
        .iter()
        .flat_map(|b| tile_box(b, smallest, largest))
        .collect()
}

fn split_axis(lo: Index, hi: Index, smallest: Index, largest: Option<Index>) -> Chunks {
    let n = hi - lo + 1;
    let smallest = smallest.max(1);
    let mut count = match largest {
        Some(l) if n > l.max(1) => {
            let l = l.max(1);
            n / l + Index::from(n % l != 0)
        }
        _ => 1,
    };
    if count > 1 && n / count < smallest {
        count = (n / smallest).max(1);
    }

    let base = n / count;
    let remainder = n % count;
    let mut chunks = Chunks::new();
    let mut start = lo;
    for i in 0..count {
        let width = base + Index::from(i < remainder);
        chunks.push((start, start + (width - 1)));
        start = start.saturating_add(width);
    }
    chunks
}

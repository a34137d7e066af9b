// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry engine: effective rectangles, 3×3 partitioning, distance chains, and tiered ranking.
//!
//! ## Overview
//!
//! Everything here is pure and works on [`NavRect`] values computed fresh for
//! each navigation pass. The [`resolver`](crate::resolver) composes these
//! pieces into a per-direction ranking.
//!
//! ## Partition layout
//!
//! [`partition`] sorts candidates into nine groups around a reference rect,
//! by comparing each candidate's *center* against the reference's edges:
//!
//! ```text
//!   0 | 1 | 2      above
//!  ---+---+---
//!   3 | 4 | 5      same band
//!  ---+---+---
//!   6 | 7 | 8      below
//! ```
//!
//! A corner candidate whose rectangle overlaps the reference's straight band
//! by at least `threshold` of the reference's width or height is also copied
//! into the adjacent straight group.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect};

/// An axis-aligned box plus the single point used for all distance math.
///
/// The center is `origin + floor(extent / 2)` on each axis. The rounding is
/// asymmetric and takes part in tie-breaking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavRect {
    /// Bounding box, normalized so that `x0 <= x1` and `y0 <= y1`.
    pub rect: Rect,
    /// Effective position.
    pub center: Point,
}

impl NavRect {
    /// Build from a measured box. Returns `None` for non-finite input.
    pub fn new(rect: Rect) -> Option<Self> {
        if !rect.is_finite() {
            return None;
        }
        let rect = rect.abs();
        let center = Point::new(
            rect.x0 + floor_half(rect.width()),
            rect.y0 + floor_half(rect.height()),
        );
        Some(Self { rect, center })
    }

    /// A zero-size rect at `p`.
    pub fn point(p: Point) -> Self {
        Self {
            rect: Rect::from_points(p, p),
            center: p,
        }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.rect.x0
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f64 {
        self.rect.y0
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.rect.x1
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.rect.y1
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }
}

// `extent` is non-negative after `Rect::abs`, so truncation is floor.
fn floor_half(extent: f64) -> f64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Screen extents are far below i64::MAX; the cast is the floor."
    )]
    let half = (extent / 2.0) as i64;
    half as f64
}

/// Measure `element` and derive its [`NavRect`].
///
/// Returns `None` when the measurement is unavailable (for example a detached
/// element) or not finite.
pub fn compute_rect<E, M>(element: E, measure: M) -> Option<NavRect>
where
    M: FnOnce(E) -> Option<Rect>,
{
    measure(element).and_then(NavRect::new)
}

/// An element handle with the rect computed for the current pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate<E> {
    /// Opaque element handle.
    pub element: E,
    /// Effective rect for this pass.
    pub rect: NavRect,
}

/// The nine partition groups, indexed as in the [module docs](self).
pub type Groups<E> = [Vec<Candidate<E>>; 9];

/// Partition `candidates` around `target`.
///
/// Overlap tests compare absolute edge positions and are half-open:
/// `rect.left <= target.right - target.width * threshold` and its mirrors.
pub fn partition<E: Copy>(
    candidates: &[Candidate<E>],
    target: &NavRect,
    straight_overlap_threshold: f64,
) -> Groups<E> {
    let mut groups: Groups<E> = core::array::from_fn(|_| Vec::new());
    let t = straight_overlap_threshold;
    for c in candidates {
        let r = &c.rect;
        let x = if r.center.x < target.left() {
            0
        } else if r.center.x <= target.right() {
            1
        } else {
            2
        };
        let y = if r.center.y < target.top() {
            0
        } else if r.center.y <= target.bottom() {
            1
        } else {
            2
        };
        let id = y * 3 + x;
        groups[id].push(*c);

        if !matches!(id, 0 | 2 | 6 | 8) {
            continue;
        }
        if r.left() <= target.right() - target.width() * t {
            match id {
                2 => groups[1].push(*c),
                8 => groups[7].push(*c),
                _ => {}
            }
        }
        if r.right() >= target.left() + target.width() * t {
            match id {
                0 => groups[1].push(*c),
                6 => groups[7].push(*c),
                _ => {}
            }
        }
        if r.top() <= target.bottom() - target.height() * t {
            match id {
                6 => groups[3].push(*c),
                8 => groups[5].push(*c),
                _ => {}
            }
        }
        if r.bottom() >= target.top() + target.height() * t {
            match id {
                0 => groups[3].push(*c),
                2 => groups[5].push(*c),
                _ => {}
            }
        }
    }
    groups
}

/// A distance measure relative to a fixed target; smaller is better for all variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Distance {
    /// Horizontal gap to the target's vertical centerline, zero when overlapping it.
    NearPlumbLine,
    /// Vertical gap to the target's horizontal centerline, zero when overlapping it.
    NearHorizon,
    /// Horizontal gap to the target's left edge, from whichever side the candidate is on.
    NearTargetLeft,
    /// Vertical gap to the target's top edge, from whichever side the candidate is on.
    NearTargetTop,
    /// Candidate's top edge.
    Top,
    /// Negated bottom edge.
    Bottom,
    /// Candidate's left edge.
    Left,
    /// Negated right edge.
    Right,
}

impl Distance {
    /// Evaluate this measure for `rect` against `target`.
    pub fn measure(self, target: &NavRect, rect: &NavRect) -> f64 {
        match self {
            Self::NearPlumbLine => {
                let d = if rect.center.x < target.center.x {
                    target.center.x - rect.right()
                } else {
                    rect.left() - target.center.x
                };
                d.max(0.0)
            }
            Self::NearHorizon => {
                let d = if rect.center.y < target.center.y {
                    target.center.y - rect.bottom()
                } else {
                    rect.top() - target.center.y
                };
                d.max(0.0)
            }
            Self::NearTargetLeft => {
                let d = if rect.center.x < target.center.x {
                    target.left() - rect.right()
                } else {
                    rect.left() - target.left()
                };
                d.max(0.0)
            }
            Self::NearTargetTop => {
                let d = if rect.center.y < target.center.y {
                    target.top() - rect.bottom()
                } else {
                    rect.top() - target.top()
                };
                d.max(0.0)
            }
            Self::Top => rect.top(),
            Self::Bottom => -rect.bottom(),
            Self::Left => rect.left(),
            Self::Right => -rect.right(),
        }
    }
}

/// A ranking tier: a candidate subgroup and the distance chain that orders it.
#[derive(Clone, Debug)]
pub struct Priority<E> {
    /// Candidates in this tier.
    pub group: Vec<Candidate<E>>,
    /// Lexicographic tie-break chain.
    pub distance: &'static [Distance],
}

/// Lexicographic comparison of two candidates over a distance chain.
///
/// Stops at the first measure whose difference is nonzero. A NaN difference
/// counts as a tie and moves on to the next measure.
pub fn compare_by_chain<E>(
    chain: &[Distance],
    target: &NavRect,
    a: &Candidate<E>,
    b: &Candidate<E>,
) -> Ordering {
    for d in chain {
        let delta = d.measure(target, &a.rect) - d.measure(target, &b.rect);
        if delta < 0.0 {
            return Ordering::Less;
        }
        if delta > 0.0 {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Pick the first non-empty tier and return its candidates, best first.
///
/// Later tiers are never consulted once an earlier tier has a member, even if
/// they hold a geometrically closer candidate. Fully tied candidates keep
/// their input order.
pub fn prioritize<E>(priorities: Vec<Priority<E>>, target: &NavRect) -> Option<Vec<Candidate<E>>> {
    let Priority {
        mut group,
        distance,
    } = priorities.into_iter().find(|p| !p.group.is_empty())?;
    group.sort_by(|a, b| compare_by_chain(distance, target, a, b));
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn cand(id: u32, x0: f64, y0: f64, x1: f64, y1: f64) -> Candidate<u32> {
        Candidate {
            element: id,
            rect: NavRect::new(Rect::new(x0, y0, x1, y1)).unwrap(),
        }
    }

    fn ids(group: &[Candidate<u32>]) -> Vec<u32> {
        group.iter().map(|c| c.element).collect()
    }

    #[test]
    fn center_is_floor_rounded() {
        let r = NavRect::new(Rect::new(10.0, 20.0, 15.0, 27.0)).unwrap();
        assert_eq!(r.center, Point::new(12.0, 23.0));
    }

    #[test]
    fn inverted_rect_is_normalized() {
        let r = NavRect::new(Rect::new(10.0, 10.0, 0.0, 0.0)).unwrap();
        assert_eq!(r.rect, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(r.center, Point::new(5.0, 5.0));
    }

    #[test]
    fn non_finite_rect_is_unmeasurable() {
        assert!(NavRect::new(Rect::new(f64::NAN, 0.0, 1.0, 1.0)).is_none());
        assert!(compute_rect(1_u32, |_| None).is_none());
        assert!(compute_rect(1_u32, |_| Some(Rect::new(0.0, 0.0, 4.0, 4.0))).is_some());
    }

    #[test]
    fn partition_places_centers_in_grid() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        // One small box per cell, well clear of the band so nothing is promoted.
        let mut cs = Vec::new();
        let xs = [0.0, 140.0, 300.0];
        let ys = [0.0, 140.0, 300.0];
        for (row, y) in ys.iter().enumerate() {
            for (col, x) in xs.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation, reason = "Tiny test indices.")]
                let id = (row * 3 + col) as u32;
                cs.push(cand(id, *x, *y, x + 20.0, y + 20.0));
            }
        }
        let groups = partition(&cs, &target, 0.5);
        for (i, g) in groups.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, reason = "Tiny test indices.")]
            let expected = vec![i as u32];
            assert_eq!(ids(g), expected, "group {i}");
        }
    }

    #[test]
    fn center_on_edge_counts_as_inside() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        // Center x = 200 is on the right edge: column 1.
        let cs = vec![cand(1, 190.0, 140.0, 210.0, 160.0)];
        let groups = partition(&cs, &target, 0.5);
        assert_eq!(ids(&groups[4]), vec![1]);
    }

    #[test]
    fn corner_overlapping_band_is_promoted_to_straight_group() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        // Above-right, center (225, 40), but spans x 130..320: overlaps the
        // vertical band by 70% of the target width.
        let cs = vec![cand(7, 130.0, 0.0, 320.0, 80.0)];
        let groups = partition(&cs, &target, 0.5);
        assert_eq!(ids(&groups[2]), vec![7]);
        assert_eq!(ids(&groups[1]), vec![7]);

        // A stricter threshold rejects the same overlap.
        let groups = partition(&cs, &target, 0.8);
        assert_eq!(ids(&groups[2]), vec![7]);
        assert!(groups[1].is_empty());
    }

    #[test]
    fn corner_promotion_uses_each_axis() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        // Below-left, reaching up into the horizontal band.
        let cs = vec![cand(3, 0.0, 120.0, 60.0, 300.0)];
        let groups = partition(&cs, &target, 0.5);
        assert_eq!(ids(&groups[6]), vec![3]);
        assert_eq!(ids(&groups[3]), vec![3]);
        assert!(groups[7].is_empty());
    }

    #[test]
    fn point_reference_splits_band_by_center() {
        let origin = NavRect::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let reference = NavRect::point(origin.center);
        let cs = vec![cand(1, 0.0, 0.0, 20.0, 20.0), cand(2, 80.0, 80.0, 100.0, 100.0)];
        let groups = partition(&cs, &reference, 0.5);
        assert_eq!(ids(&groups[0]), vec![1]);
        assert_eq!(ids(&groups[8]), vec![2]);
    }

    #[test]
    fn distances_clamp_at_zero_and_negate_far_edges() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        let left = NavRect::new(Rect::new(0.0, 100.0, 50.0, 200.0)).unwrap();
        let overlapping = NavRect::new(Rect::new(120.0, 0.0, 180.0, 50.0)).unwrap();
        assert_eq!(Distance::NearPlumbLine.measure(&target, &left), 100.0);
        assert_eq!(Distance::NearPlumbLine.measure(&target, &overlapping), 0.0);
        assert_eq!(Distance::NearHorizon.measure(&target, &overlapping), 100.0);
        assert_eq!(Distance::NearTargetLeft.measure(&target, &left), 50.0);
        assert_eq!(Distance::NearTargetTop.measure(&target, &overlapping), 50.0);
        assert_eq!(Distance::Bottom.measure(&target, &left), -200.0);
        assert_eq!(Distance::Right.measure(&target, &left), -50.0);
    }

    #[test]
    fn earlier_tier_wins_even_if_farther() {
        let target = NavRect::new(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap();
        let far = cand(1, 900.0, 100.0, 950.0, 200.0);
        let near = cand(2, 210.0, 100.0, 220.0, 200.0);
        let out = prioritize(
            vec![
                Priority {
                    group: vec![],
                    distance: &[Distance::NearPlumbLine],
                },
                Priority {
                    group: vec![far],
                    distance: &[Distance::NearPlumbLine],
                },
                Priority {
                    group: vec![near],
                    distance: &[Distance::NearPlumbLine],
                },
            ],
            &target,
        )
        .unwrap();
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn chain_breaks_ties_lexicographically() {
        let target = NavRect::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        // Same plumb-line distance; lower top wins on the second measure.
        let a = cand(1, 150.0, 60.0, 200.0, 90.0);
        let b = cand(2, 150.0, 10.0, 200.0, 40.0);
        let c = cand(3, 120.0, 80.0, 140.0, 90.0);
        let out = prioritize(
            vec![Priority {
                group: vec![a, b, c],
                distance: &[Distance::NearPlumbLine, Distance::Top],
            }],
            &target,
        )
        .unwrap();
        assert_eq!(ids(&out), vec![3, 2, 1]);
    }

    #[test]
    fn all_empty_tiers_yield_none() {
        let target = NavRect::new(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let out = prioritize::<u32>(
            vec![Priority {
                group: vec![],
                distance: &[Distance::Top],
            }],
            &target,
        );
        assert!(out.is_none());
    }
}

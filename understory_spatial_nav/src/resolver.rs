// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation resolver: rank a candidate set for one direction and pick the destination.
//!
//! ## Overview
//!
//! [`navigate`] measures the origin and candidates, partitions them with
//! [`partition`](crate::geometry::partition), and builds three tiers per
//! direction:
//!
//! | Direction | Tier 1 (internal) | Tier 2 (straight) | Tier 3 (oblique) |
//! |-----------|-------------------|-------------------|------------------|
//! | left      | internal 0, 3, 6  | 3                 | 0, 6             |
//! | right     | internal 2, 5, 8  | 5                 | 2, 8             |
//! | up        | internal 0, 1, 2  | 1                 | 0, 2             |
//! | down      | internal 6, 7, 8  | 7                 | 6, 8             |
//!
//! "Internal" groups come from a second partition of group 4 (candidates
//! overlapping the origin) around the origin's center point.
//! With `straight_only`, tier 3 is dropped.
//!
//! ## Remember source
//!
//! When enabled, and the [`Previous`] record says the last move arrived at the
//! origin from the opposite direction, the element it came from wins as long
//! as it is in the selected tier.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::geometry::{
    Candidate, Distance, Groups, NavRect, Priority, compute_rect, partition, prioritize,
};
use crate::types::{Direction, Previous};

const HORIZONTAL_STRAIGHT: &[Distance] = &[Distance::NearPlumbLine, Distance::Top];
const VERTICAL_STRAIGHT: &[Distance] = &[Distance::NearHorizon, Distance::Left];

/// Resolved navigation parameters for one pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavParams<E> {
    /// Never leave the straight band.
    pub straight_only: bool,
    /// Fraction of the origin's extent a corner candidate must overlap to count as straight.
    pub straight_overlap_threshold: f64,
    /// Prefer returning to where the last move came from.
    pub remember_source: bool,
    /// The origin section's last recorded move, if any.
    pub previous: Option<Previous<E>>,
}

impl<E> Default for NavParams<E> {
    fn default() -> Self {
        Self {
            straight_only: false,
            straight_overlap_threshold: 0.5,
            remember_source: false,
            previous: None,
        }
    }
}

/// Choose the destination for moving from `origin` in `direction`.
///
/// Returns `None` when `candidates` is empty, the origin cannot be measured,
/// no candidate can be measured, or no tier has a member. Unmeasurable
/// candidates are dropped silently.
///
/// ```
/// use kurbo::Rect;
/// use understory_spatial_nav::resolver::{navigate, NavParams};
/// use understory_spatial_nav::types::Direction;
///
/// let rects = [
///     Rect::new(0.0, 0.0, 50.0, 50.0),
///     Rect::new(100.0, 0.0, 150.0, 50.0),
///     Rect::new(0.0, 100.0, 50.0, 150.0),
/// ];
/// let measure = |i: usize| rects.get(i).copied();
/// let params = NavParams::default();
/// assert_eq!(navigate(0, Direction::Right, &[1, 2], &params, measure), Some(1));
/// assert_eq!(navigate(0, Direction::Down, &[1, 2], &params, measure), Some(2));
/// assert_eq!(navigate(0, Direction::Left, &[1, 2], &params, measure), None);
/// ```
pub fn navigate<E, M>(
    origin: E,
    direction: Direction,
    candidates: &[E],
    params: &NavParams<E>,
    measure: M,
) -> Option<E>
where
    E: Copy + Eq + core::fmt::Debug,
    M: Fn(E) -> Option<Rect>,
{
    if candidates.is_empty() {
        return None;
    }
    let rects: Vec<Candidate<E>> = candidates
        .iter()
        .filter_map(|&element| {
            compute_rect(element, &measure).map(|rect| Candidate { element, rect })
        })
        .collect();
    if rects.is_empty() {
        return None;
    }
    let target = compute_rect(origin, &measure)?;

    let threshold = params.straight_overlap_threshold;
    let mut groups = partition(&rects, &target, threshold);
    let mut internal = partition(&groups[4], &NavRect::point(target.center), threshold);

    let mut priorities = tiers(direction, &mut groups, &mut internal);
    if params.straight_only {
        priorities.pop();
    }
    let ranked = prioritize(priorities, &target)?;

    if params.remember_source
        && let Some(prev) = params.previous
        && prev.destination == origin
        && prev.reverse == direction
        && ranked.iter().any(|c| c.element == prev.target)
    {
        tracing::trace!(
            ?origin,
            source = ?prev.target,
            direction = direction.name(),
            "returning to remembered source"
        );
        return Some(prev.target);
    }

    let best = ranked.first().map(|c| c.element);
    tracing::trace!(
        ?origin,
        ?best,
        direction = direction.name(),
        ranked = ranked.len(),
        "resolved"
    );
    best
}

fn take_union<E>(groups: &mut Groups<E>, ids: &[usize]) -> Vec<Candidate<E>> {
    let mut out = Vec::new();
    for &i in ids {
        out.append(&mut groups[i]);
    }
    out
}

fn tiers<E>(
    direction: Direction,
    groups: &mut Groups<E>,
    internal: &mut Groups<E>,
) -> Vec<Priority<E>> {
    let (inner, straight, oblique, near, oblique_distance): (
        [usize; 3],
        usize,
        [usize; 2],
        &'static [Distance],
        &'static [Distance],
    ) = match direction {
        Direction::Left => (
            [0, 3, 6],
            3,
            [0, 6],
            HORIZONTAL_STRAIGHT,
            &[
                Distance::NearHorizon,
                Distance::Right,
                Distance::NearTargetTop,
            ],
        ),
        Direction::Right => (
            [2, 5, 8],
            5,
            [2, 8],
            HORIZONTAL_STRAIGHT,
            &[
                Distance::NearHorizon,
                Distance::Left,
                Distance::NearTargetTop,
            ],
        ),
        Direction::Up => (
            [0, 1, 2],
            1,
            [0, 2],
            VERTICAL_STRAIGHT,
            &[
                Distance::NearPlumbLine,
                Distance::Bottom,
                Distance::NearTargetLeft,
            ],
        ),
        Direction::Down => (
            [6, 7, 8],
            7,
            [6, 8],
            VERTICAL_STRAIGHT,
            &[
                Distance::NearPlumbLine,
                Distance::Top,
                Distance::NearTargetLeft,
            ],
        ),
    };
    vec![
        Priority {
            group: take_union(internal, &inner),
            distance: near,
        },
        Priority {
            group: core::mem::take(&mut groups[straight]),
            distance: near,
        },
        Priority {
            group: take_union(groups, &oblique),
            distance: oblique_distance,
        },
    ]
}

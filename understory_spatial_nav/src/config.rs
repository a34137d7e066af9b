// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered navigation configuration.
//!
//! ## Overview
//!
//! A single [`GlobalConfig`] holds a concrete value for every key. Each section
//! carries a [`SectionConfig`] of optional overrides layered over it; an
//! [`Effective`] view reads the override if present, else the global value.
//!
//! Updates arrive as a [`ConfigPatch`], one [`Patch`] per key:
//!
//! | Patch      | Global target    | Section target            |
//! |------------|------------------|---------------------------|
//! | `Keep`     | unchanged        | unchanged                 |
//! | `Set(v)`   | value becomes `v`| override becomes `v`      |
//! | `Clear`    | unchanged        | override removed (inherit)|
//!
//! ```
//! use understory_spatial_nav::config::{ConfigPatch, Effective, GlobalConfig, Patch, SectionConfig};
//!
//! let global = GlobalConfig::<u32>::default();
//! let mut section = SectionConfig::default();
//! section.apply(ConfigPatch { straight_only: Patch::Set(true), ..ConfigPatch::default() });
//! assert!(Effective::new(&section, &global).straight_only());
//!
//! section.apply(ConfigPatch { straight_only: Patch::Clear, ..ConfigPatch::default() });
//! assert!(!Effective::new(&section, &global).straight_only());
//! ```

use crate::resolver::NavParams;
use crate::types::{EnterTo, LeaveFor, Previous, Restrict, Selector};

/// Extra per-section navigability test: `(element, section_id) -> keep`.
pub type NavigableFilter<E> = fn(&E, &str) -> bool;

/// Concrete defaults for every configurable key.
#[derive(Clone, Debug)]
pub struct GlobalConfig<E> {
    /// Which elements belong to a section.
    pub selector: Selector<E>,
    /// Never leave the straight band when navigating.
    pub straight_only: bool,
    /// Corner overlap fraction that counts as straight, in `[0, 1]`.
    pub straight_overlap_threshold: f64,
    /// Prefer returning to where the last move came from.
    pub remember_source: bool,
    /// Exclude the section from membership and navigation.
    pub disabled: bool,
    /// Entry element candidate.
    pub default_element: Option<Selector<E>>,
    /// Entry policy when focus arrives from another section.
    pub enter_to: Option<EnterTo>,
    /// Per-direction exits when a move would leave the section.
    pub leave_for: Option<LeaveFor<E>>,
    /// Which sections a directional search may cross into.
    pub restrict: Restrict,
    /// Extra navigability test.
    pub navigable_filter: Option<NavigableFilter<E>>,
}

impl<E> Default for GlobalConfig<E> {
    fn default() -> Self {
        Self {
            selector: Selector::default(),
            straight_only: false,
            straight_overlap_threshold: 0.5,
            remember_source: false,
            disabled: false,
            default_element: None,
            enter_to: None,
            leave_for: None,
            restrict: Restrict::SelfFirst,
            navigable_filter: None,
        }
    }
}

/// Per-section overrides; `None` inherits from [`GlobalConfig`].
#[derive(Clone, Debug)]
pub struct SectionConfig<E> {
    /// See [`GlobalConfig::selector`].
    pub selector: Option<Selector<E>>,
    /// See [`GlobalConfig::straight_only`].
    pub straight_only: Option<bool>,
    /// See [`GlobalConfig::straight_overlap_threshold`].
    pub straight_overlap_threshold: Option<f64>,
    /// See [`GlobalConfig::remember_source`].
    pub remember_source: Option<bool>,
    /// See [`GlobalConfig::disabled`].
    pub disabled: Option<bool>,
    /// See [`GlobalConfig::default_element`].
    pub default_element: Option<Option<Selector<E>>>,
    /// See [`GlobalConfig::enter_to`].
    pub enter_to: Option<Option<EnterTo>>,
    /// See [`GlobalConfig::leave_for`].
    pub leave_for: Option<Option<LeaveFor<E>>>,
    /// See [`GlobalConfig::restrict`].
    pub restrict: Option<Restrict>,
    /// See [`GlobalConfig::navigable_filter`].
    pub navigable_filter: Option<Option<NavigableFilter<E>>>,
}

impl<E> Default for SectionConfig<E> {
    fn default() -> Self {
        Self {
            selector: None,
            straight_only: None,
            straight_overlap_threshold: None,
            remember_source: None,
            disabled: None,
            default_element: None,
            enter_to: None,
            leave_for: None,
            restrict: None,
            navigable_filter: None,
        }
    }
}

/// A single-key update.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
    /// Key absent from the update.
    #[default]
    Keep,
    /// Key present with a value.
    Set(T),
    /// Key present but explicitly unset.
    Clear,
}

impl<T> Patch<T> {
    fn apply_value(self, slot: &mut T) {
        if let Self::Set(v) = self {
            *slot = v;
        }
    }

    fn apply_override(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(v) => *slot = Some(v),
            Self::Clear => *slot = None,
        }
    }
}

/// A partial configuration update.
#[derive(Clone, Debug)]
pub struct ConfigPatch<E> {
    /// See [`GlobalConfig::selector`].
    pub selector: Patch<Selector<E>>,
    /// See [`GlobalConfig::straight_only`].
    pub straight_only: Patch<bool>,
    /// See [`GlobalConfig::straight_overlap_threshold`].
    pub straight_overlap_threshold: Patch<f64>,
    /// See [`GlobalConfig::remember_source`].
    pub remember_source: Patch<bool>,
    /// See [`GlobalConfig::disabled`].
    pub disabled: Patch<bool>,
    /// See [`GlobalConfig::default_element`].
    pub default_element: Patch<Option<Selector<E>>>,
    /// See [`GlobalConfig::enter_to`].
    pub enter_to: Patch<Option<EnterTo>>,
    /// See [`GlobalConfig::leave_for`].
    pub leave_for: Patch<Option<LeaveFor<E>>>,
    /// See [`GlobalConfig::restrict`].
    pub restrict: Patch<Restrict>,
    /// See [`GlobalConfig::navigable_filter`].
    pub navigable_filter: Patch<Option<NavigableFilter<E>>>,
}

impl<E> Default for ConfigPatch<E> {
    fn default() -> Self {
        Self {
            selector: Patch::Keep,
            straight_only: Patch::Keep,
            straight_overlap_threshold: Patch::Keep,
            remember_source: Patch::Keep,
            disabled: Patch::Keep,
            default_element: Patch::Keep,
            enter_to: Patch::Keep,
            leave_for: Patch::Keep,
            restrict: Patch::Keep,
            navigable_filter: Patch::Keep,
        }
    }
}

impl<E> ConfigPatch<E> {
    /// A patch that only sets the membership selector.
    pub fn with_selector(selector: Selector<E>) -> Self {
        Self {
            selector: Patch::Set(selector),
            ..Self::default()
        }
    }
}

impl<E> GlobalConfig<E> {
    /// Overwrite keys set in `patch`. `Clear` is ignored here.
    pub fn apply(&mut self, patch: ConfigPatch<E>) {
        let ConfigPatch {
            selector,
            straight_only,
            straight_overlap_threshold,
            remember_source,
            disabled,
            default_element,
            enter_to,
            leave_for,
            restrict,
            navigable_filter,
        } = patch;
        selector.apply_value(&mut self.selector);
        straight_only.apply_value(&mut self.straight_only);
        straight_overlap_threshold.apply_value(&mut self.straight_overlap_threshold);
        remember_source.apply_value(&mut self.remember_source);
        disabled.apply_value(&mut self.disabled);
        default_element.apply_value(&mut self.default_element);
        enter_to.apply_value(&mut self.enter_to);
        leave_for.apply_value(&mut self.leave_for);
        restrict.apply_value(&mut self.restrict);
        navigable_filter.apply_value(&mut self.navigable_filter);
    }
}

impl<E> SectionConfig<E> {
    /// Set or remove overrides named in `patch`.
    pub fn apply(&mut self, patch: ConfigPatch<E>) {
        let ConfigPatch {
            selector,
            straight_only,
            straight_overlap_threshold,
            remember_source,
            disabled,
            default_element,
            enter_to,
            leave_for,
            restrict,
            navigable_filter,
        } = patch;
        selector.apply_override(&mut self.selector);
        straight_only.apply_override(&mut self.straight_only);
        straight_overlap_threshold.apply_override(&mut self.straight_overlap_threshold);
        remember_source.apply_override(&mut self.remember_source);
        disabled.apply_override(&mut self.disabled);
        default_element.apply_override(&mut self.default_element);
        enter_to.apply_override(&mut self.enter_to);
        leave_for.apply_override(&mut self.leave_for);
        restrict.apply_override(&mut self.restrict);
        navigable_filter.apply_override(&mut self.navigable_filter);
    }
}

/// Read-through view of a section's overrides layered over the global config.
#[derive(Copy, Clone, Debug)]
pub struct Effective<'a, E> {
    section: &'a SectionConfig<E>,
    global: &'a GlobalConfig<E>,
}

impl<'a, E> Effective<'a, E> {
    /// Layer `section` over `global`.
    pub fn new(section: &'a SectionConfig<E>, global: &'a GlobalConfig<E>) -> Self {
        Self { section, global }
    }

    /// Membership selector.
    pub fn selector(&self) -> &'a Selector<E> {
        self.section.selector.as_ref().unwrap_or(&self.global.selector)
    }

    /// Straight-only navigation.
    pub fn straight_only(&self) -> bool {
        self.section
            .straight_only
            .unwrap_or(self.global.straight_only)
    }

    /// Straight overlap threshold.
    pub fn straight_overlap_threshold(&self) -> f64 {
        self.section
            .straight_overlap_threshold
            .unwrap_or(self.global.straight_overlap_threshold)
    }

    /// Remember-source tie-breaking.
    pub fn remember_source(&self) -> bool {
        self.section
            .remember_source
            .unwrap_or(self.global.remember_source)
    }

    /// Whether the section is disabled.
    pub fn disabled(&self) -> bool {
        self.section.disabled.unwrap_or(self.global.disabled)
    }

    /// Default entry element selector.
    pub fn default_element(&self) -> Option<&'a Selector<E>> {
        self.section
            .default_element
            .as_ref()
            .unwrap_or(&self.global.default_element)
            .as_ref()
    }

    /// Entry policy.
    pub fn enter_to(&self) -> Option<EnterTo> {
        self.section.enter_to.unwrap_or(self.global.enter_to)
    }

    /// Exit targets.
    pub fn leave_for(&self) -> Option<&'a LeaveFor<E>> {
        self.section
            .leave_for
            .as_ref()
            .unwrap_or(&self.global.leave_for)
            .as_ref()
    }

    /// Search restriction.
    pub fn restrict(&self) -> Restrict {
        self.section.restrict.unwrap_or(self.global.restrict)
    }

    /// Navigability filter.
    pub fn navigable_filter(&self) -> Option<NavigableFilter<E>> {
        self.section
            .navigable_filter
            .unwrap_or(self.global.navigable_filter)
    }

    /// Parameters for one [`navigate`](crate::resolver::navigate) pass.
    pub fn nav_params(&self, previous: Option<Previous<E>>) -> NavParams<E> {
        NavParams {
            straight_only: self.straight_only(),
            straight_overlap_threshold: self.straight_overlap_threshold(),
            remember_source: self.remember_source(),
            previous,
        }
    }
}

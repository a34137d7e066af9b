// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named sections, their configuration, and per-section focus memory.
//!
//! ## Overview
//!
//! A [`SectionRegistry`] owns the global configuration and an ordered list of
//! [`Section`]s. Insertion order matters: when an element matches several
//! section selectors, the earliest enabled section owns it.
//!
//! The registry answers membership and navigability questions against a
//! [`Host`]; it never changes focus itself.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{ConfigPatch, Effective, GlobalConfig, SectionConfig};
use crate::error::ConfigError;
use crate::host::{self, Host};
use crate::types::{ElementFlags, Previous};

/// Prefix for generated section ids.
const ID_PREFIX: &str = "section-";

/// A named group of elements with its own overrides and memory.
#[derive(Clone, Debug)]
pub struct Section<E> {
    id: String,
    config: SectionConfig<E>,
    last_focused: Option<E>,
    previous: Option<Previous<E>>,
}

impl<E: Copy> Section<E> {
    fn new(id: String) -> Self {
        Self {
            id,
            config: SectionConfig::default(),
            last_focused: None,
            previous: None,
        }
    }

    /// Section id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Overrides set on this section.
    pub fn config(&self) -> &SectionConfig<E> {
        &self.config
    }

    /// Element that most recently received focus in this section.
    ///
    /// Not re-validated; see [`SectionRegistry::last_focused_element`].
    pub fn last_focused(&self) -> Option<E> {
        self.last_focused
    }

    /// Last successful directional move out of an element of this section.
    pub fn previous(&self) -> Option<Previous<E>> {
        self.previous
    }
}

/// Ordered section storage plus the global configuration.
#[derive(Clone, Debug)]
pub struct SectionRegistry<E> {
    sections: Vec<Section<E>>,
    global: GlobalConfig<E>,
    id_pool: u32,
}

impl<E> Default for SectionRegistry<E> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            global: GlobalConfig::default(),
            id_pool: 0,
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> SectionRegistry<E> {
    /// Create an empty registry with default global configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Global configuration.
    pub fn global(&self) -> &GlobalConfig<E> {
        &self.global
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if no section is registered.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Look up a section.
    pub fn get(&self, id: &str) -> Option<&Section<E>> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Section<E>> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Effective configuration of a section.
    pub fn effective(&self, id: &str) -> Option<Effective<'_, E>> {
        self.get(id)
            .map(|s| Effective::new(&s.config, &self.global))
    }

    fn generate_id(&mut self) -> String {
        loop {
            self.id_pool += 1;
            let id = format!("{ID_PREFIX}{}", self.id_pool);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Register a section and apply `patch` to it.
    ///
    /// Without an id, one of the form `section-N` is generated.
    pub fn add(&mut self, id: Option<&str>, patch: ConfigPatch<E>) -> Result<String, ConfigError> {
        let id = match id {
            Some(id) if self.get(id).is_some() => {
                return Err(ConfigError::DuplicateSection(id.into()));
            }
            Some(id) => String::from(id),
            None => self.generate_id(),
        };
        let mut section = Section::new(id.clone());
        section.config.apply(patch);
        self.sections.push(section);
        tracing::debug!(section = %id, count = self.sections.len(), "section added");
        Ok(id)
    }

    /// Unregister a section. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        self.sections.remove(index);
        tracing::debug!(section = %id, count = self.sections.len(), "section removed");
        true
    }

    /// Set or clear overrides on an existing section.
    pub fn set(&mut self, id: &str, patch: ConfigPatch<E>) -> Result<(), ConfigError> {
        let section = self
            .get_mut(id)
            .ok_or_else(|| ConfigError::UnknownSection(id.into()))?;
        section.config.apply(patch);
        Ok(())
    }

    /// Update the global configuration. `Patch::Clear` entries are ignored.
    pub fn set_global(&mut self, patch: ConfigPatch<E>) {
        self.global.apply(patch);
    }

    /// Mark a section enabled. Returns whether it exists.
    pub fn enable(&mut self, id: &str) -> bool {
        self.set_disabled(id, false)
    }

    /// Mark a section disabled. Returns whether it exists.
    pub fn disable(&mut self, id: &str) -> bool {
        self.set_disabled(id, true)
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        match self.get_mut(id) {
            Some(section) => {
                section.config.disabled = Some(disabled);
                tracing::debug!(section = %id, disabled, "section toggled");
                true
            }
            None => false,
        }
    }

    /// Drop every section. The generated-id counter keeps counting.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Drop every section and restart generated ids. Global configuration is kept.
    pub fn reset(&mut self) {
        self.sections.clear();
        self.id_pool = 0;
    }

    /// Record that `element` received focus in section `id`.
    pub fn set_last_focused(&mut self, id: &str, element: E) {
        if let Some(section) = self.get_mut(id) {
            section.last_focused = Some(element);
        }
    }

    /// Record a successful directional move out of section `id`.
    pub fn set_previous(&mut self, id: &str, previous: Previous<E>) {
        if let Some(section) = self.get_mut(id) {
            section.previous = Some(previous);
        }
    }

    /// The first enabled section, in insertion order, whose selector matches `element`.
    pub fn section_of<H>(&self, host: &H, element: E) -> Option<&str>
    where
        H: Host<Element = E>,
    {
        self.sections
            .iter()
            .find(|s| {
                let eff = Effective::new(&s.config, &self.global);
                !eff.disabled() && host::matches(host, element, eff.selector())
            })
            .map(|s| s.id.as_str())
    }

    /// Whether `element` may receive focus as a member of section `id`.
    ///
    /// Requires the section to exist and be enabled, the element to be visible
    /// and enabled, and the section's navigable filter (if any) to accept it.
    /// With `verify_selector`, the element must also match the section selector.
    pub fn is_navigable<H>(&self, host: &H, element: E, id: &str, verify_selector: bool) -> bool
    where
        H: Host<Element = E>,
    {
        let Some(eff) = self.effective(id) else {
            return false;
        };
        if eff.disabled() {
            return false;
        }
        if !host
            .flags(element)
            .contains(ElementFlags::VISIBLE | ElementFlags::ENABLED)
        {
            return false;
        }
        if verify_selector && !host::matches(host, element, eff.selector()) {
            return false;
        }
        eff.navigable_filter()
            .is_none_or(|filter| filter(&element, id))
    }

    /// Navigable members of section `id`, in selector order.
    ///
    /// Empty for unknown or disabled sections.
    pub fn navigable_elements<H>(&self, host: &H, id: &str) -> Vec<E>
    where
        H: Host<Element = E>,
    {
        let Some(eff) = self.effective(id) else {
            return Vec::new();
        };
        host::resolve(host, eff.selector())
            .into_iter()
            .filter(|&el| self.is_navigable(host, el, id, false))
            .collect()
    }

    /// First navigable element of the section's default-element selector.
    pub fn default_element<H>(&self, host: &H, id: &str) -> Option<E>
    where
        H: Host<Element = E>,
    {
        let selector = self.effective(id)?.default_element()?;
        host::resolve(host, selector)
            .first()
            .copied()
            .filter(|&el| self.is_navigable(host, el, id, true))
    }

    /// The section's last focused element, if it is still navigable there.
    pub fn last_focused_element<H>(&self, host: &H, id: &str) -> Option<E>
    where
        H: Host<Element = E>,
    {
        let element = self.get(id)?.last_focused?;
        self.is_navigable(host, element, id, true)
            .then_some(element)
    }
}

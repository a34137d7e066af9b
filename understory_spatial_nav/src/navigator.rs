// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus orchestrator and public API.
//!
//! ## Overview
//!
//! [`Navigator`] owns a [`Host`] and a [`SectionRegistry`] and drives every
//! focus change through a fixed notification sequence:
//!
//! 1. `will-unfocus` on the element losing focus (cancelable), then blur and `unfocused`.
//! 2. `will-focus` on the element gaining focus (cancelable), then focus and `focused`.
//! 3. The section's last-focused element and the navigator's last section are updated.
//!
//! A veto at step 2 leaves the previous element blurred; nothing is rolled back.
//!
//! While a change is in flight, or while the navigator is paused, focus
//! requests and moves commit silently: blur, focus and history only. No
//! `will-move` or `navigate-failed` is sent either.
//!
//! ## Directional moves
//!
//! [`Navigator::move_focus`] and direction keys resolve a destination in this order:
//!
//! - An element-declared exit from [`Host::exit_override`] wins outright.
//! - Otherwise the [resolver](crate::resolver) searches the sections allowed by
//!   the origin section's [`Restrict`] policy.
//! - A winner in another section first consults the origin section's
//!   `leave_for`, then the destination section's `enter_to`.
//! - With no winner, `leave_for` is the last resort.
//!
//! Failures fire `navigate-failed` on the origin and return `false`.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::config::{ConfigPatch, GlobalConfig};
use crate::error::ConfigError;
use crate::event::{FocusDetail, MoveCause, NavEvent, UnfocusDetail};
use crate::host::{self, Host, Reentry, Request};
use crate::registry::{Section, SectionRegistry};
use crate::resolver::navigate;
use crate::types::{
    Direction, EnterTo, Exit, Key, KeyResponse, Modifiers, Previous, Restrict, Selector,
};

/// Result of consulting a section's `leave_for` entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum LeaveOutcome {
    /// The exit target received focus.
    Focused,
    /// The exit is explicitly blocked.
    Nowhere,
    /// No exit is set, or it could not be followed.
    NotTaken,
}

/// Spatial focus navigation over a [`Host`].
///
/// ```
/// use kurbo::Rect;
/// use understory_spatial_nav::config::ConfigPatch;
/// use understory_spatial_nav::event::NavEvent;
/// use understory_spatial_nav::host::{Host, Reentry};
/// use understory_spatial_nav::navigator::Navigator;
/// use understory_spatial_nav::types::{Direction, ElementFlags, Selector};
///
/// struct Row {
///     rects: Vec<Rect>,
///     focused: Option<usize>,
/// }
///
/// impl Host for Row {
///     type Element = usize;
///     fn measure(&self, e: usize) -> Option<Rect> { self.rects.get(e).copied() }
///     fn query(&self, q: &str) -> Vec<usize> {
///         if q == "cell" { (0..self.rects.len()).collect() } else { Vec::new() }
///     }
///     fn matches(&self, e: usize, q: &str) -> bool { q == "cell" && e < self.rects.len() }
///     fn flags(&self, _: usize) -> ElementFlags { ElementFlags::default() }
///     fn focus(&mut self, e: usize) { self.focused = Some(e); }
///     fn blur(&mut self, _: usize) { self.focused = None; }
///     fn focused(&self) -> Option<usize> { self.focused }
///     fn notify(&mut self, _: usize, _: &NavEvent<usize>, _: &mut Reentry<usize>) -> bool { true }
/// }
///
/// let rects = (0..3)
///     .map(|i| Rect::new(i as f64 * 60.0, 0.0, i as f64 * 60.0 + 50.0, 50.0))
///     .collect();
/// let mut nav = Navigator::new(Row { rects, focused: None });
/// nav.add(None, ConfigPatch::with_selector(Selector::Query("cell".into()))).unwrap();
///
/// assert!(nav.focus(None, false));
/// assert_eq!(nav.host().focused, Some(0));
/// assert!(nav.move_focus(Direction::Right, None));
/// assert_eq!(nav.host().focused, Some(1));
/// assert!(!nav.move_focus(Direction::Up, None));
/// ```
#[derive(Debug)]
pub struct Navigator<H: Host> {
    host: H,
    sections: SectionRegistry<H::Element>,
    default_section: Option<String>,
    last_section: Option<String>,
    ready: bool,
    paused: bool,
    in_transition: bool,
}

impl<H: Host> Navigator<H> {
    /// Create a navigator with no sections and default global configuration.
    ///
    /// Key and native focus handlers stay inactive until [`Navigator::init`].
    pub fn new(host: H) -> Self {
        Self {
            host,
            sections: SectionRegistry::new(),
            default_section: None,
            last_section: None,
            ready: false,
            paused: false,
            in_transition: false,
        }
    }

    /// Activate the key and native focus handlers.
    pub fn init(&mut self) {
        if !self.ready {
            self.ready = true;
            tracing::debug!("navigator ready");
        }
    }

    /// Deactivate the handlers, drop all sections, and restart generated ids.
    pub fn uninit(&mut self) {
        self.clear();
        self.sections.reset();
        self.ready = false;
    }

    /// Drop all sections and the default/last section markers.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.default_section = None;
        self.last_section = None;
        self.in_transition = false;
    }

    /// Register a section. See [`SectionRegistry::add`].
    pub fn add(
        &mut self,
        id: Option<&str>,
        patch: ConfigPatch<H::Element>,
    ) -> Result<String, ConfigError> {
        self.sections.add(id, patch)
    }

    /// Unregister a section. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.sections.remove(id) {
            return false;
        }
        if self.last_section.as_deref() == Some(id) {
            self.last_section = None;
        }
        true
    }

    /// Update a section's overrides; `Patch::Clear` reverts a key to the global value.
    pub fn set(&mut self, id: &str, patch: ConfigPatch<H::Element>) -> Result<(), ConfigError> {
        self.sections.set(id, patch)
    }

    /// Update the global configuration; `Patch::Clear` is ignored.
    pub fn set_global(&mut self, patch: ConfigPatch<H::Element>) {
        self.sections.set_global(patch);
    }

    /// Enable a section. Returns whether it exists.
    pub fn enable(&mut self, id: &str) -> bool {
        self.sections.enable(id)
    }

    /// Disable a section. Returns whether it exists.
    pub fn disable(&mut self, id: &str) -> bool {
        self.sections.disable(id)
    }

    /// Suspend notifications and key handling. Focus requests still commit silently.
    pub fn pause(&mut self) {
        self.paused = true;
        tracing::debug!("navigator paused");
    }

    /// Undo [`Navigator::pause`].
    pub fn resume(&mut self) {
        self.paused = false;
        tracing::debug!("navigator resumed");
    }

    /// Set or unset the section tried first by [`Navigator::focus`] with no selector.
    pub fn set_default_section(&mut self, id: Option<&str>) -> Result<(), ConfigError> {
        match id {
            None => self.default_section = None,
            Some(id) if self.sections.get(id).is_none() => {
                return Err(ConfigError::UnknownSection(id.into()));
            }
            Some(id) => self.default_section = Some(id.into()),
        }
        tracing::debug!(section = ?self.default_section, "default section changed");
        Ok(())
    }

    /// Move focus to `selector`, or to the default, last, or first available
    /// section when `None`.
    ///
    /// A [`Selector::Query`] naming a registered section focuses that section.
    /// With `silent`, no notifications are delivered for this call.
    pub fn focus(&mut self, selector: Option<Selector<H::Element>>, silent: bool) -> bool {
        let auto_pause = silent && !self.paused;
        if auto_pause {
            self.paused = true;
        }
        let focused = match selector {
            None => self.focus_section(None),
            Some(Selector::Query(q)) if q.is_empty() => self.focus_section(None),
            Some(Selector::Query(q)) if self.sections.get(&q).is_some() => {
                self.focus_section(Some(q.as_str()))
            }
            Some(selector) => self.focus_extended(&selector, None),
        };
        if auto_pause {
            self.paused = false;
        }
        focused
    }

    /// Move focus in `direction` from the first element of `selector`, or from
    /// the focused element.
    ///
    /// Fires `will-move` on the origin first; a veto cancels the move.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        selector: Option<Selector<H::Element>>,
    ) -> bool {
        let origin = match selector {
            Some(selector) => host::resolve(&self.host, &selector).first().copied(),
            None => self.host.focused(),
        };
        let Some(origin) = origin else {
            return false;
        };
        let Some(section) = self.owner(origin) else {
            return false;
        };
        self.move_from(origin, direction, section, MoveCause::Api)
    }

    /// Handle a key press. Direction keys move focus; enter fires `enter-down`.
    ///
    /// Ignored before [`Navigator::init`], while paused, with no sections, or
    /// with any modifier held.
    pub fn handle_key_down(&mut self, key: Key, modifiers: Modifiers) -> KeyResponse {
        if !self.accepts_keys(modifiers) {
            return KeyResponse::Ignored;
        }
        match key {
            Key::Other => KeyResponse::Ignored,
            Key::Enter => self.fire_enter(NavEvent::EnterDown),
            Key::Direction(direction) => {
                let origin = self.host.focused().or_else(|| {
                    let id = self.last_section.as_deref()?;
                    self.sections.last_focused_element(&self.host, id)
                });
                let Some(origin) = origin else {
                    self.focus_section(None);
                    return KeyResponse::Consumed;
                };
                let Some(section) = self.owner(origin) else {
                    return KeyResponse::Ignored;
                };
                self.move_from(origin, direction, section, MoveCause::Key);
                KeyResponse::Consumed
            }
        }
    }

    /// Handle a key release. Enter fires `enter-up`.
    pub fn handle_key_up(&mut self, key: Key, modifiers: Modifiers) -> KeyResponse {
        if !self.accepts_keys(modifiers) {
            return KeyResponse::Ignored;
        }
        match key {
            Key::Enter => self.fire_enter(NavEvent::EnterUp),
            Key::Direction(_) | Key::Other => KeyResponse::Ignored,
        }
    }

    /// Report that the host moved focus to `element` on its own.
    ///
    /// Only report changes the navigator did not make through [`Host::focus`].
    /// A vetoed `will-focus` blurs `element` again.
    pub fn handle_native_focus(&mut self, element: H::Element) {
        if !self.ready || self.sections.is_empty() || self.in_transition {
            return;
        }
        let Some(section) = self.owner(element) else {
            return;
        };
        if self.paused {
            self.focus_changed(element, &section);
            return;
        }
        let detail = FocusDetail {
            previous_element: None,
            section: Some(section.clone()),
            direction: None,
            native: true,
        };
        if self.fire(element, NavEvent::WillFocus(detail.clone())) {
            self.fire(element, NavEvent::Focused(detail));
            self.focus_changed(element, &section);
        } else {
            self.host.blur(element);
        }
    }

    /// Report that the host removed focus from `element` on its own.
    ///
    /// A vetoed `will-unfocus` focuses `element` again.
    pub fn handle_native_blur(&mut self, element: H::Element) {
        if !self.ready || self.paused || self.sections.is_empty() || self.in_transition {
            return;
        }
        if self.owner(element).is_none() {
            return;
        }
        let detail = UnfocusDetail {
            next_element: None,
            next_section: None,
            direction: None,
            native: true,
        };
        if self.fire(element, NavEvent::WillUnfocus(detail.clone())) {
            self.fire(element, NavEvent::Unfocused(detail));
        } else {
            self.host.focus(element);
        }
    }

    /// Look up a section.
    pub fn section(&self, id: &str) -> Option<&Section<H::Element>> {
        self.sections.get(id)
    }

    /// Section ids in insertion order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.ids()
    }

    /// Number of registered sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The section owning `element`, if any.
    pub fn section_of(&self, element: H::Element) -> Option<&str> {
        self.sections.section_of(&self.host, element)
    }

    /// Section tried first when focusing without a selector.
    pub fn default_section_id(&self) -> Option<&str> {
        self.default_section.as_deref()
    }

    /// Section of the most recent focus change.
    pub fn last_section_id(&self) -> Option<&str> {
        self.last_section.as_deref()
    }

    /// Global configuration.
    pub fn global(&self) -> &GlobalConfig<H::Element> {
        self.sections.global()
    }

    /// Whether notifications are suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether [`Navigator::init`] has been called.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn accepts_keys(&self, modifiers: Modifiers) -> bool {
        self.ready && !self.paused && !self.sections.is_empty() && modifiers.is_empty()
    }

    fn owner(&self, element: H::Element) -> Option<String> {
        self.sections
            .section_of(&self.host, element)
            .map(String::from)
    }

    /// Deliver `event`, then run whatever the handler queued.
    fn fire(&mut self, target: H::Element, event: NavEvent<H::Element>) -> bool {
        let mut reentry = Reentry::default();
        let accepted = self.host.notify(target, &event, &mut reentry);
        if !accepted && event.is_cancelable() {
            tracing::debug!(event = event.name(), ?target, "transition vetoed");
        }
        for request in reentry.into_requests() {
            match request {
                Request::Focus(selector) => {
                    self.focus(selector, false);
                }
                Request::Move(direction, selector) => {
                    self.move_focus(direction, selector);
                }
            }
        }
        accepted
    }

    fn fire_enter(&mut self, event: NavEvent<H::Element>) -> KeyResponse {
        let Some(focused) = self.host.focused() else {
            return KeyResponse::Ignored;
        };
        if self.owner(focused).is_none() {
            return KeyResponse::Ignored;
        }
        if self.fire(focused, event) {
            KeyResponse::Ignored
        } else {
            KeyResponse::Consumed
        }
    }

    /// Notifications are suppressed while paused or mid-change.
    fn is_silent(&self) -> bool {
        self.paused || self.in_transition
    }

    fn navigate_failed(&mut self, origin: H::Element, direction: Direction) {
        tracing::debug!(?origin, direction = direction.name(), "navigate failed");
        if !self.is_silent() {
            self.fire(origin, NavEvent::NavigateFailed { direction });
        }
    }

    fn focus_changed(&mut self, element: H::Element, section: &str) {
        self.sections.set_last_focused(section, element);
        self.last_section = Some(section.into());
    }

    fn focus_element(
        &mut self,
        element: H::Element,
        section: &str,
        direction: Option<Direction>,
    ) -> bool {
        let current = self.host.focused();
        if self.is_silent() {
            tracing::trace!(?element, section, "silent focus");
            if let Some(current) = current {
                self.host.blur(current);
            }
            self.host.focus(element);
            self.focus_changed(element, section);
            return true;
        }

        self.in_transition = true;
        if let Some(current) = current {
            let detail = UnfocusDetail {
                next_element: Some(element),
                next_section: Some(section.into()),
                direction,
                native: false,
            };
            if !self.fire(current, NavEvent::WillUnfocus(detail.clone())) {
                self.in_transition = false;
                return false;
            }
            self.host.blur(current);
            self.fire(current, NavEvent::Unfocused(detail));
        }

        let detail = FocusDetail {
            previous_element: current,
            section: Some(section.into()),
            direction,
            native: false,
        };
        if !self.fire(element, NavEvent::WillFocus(detail.clone())) {
            self.in_transition = false;
            return false;
        }
        self.host.focus(element);
        self.fire(element, NavEvent::Focused(detail));
        self.in_transition = false;
        self.focus_changed(element, section);
        true
    }

    /// Entry element of a section, honoring its `enter_to` policy.
    fn entry_element(&self, id: &str) -> Option<H::Element> {
        let enter_to = self.sections.effective(id)?.enter_to();
        let last = || self.sections.last_focused_element(&self.host, id);
        let default = || self.sections.default_element(&self.host, id);
        let first = || {
            self.sections
                .navigable_elements(&self.host, id)
                .first()
                .copied()
        };
        match enter_to {
            Some(EnterTo::LastFocused) => last().or_else(default).or_else(first),
            _ => default().or_else(last).or_else(first),
        }
    }

    fn focus_section(&mut self, id: Option<&str>) -> bool {
        let candidates: Vec<&str> = match id {
            Some(id) => vec![id],
            None => self
                .default_section
                .as_deref()
                .into_iter()
                .chain(self.last_section.as_deref())
                .chain(self.sections.ids())
                .collect(),
        };
        let mut range: Vec<String> = Vec::new();
        for id in candidates {
            if range.iter().any(|r| r == id) {
                continue;
            }
            if self
                .sections
                .effective(id)
                .is_some_and(|eff| !eff.disabled())
            {
                range.push(id.into());
            }
        }

        for id in range {
            if let Some(next) = self.entry_element(&id) {
                return self.focus_element(next, &id, None);
            }
        }
        false
    }

    /// Focus a plain element if its section accepts it.
    fn focus_candidate(&mut self, element: H::Element, direction: Option<Direction>) -> bool {
        let Some(section) = self.owner(element) else {
            return false;
        };
        if !self
            .sections
            .is_navigable(&self.host, element, &section, false)
        {
            return false;
        }
        self.focus_element(element, &section, direction)
    }

    /// Focus a plain or `@` selector.
    fn focus_extended(
        &mut self,
        selector: &Selector<H::Element>,
        direction: Option<Direction>,
    ) -> bool {
        match selector {
            Selector::DefaultSection => self.focus_section(None),
            Selector::Section(id) => self.focus_section(Some(id.as_str())),
            Selector::Query(_) | Selector::Elements(_) => {
                match host::resolve(&self.host, selector).first() {
                    Some(&next) => self.focus_candidate(next, direction),
                    None => false,
                }
            }
        }
    }

    fn goto_leave_for(&mut self, section: &str, direction: Direction) -> LeaveOutcome {
        let exit = self
            .sections
            .effective(section)
            .and_then(|eff| eff.leave_for())
            .and_then(|leave_for| leave_for.get(direction))
            .cloned();
        match exit {
            None => LeaveOutcome::NotTaken,
            Some(Exit::Nowhere) => LeaveOutcome::Nowhere,
            Some(Exit::To(selector)) => {
                if self.focus_extended(&selector, Some(direction)) {
                    LeaveOutcome::Focused
                } else {
                    LeaveOutcome::NotTaken
                }
            }
        }
    }

    fn all_navigable(&self) -> Vec<H::Element> {
        self.sections
            .ids()
            .flat_map(|id| self.sections.navigable_elements(&self.host, id))
            .collect()
    }

    fn move_from(
        &mut self,
        origin: H::Element,
        direction: Direction,
        section: String,
        cause: MoveCause,
    ) -> bool {
        if !self.is_silent() {
            let event = NavEvent::WillMove {
                direction,
                section: section.clone(),
                cause,
            };
            if !self.fire(origin, event) {
                return false;
            }
        }
        self.focus_next(direction, origin, &section)
    }

    fn focus_next(&mut self, direction: Direction, origin: H::Element, origin_section: &str) -> bool {
        if let Some(exit) = self.host.exit_override(origin, direction) {
            let moved = match exit {
                Exit::Nowhere => false,
                Exit::To(selector) => self.focus_extended(&selector, Some(direction)),
            };
            if !moved {
                self.navigate_failed(origin, direction);
            }
            return moved;
        }

        let Some(eff) = self.sections.effective(origin_section) else {
            return false;
        };
        let restrict = eff.restrict();
        let previous = self
            .sections
            .get(origin_section)
            .and_then(Section::previous);
        let params = eff.nav_params(previous);

        let own = self
            .sections
            .navigable_elements(&self.host, origin_section);
        let measure = |element: H::Element| self.host.measure(element);
        let found = match restrict {
            Restrict::SelfOnly | Restrict::SelfFirst => {
                let local: Vec<_> = own.iter().copied().filter(|&e| e != origin).collect();
                navigate(origin, direction, &local, &params, measure).or_else(|| {
                    if restrict != Restrict::SelfFirst {
                        return None;
                    }
                    let others: Vec<_> = self
                        .all_navigable()
                        .into_iter()
                        .filter(|e| !own.contains(e))
                        .collect();
                    navigate(origin, direction, &others, &params, measure)
                })
            }
            Restrict::None => {
                let all: Vec<_> = self
                    .all_navigable()
                    .into_iter()
                    .filter(|&e| e != origin)
                    .collect();
                navigate(origin, direction, &all, &params, measure)
            }
        };

        let Some(mut next) = found else {
            if self.goto_leave_for(origin_section, direction) == LeaveOutcome::Focused {
                return true;
            }
            self.navigate_failed(origin, direction);
            return false;
        };

        self.sections.set_previous(
            origin_section,
            Previous {
                target: origin,
                destination: next,
                reverse: direction.opposite(),
            },
        );

        let next_section = self
            .owner(next)
            .unwrap_or_else(|| String::from(origin_section));
        if next_section != origin_section {
            match self.goto_leave_for(origin_section, direction) {
                LeaveOutcome::Focused => return true,
                LeaveOutcome::Nowhere => {
                    self.navigate_failed(origin, direction);
                    return false;
                }
                LeaveOutcome::NotTaken => {}
            }
            let enter_to = self
                .sections
                .effective(&next_section)
                .and_then(|eff| eff.enter_to());
            let entry = match enter_to {
                Some(EnterTo::LastFocused) => self
                    .sections
                    .last_focused_element(&self.host, &next_section)
                    .or_else(|| self.sections.default_element(&self.host, &next_section)),
                Some(EnterTo::DefaultElement) => {
                    self.sections.default_element(&self.host, &next_section)
                }
                None => None,
            };
            if let Some(entry) = entry {
                next = entry;
            }
        }
        self.focus_element(next, &next_section, Some(direction))
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host environment: measurement, selector queries, focus actuation, and notifications.
//!
//! ## Overview
//!
//! The navigator never touches a real UI. Everything it needs from the
//! environment goes through [`Host`]: element rectangles, selector resolution,
//! focusability, focus/blur, and the lifecycle event bus.
//!
//! ## Re-entrant requests
//!
//! A notification handler cannot call back into the navigator while it is
//! being notified. Instead it queues requests on the [`Reentry`] handle passed
//! to [`Host::notify`]. The navigator runs them as soon as the handler returns.
//! Requests made while a focus change is in flight commit silently: blur,
//! focus, and history update, with no further notifications.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::event::NavEvent;
use crate::types::{Direction, ElementFlags, Exit, Selector};

/// Capabilities the navigator consumes from its environment.
pub trait Host {
    /// Opaque element handle.
    type Element: Copy + Eq + core::fmt::Debug;

    /// Bounding box in a shared coordinate space, or `None` if unmeasurable.
    fn measure(&self, element: Self::Element) -> Option<Rect>;

    /// Elements matching `query`, in document order.
    fn query(&self, query: &str) -> Vec<Self::Element>;

    /// Whether `element` matches `query`.
    fn matches(&self, element: Self::Element, query: &str) -> bool;

    /// Visibility and enabled state.
    fn flags(&self, element: Self::Element) -> ElementFlags;

    /// Give `element` focus.
    fn focus(&mut self, element: Self::Element);

    /// Remove focus from `element`.
    fn blur(&mut self, element: Self::Element);

    /// The element that currently has focus.
    fn focused(&self) -> Option<Self::Element>;

    /// Deliver `event` to `target`.
    ///
    /// For cancelable events, return `false` to veto. Handlers that want to
    /// move focus themselves queue the request on `reentry`.
    fn notify(
        &mut self,
        target: Self::Element,
        event: &NavEvent<Self::Element>,
        reentry: &mut Reentry<Self::Element>,
    ) -> bool;

    /// An element-declared exit for `direction`, bypassing geometric search.
    fn exit_override(
        &self,
        _element: Self::Element,
        _direction: Direction,
    ) -> Option<Exit<Self::Element>> {
        None
    }
}

/// A focus change requested from inside a notification handler.
#[derive(Clone, Debug, PartialEq)]
pub enum Request<E> {
    /// Same as [`Navigator::focus`](crate::navigator::Navigator::focus) (not silent).
    Focus(Option<Selector<E>>),
    /// Same as [`Navigator::move_focus`](crate::navigator::Navigator::move_focus).
    Move(Direction, Option<Selector<E>>),
}

/// Queue of requests made by a notification handler.
#[derive(Clone, Debug)]
pub struct Reentry<E> {
    requests: Vec<Request<E>>,
}

impl<E> Default for Reentry<E> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
        }
    }
}

impl<E> Reentry<E> {
    /// Ask for focus on `selector`.
    pub fn focus(&mut self, selector: Selector<E>) {
        self.requests.push(Request::Focus(Some(selector)));
    }

    /// Ask for focus on the default, last, or first available section.
    pub fn focus_any_section(&mut self) {
        self.requests.push(Request::Focus(None));
    }

    /// Ask for a directional move from the focused element.
    pub fn move_focus(&mut self, direction: Direction) {
        self.requests.push(Request::Move(direction, None));
    }

    /// Returns true if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn push(&mut self, request: Request<E>) {
        self.requests.push(request);
    }

    pub(crate) fn into_requests(self) -> Vec<Request<E>> {
        self.requests
    }
}

/// Resolve a plain selector to elements. Extended `@` forms resolve to nothing.
pub fn resolve<H: Host>(host: &H, selector: &Selector<H::Element>) -> Vec<H::Element> {
    match selector {
        Selector::Query(q) if q.is_empty() => Vec::new(),
        Selector::Query(q) => host.query(q),
        Selector::Elements(list) => list.clone(),
        Selector::Section(_) | Selector::DefaultSection => Vec::new(),
    }
}

/// Whether `element` is selected by a plain selector.
pub fn matches<H: Host>(host: &H, element: H::Element, selector: &Selector<H::Element>) -> bool {
    match selector {
        Selector::Query(q) => !q.is_empty() && host.matches(element, q),
        Selector::Elements(list) => list.contains(&element),
        Selector::Section(_) | Selector::DefaultSection => false,
    }
}

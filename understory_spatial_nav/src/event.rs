// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications delivered to the [`Host`](crate::host::Host).
//!
//! `will-*` events are cancelable: a host returning `false` from
//! [`Host::notify`](crate::host::Host::notify) aborts that transition. All
//! other events are informational and their return value is ignored, except
//! that key handlers report a rejected `enter-down`/`enter-up` as consumed.

use alloc::string::String;

use crate::types::Direction;

/// Why a `will-move` was fired.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveCause {
    /// A direction key reached [`Navigator::handle_key_down`](crate::navigator::Navigator::handle_key_down).
    Key,
    /// [`Navigator::move_focus`](crate::navigator::Navigator::move_focus) was called.
    Api,
}

/// Detail for `will-unfocus` / `unfocused`, fired on the element losing focus.
#[derive(Clone, Debug, PartialEq)]
pub struct UnfocusDetail<E> {
    /// Element about to receive focus, if known.
    pub next_element: Option<E>,
    /// Section of `next_element`, if known.
    pub next_section: Option<String>,
    /// Direction of the move, for directional navigation.
    pub direction: Option<Direction>,
    /// True when the host changed focus on its own.
    pub native: bool,
}

/// Detail for `will-focus` / `focused`, fired on the element gaining focus.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusDetail<E> {
    /// Element that had focus before, if any.
    pub previous_element: Option<E>,
    /// Section of the focused element, if known.
    pub section: Option<String>,
    /// Direction of the move, for directional navigation.
    pub direction: Option<Direction>,
    /// True when the host changed focus on its own.
    pub native: bool,
}

/// A lifecycle notification.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent<E> {
    /// Focus is about to leave the target. Cancelable.
    WillUnfocus(UnfocusDetail<E>),
    /// Focus left the target.
    Unfocused(UnfocusDetail<E>),
    /// Focus is about to arrive at the target. Cancelable.
    WillFocus(FocusDetail<E>),
    /// Focus arrived at the target.
    Focused(FocusDetail<E>),
    /// A directional move from the target found nowhere to go.
    NavigateFailed {
        /// Requested direction.
        direction: Direction,
    },
    /// Activate key pressed on the target.
    EnterDown,
    /// Activate key released on the target.
    EnterUp,
    /// A directional move from the target is about to be resolved. Cancelable.
    WillMove {
        /// Requested direction.
        direction: Direction,
        /// Section owning the target.
        section: String,
        /// What asked for the move.
        cause: MoveCause,
    },
}

impl<E> NavEvent<E> {
    /// Stable event name, e.g. `"will-focus"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WillUnfocus(_) => "will-unfocus",
            Self::Unfocused(_) => "unfocused",
            Self::WillFocus(_) => "will-focus",
            Self::Focused(_) => "focused",
            Self::NavigateFailed { .. } => "navigate-failed",
            Self::EnterDown => "enter-down",
            Self::EnterUp => "enter-up",
            Self::WillMove { .. } => "will-move",
        }
    }

    /// Whether a `false` from the host vetoes the transition.
    pub fn is_cancelable(&self) -> bool {
        matches!(
            self,
            Self::WillUnfocus(_) | Self::WillFocus(_) | Self::WillMove { .. }
        )
    }
}

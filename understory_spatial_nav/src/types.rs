// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for spatial navigation: directions, flags, keys, selectors, and section policies.
//!
//! ## Overview
//!
//! These types describe the vocabulary shared by the [`resolver`](crate::resolver),
//! the [`registry`](crate::registry), and the [`navigator`](crate::navigator).
//! They carry no behavior beyond small conversions.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A directional navigation request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

impl Direction {
    /// All four directions, in `left, right, up, down` order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Lowercase name of the direction (`"left"`, `"right"`, `"up"`, `"down"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parses a direction name, ignoring ASCII case.
    ///
    /// ```
    /// use understory_spatial_nav::types::Direction;
    /// assert_eq!(Direction::from_name("LEFT"), Some(Direction::Left));
    /// assert_eq!(Direction::from_name("sideways"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

bitflags::bitflags! {
    /// Host-reported element state controlling navigability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element occupies space on screen.
        const VISIBLE = 0b0000_0001;
        /// Element is not disabled.
        const ENABLED = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a key event.
    ///
    /// Key handling in the [`Navigator`](crate::navigator::Navigator) ignores any
    /// event with a modifier held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// An abstract key, already translated from raw host input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// One of the four arrow directions.
    Direction(Direction),
    /// The activate key.
    Enter,
    /// Anything else; never handled.
    Other,
}

impl Key {
    /// Maps the classic DOM key codes (37–40 arrows, 13 enter).
    pub const fn from_key_code(code: u32) -> Self {
        match code {
            37 => Self::Direction(Direction::Left),
            38 => Self::Direction(Direction::Up),
            39 => Self::Direction(Direction::Right),
            40 => Self::Direction(Direction::Down),
            13 => Self::Enter,
            _ => Self::Other,
        }
    }
}

/// What the host should do with the raw key event after the navigator saw it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyResponse {
    /// Not handled; let the event continue.
    Ignored,
    /// Handled; the host should stop default processing.
    Consumed,
}

/// A set of elements, resolved through the host.
///
/// `Section` and `DefaultSection` are "extended" forms: only
/// [`Navigator::focus`](crate::navigator::Navigator::focus), `leave_for`
/// targets, and element exit overrides understand them. Everywhere else they
/// resolve to nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Selector<E> {
    /// A host query string. The empty query matches nothing.
    Query(String),
    /// An explicit, ordered element list.
    Elements(Vec<E>),
    /// `@id`: the entry element of the named section.
    Section(String),
    /// `@`: the entry element of the default, last, or first available section.
    DefaultSection,
}

impl<E> Default for Selector<E> {
    fn default() -> Self {
        Self::Query(String::new())
    }
}

impl<E> Selector<E> {
    /// Parses the textual selector syntax.
    ///
    /// ```
    /// use understory_spatial_nav::types::Selector;
    /// assert_eq!(Selector::<u32>::parse("@"), Selector::DefaultSection);
    /// assert_eq!(Selector::<u32>::parse("@menu"), Selector::Section("menu".into()));
    /// assert_eq!(Selector::<u32>::parse(".item"), Selector::Query(".item".into()));
    /// ```
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix('@') {
            Some("") => Self::DefaultSection,
            Some(id) => Self::Section(id.into()),
            None => Self::Query(text.into()),
        }
    }

    /// A selector for exactly one element.
    pub fn element(element: E) -> Self {
        Self::Elements(vec![element])
    }

    /// Returns true for the `@` forms.
    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Section(_) | Self::DefaultSection)
    }
}

/// A `leave_for` or element-declared exit target.
#[derive(Clone, Debug, PartialEq)]
pub enum Exit<E> {
    /// Block the move: navigation in this direction fails.
    Nowhere,
    /// Go to the first navigable element of the selector.
    To(Selector<E>),
}

impl<E> Exit<E> {
    /// Parses the textual exit syntax: an empty string blocks the move,
    /// anything else is a [`Selector`].
    ///
    /// ```
    /// use understory_spatial_nav::types::{Exit, Selector};
    /// assert_eq!(Exit::<u32>::parse(""), Exit::Nowhere);
    /// assert_eq!(Exit::<u32>::parse("@menu"), Exit::To(Selector::Section("menu".into())));
    /// ```
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            Self::Nowhere
        } else {
            Self::To(Selector::parse(text))
        }
    }
}

/// Per-direction exit targets for a section.
///
/// `None` for a direction means "unset": geometric navigation decides.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaveFor<E> {
    /// Exit when moving left.
    pub left: Option<Exit<E>>,
    /// Exit when moving right.
    pub right: Option<Exit<E>>,
    /// Exit when moving up.
    pub up: Option<Exit<E>>,
    /// Exit when moving down.
    pub down: Option<Exit<E>>,
}

impl<E> Default for LeaveFor<E> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            up: None,
            down: None,
        }
    }
}

impl<E> LeaveFor<E> {
    /// The exit declared for `direction`, if any.
    pub fn get(&self, direction: Direction) -> Option<&Exit<E>> {
        match direction {
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, direction: Direction, exit: Exit<E>) -> Self {
        let slot = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        *slot = Some(exit);
        self
    }
}

/// Which element a section offers when focus enters it from elsewhere.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EnterTo {
    /// Prefer the element that last had focus in the section.
    LastFocused,
    /// Prefer the section's configured default element.
    DefaultElement,
}

/// Which sections a directional search may cross into.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Restrict {
    /// Search the origin section, then everything else.
    #[default]
    SelfFirst,
    /// Search only the origin section.
    SelfOnly,
    /// Search all sections at once.
    None,
}

/// The last successful move out of a section, used for remember-source tie-breaking.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Previous<E> {
    /// Element the move started from.
    pub target: E,
    /// Element the move arrived at.
    pub destination: E,
    /// Direction that would undo the move.
    pub reverse: Direction,
}

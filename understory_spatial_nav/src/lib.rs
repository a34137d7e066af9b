// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spatial_nav --heading-base-level=0

//! Understory Spatial Nav: directional focus navigation for UIs driven by arrow keys.
//!
//! ## Overview
//!
//! Given the currently focused element and a [`Direction`](crate::types::Direction),
//! this crate picks the element that should receive focus next, using only the
//! geometry of the candidates. It is meant for TV-style and remote-control
//! interfaces where there is no pointer.
//!
//! Elements are grouped into named sections. Each section carries optional
//! overrides layered over a global [`GlobalConfig`](crate::config::GlobalConfig):
//! how far a search may reach ([`Restrict`](crate::types::Restrict)), where focus
//! goes when it leaves ([`LeaveFor`](crate::types::LeaveFor)) or enters
//! ([`EnterTo`](crate::types::EnterTo)) the section, and which members are navigable.
//!
//! ## Layers
//!
//! - [`geometry`](crate::geometry): partition candidates into a 3×3 grid around the
//!   origin and rank them by direction-specific distance chains.
//! - [`resolver`](crate::resolver): a pure function from origin, direction, and
//!   candidates to the destination. Usable on its own.
//! - [`registry`](crate::registry): sections, their configuration, and focus memory.
//! - [`navigator`](crate::navigator): the stateful orchestrator. It fires the
//!   lifecycle [events](crate::event::NavEvent), honors vetoes, and exposes the
//!   public API.
//!
//! The environment (element rectangles, selector queries, focus, and the event
//! bus) is abstracted behind the [`Host`](crate::host::Host) trait.
//!
//! ## Resolver only
//!
//! ```
//! use kurbo::Rect;
//! use understory_spatial_nav::resolver::{navigate, NavParams};
//! use understory_spatial_nav::types::Direction;
//!
//! // A over B, C to the right of A.
//! let rects = [
//!     Rect::new(50.0, 50.0, 150.0, 150.0),
//!     Rect::new(50.0, 250.0, 150.0, 350.0),
//!     Rect::new(250.0, 50.0, 350.0, 150.0),
//! ];
//! let measure = |i: usize| rects.get(i).copied();
//!
//! let down = navigate(0, Direction::Down, &[1, 2], &NavParams::default(), measure);
//! assert_eq!(down, Some(1));
//! ```
//!
//! ## Events
//!
//! A focus change fires `will-unfocus`, `unfocused`, `will-focus`, and `focused`,
//! in that order. The `will-*` events are cancelable. A move with nowhere to go
//! fires `navigate-failed` on the origin. Handlers that want to redirect focus
//! queue the request on the [`Reentry`](crate::host::Reentry) they are given;
//! requests made during a focus change commit without further events.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod navigator;
pub mod registry;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;

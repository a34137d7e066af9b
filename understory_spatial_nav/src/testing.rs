// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Host`] for unit tests.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::event::NavEvent;
use crate::host::{Host, Reentry, Request};
use crate::types::{Direction, ElementFlags, Exit};

#[derive(Clone, Debug)]
struct Node {
    rect: Option<Rect>,
    flags: ElementFlags,
    tags: Vec<&'static str>,
}

/// Elements are indices into a flat list; queries match by tag.
#[derive(Clone, Debug, Default)]
pub(crate) struct TestHost {
    nodes: Vec<Node>,
    focused: Option<u32>,
    /// Every delivered notification, in order.
    pub(crate) events: Vec<(u32, NavEvent<u32>)>,
    vetoes: Vec<(&'static str, u32)>,
    reactions: Vec<(&'static str, u32, Request<u32>)>,
    exits: Vec<(u32, Direction, Exit<u32>)>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, rect: Rect, tags: &[&'static str]) -> u32 {
        let id = u32::try_from(self.nodes.len()).unwrap();
        self.nodes.push(Node {
            rect: Some(rect),
            flags: ElementFlags::default(),
            tags: tags.to_vec(),
        });
        id
    }

    /// A `cols`-wide grid of 100x100 cells with 10px gutters, all tagged `tag`.
    pub(crate) fn grid(&mut self, tag: &'static str, origin: (f64, f64), cols: u32, rows: u32) -> Vec<u32> {
        let mut out = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let x = origin.0 + f64::from(c) * 110.0;
                let y = origin.1 + f64::from(r) * 110.0;
                out.push(self.add(Rect::new(x, y, x + 100.0, y + 100.0), &[tag]));
            }
        }
        out
    }

    pub(crate) fn set_flags(&mut self, element: u32, flags: ElementFlags) {
        self.nodes[element as usize].flags = flags;
    }

    pub(crate) fn set_rect(&mut self, element: u32, rect: Option<Rect>) {
        self.nodes[element as usize].rect = rect;
    }

    /// Force host focus without notifying anyone.
    pub(crate) fn set_focused(&mut self, element: Option<u32>) {
        self.focused = element;
    }

    /// Return `false` whenever `name` is delivered to `element`.
    pub(crate) fn veto(&mut self, name: &'static str, element: u32) {
        self.vetoes.push((name, element));
    }

    /// Queue `request` the first time `name` is delivered to `element`.
    pub(crate) fn react(&mut self, name: &'static str, element: u32, request: Request<u32>) {
        self.reactions.push((name, element, request));
    }

    pub(crate) fn set_exit(&mut self, element: u32, direction: Direction, exit: Exit<u32>) {
        self.exits.push((element, direction, exit));
    }

    /// `(target, name)` for every delivered notification.
    pub(crate) fn log(&self) -> Vec<(u32, &'static str)> {
        self.events.iter().map(|(t, e)| (*t, e.name())).collect()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|(_, e)| e.name() == name).count()
    }

    pub(crate) fn clear_log(&mut self) {
        self.events.clear();
    }
}

impl Host for TestHost {
    type Element = u32;

    fn measure(&self, element: u32) -> Option<Rect> {
        self.nodes.get(element as usize).and_then(|n| n.rect)
    }

    fn query(&self, query: &str) -> Vec<u32> {
        (0_u32..)
            .zip(&self.nodes)
            .filter(|(_, n)| n.tags.contains(&query))
            .map(|(id, _)| id)
            .collect()
    }

    fn matches(&self, element: u32, query: &str) -> bool {
        self.nodes
            .get(element as usize)
            .is_some_and(|n| n.tags.contains(&query))
    }

    fn flags(&self, element: u32) -> ElementFlags {
        self.nodes
            .get(element as usize)
            .map_or(ElementFlags::empty(), |n| n.flags)
    }

    fn focus(&mut self, element: u32) {
        self.focused = Some(element);
    }

    fn blur(&mut self, element: u32) {
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<u32> {
        self.focused
    }

    fn notify(&mut self, target: u32, event: &NavEvent<u32>, reentry: &mut Reentry<u32>) -> bool {
        let name = event.name();
        self.events.push((target, event.clone()));
        if let Some(i) = self
            .reactions
            .iter()
            .position(|(n, t, _)| *n == name && *t == target)
        {
            let (_, _, request) = self.reactions.remove(i);
            reentry.push(request);
        }
        !self.vetoes.contains(&(name, target))
    }

    fn exit_override(&self, element: u32, direction: Direction) -> Option<Exit<u32>> {
        self.exits
            .iter()
            .find(|(e, d, _)| *e == element && *d == direction)
            .map(|(_, _, exit)| exit.clone())
    }
}

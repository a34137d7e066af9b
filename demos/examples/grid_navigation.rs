// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid navigation.
//!
//! A single section holding a 4×3 grid of tiles with a wide footer button.
//! Arrow key codes are replayed through the navigator and every focus change
//! is printed.
//!
//! Run:
//! - `cargo run -p understory_spatial_nav_demos --example grid_navigation`
//! - `RUST_LOG=understory_spatial_nav=trace cargo run -p understory_spatial_nav_demos --example grid_navigation`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_spatial_nav::config::ConfigPatch;
use understory_spatial_nav::event::NavEvent;
use understory_spatial_nav::host::{Host, Reentry};
use understory_spatial_nav::navigator::Navigator;
use understory_spatial_nav::types::{ElementFlags, Key, Modifiers, Selector};

struct Tile {
    name: String,
    rect: Rect,
}

#[derive(Default)]
struct Screen {
    tiles: Vec<Tile>,
    focused: Option<usize>,
}

impl Screen {
    fn push(&mut self, name: impl Into<String>, rect: Rect) {
        self.tiles.push(Tile {
            name: name.into(),
            rect,
        });
    }

    fn name(&self, id: usize) -> &str {
        &self.tiles[id].name
    }
}

impl Host for Screen {
    type Element = usize;

    fn measure(&self, element: usize) -> Option<Rect> {
        self.tiles.get(element).map(|t| t.rect)
    }

    fn query(&self, query: &str) -> Vec<usize> {
        (0..self.tiles.len())
            .filter(|&i| self.matches(i, query))
            .collect()
    }

    fn matches(&self, element: usize, query: &str) -> bool {
        query == "tile" && element < self.tiles.len()
    }

    fn flags(&self, _element: usize) -> ElementFlags {
        ElementFlags::default()
    }

    fn focus(&mut self, element: usize) {
        self.focused = Some(element);
    }

    fn blur(&mut self, element: usize) {
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<usize> {
        self.focused
    }

    fn notify(&mut self, target: usize, event: &NavEvent<usize>, _: &mut Reentry<usize>) -> bool {
        match event {
            NavEvent::Focused(detail) => {
                let dir = detail.direction.map_or("-", |d| d.name());
                println!("  focused {:<8} (via {dir})", self.name(target));
            }
            NavEvent::NavigateFailed { direction } => {
                println!("  bump at {} going {}", self.name(target), direction.name());
            }
            _ => {}
        }
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut screen = Screen::default();
    for row in 0..3 {
        for col in 0..4 {
            let x = f64::from(col) * 120.0;
            let y = f64::from(row) * 90.0;
            screen.push(
                format!("r{row}c{col}"),
                Rect::new(x, y, x + 100.0, y + 70.0),
            );
        }
    }
    screen.push("footer", Rect::new(0.0, 280.0, 460.0, 330.0));

    let mut nav = Navigator::new(screen);
    nav.add(
        Some("grid"),
        ConfigPatch::with_selector(Selector::Query("tile".into())),
    )
    .expect("fresh navigator has no sections");
    nav.init();

    // 37..=40 are the arrows (left, up, right, down), 13 is enter.
    let codes = [39, 39, 40, 40, 40, 38, 37, 37, 37, 38, 38, 13];
    println!("== Key replay ==");
    for code in codes {
        let key = Key::from_key_code(code);
        let response = nav.handle_key_down(key, Modifiers::empty());
        println!("{key:?} -> {response:?}");
    }
}

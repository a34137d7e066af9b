// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections, exits, and vetoes.
//!
//! A sidebar menu and a content grid, each a section. The sidebar remembers
//! its last item, the grid's upward exit is blocked, and a locked tile vetoes
//! focus and redirects to the menu instead.
//!
//! Run:
//! - `cargo run -p understory_spatial_nav_demos --example sections`
//! - `RUST_LOG=debug cargo run -p understory_spatial_nav_demos --example sections`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_spatial_nav::config::{ConfigPatch, Patch};
use understory_spatial_nav::event::NavEvent;
use understory_spatial_nav::host::{Host, Reentry};
use understory_spatial_nav::navigator::Navigator;
use understory_spatial_nav::types::{
    Direction, ElementFlags, EnterTo, Exit, LeaveFor, Restrict, Selector,
};

struct Item {
    name: &'static str,
    class: &'static str,
    rect: Rect,
    flags: ElementFlags,
}

#[derive(Default)]
struct App {
    items: Vec<Item>,
    focused: Option<usize>,
    locked: Option<usize>,
}

impl App {
    fn push(&mut self, name: &'static str, class: &'static str, rect: Rect) -> usize {
        self.items.push(Item {
            name,
            class,
            rect,
            flags: ElementFlags::default(),
        });
        self.items.len() - 1
    }

    fn focused_name(&self) -> &'static str {
        self.focused.map_or("<none>", |i| self.items[i].name)
    }
}

impl Host for App {
    type Element = usize;

    fn measure(&self, element: usize) -> Option<Rect> {
        self.items.get(element).map(|i| i.rect)
    }

    fn query(&self, query: &str) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&i| self.matches(i, query))
            .collect()
    }

    fn matches(&self, element: usize, query: &str) -> bool {
        self.items.get(element).is_some_and(|i| {
            query
                .strip_prefix('#')
                .map_or(i.class == query, |name| i.name == name)
        })
    }

    fn flags(&self, element: usize) -> ElementFlags {
        self.items
            .get(element)
            .map_or(ElementFlags::empty(), |i| i.flags)
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

    fn notify(&mut self, target: usize, event: &NavEvent<usize>, reentry: &mut Reentry<usize>) -> bool {
        let name = self.items[target].name;
        match event {
            NavEvent::WillFocus(_) if self.locked == Some(target) => {
                println!("  {name} is locked, sending focus back to the menu");
                reentry.focus(Selector::parse("@menu"));
                false
            }
            NavEvent::Focused(detail) => {
                let section = detail.section.as_deref().unwrap_or("?");
                println!("  focused {name} in {section}");
                true
            }
            NavEvent::NavigateFailed { direction } => {
                println!("  cannot leave {name} going {}", direction.name());
                true
            }
            _ => true,
        }
    }
}

fn step(nav: &mut Navigator<App>, direction: Direction) {
    println!("{} from {}", direction.name(), nav.host().focused_name());
    let moved = nav.move_focus(direction, None);
    println!("  -> {moved}, now at {}", nav.host().focused_name());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut app = App::default();
    for (i, name) in ["home", "movies", "shows", "settings"].into_iter().enumerate() {
        let y = i as f64 * 60.0;
        app.push(name, "menu-item", Rect::new(0.0, y, 150.0, y + 50.0));
    }
    let mut tiles = Vec::new();
    for (i, name) in ["t1", "t2", "t3", "t4", "t5", "t6"].into_iter().enumerate() {
        let x = 200.0 + (i % 3) as f64 * 170.0;
        let y = (i / 3) as f64 * 130.0;
        tiles.push(app.push(name, "tile", Rect::new(x, y, x + 150.0, y + 110.0)));
    }
    app.locked = Some(tiles[4]);
    app.items[tiles[5]].flags = ElementFlags::VISIBLE;

    let mut nav = Navigator::new(app);
    nav.add(
        Some("menu"),
        ConfigPatch {
            enter_to: Patch::Set(Some(EnterTo::LastFocused)),
            default_element: Patch::Set(Some(Selector::Query("#home".into()))),
            restrict: Patch::Set(Restrict::SelfFirst),
            ..ConfigPatch::with_selector(Selector::Query("menu-item".into()))
        },
    )
    .expect("menu is the first section");
    let grid = nav
        .add(
            None,
            ConfigPatch {
                leave_for: Patch::Set(Some(
                    LeaveFor::default().with(Direction::Up, Exit::Nowhere),
                )),
                ..ConfigPatch::with_selector(Selector::Query("tile".into()))
            },
        )
        .expect("generated ids are unique");
    nav.set_default_section(Some("menu"))
        .expect("menu was just added");
    nav.init();

    println!("== Enter the default section ==");
    nav.focus(None, false);

    println!("== Walk the menu, then cross into {grid} ==");
    step(&mut nav, Direction::Down);
    step(&mut nav, Direction::Right);
    step(&mut nav, Direction::Up);
    step(&mut nav, Direction::Down);

    println!("== t5 is locked and redirects to the menu ==");
    step(&mut nav, Direction::Right);

    println!("== Back to the menu lands on the remembered item ==");
    nav.focus(Some(Selector::Query("#t1".into())), true);
    step(&mut nav, Direction::Left);

    println!("== t6 is disabled, so right from t5 finds nothing ==");
    nav.focus(Some(Selector::Query("#t5".into())), true);
    step(&mut nav, Direction::Right);

    println!("== Sections: {:?} ==", nav.section_ids().collect::<Vec<_>>());
}

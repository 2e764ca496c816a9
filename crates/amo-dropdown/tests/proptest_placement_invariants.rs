//! Property-based invariant tests for placement and listener lifecycle.
//!
//! 1. Enough room below always resolves `Bottom` under `Auto`.
//! 2. Too little room below with more room above always resolves `Top`.
//! 3. Explicit preferences always win.
//! 4. The panel is always left-aligned with the trigger and `offset` away.
//! 5. Any sequence of operations leaves exactly one listener pair while open
//!    and none while closed, and placement is set iff open.

use amo_core::event::{Event, KeyCode};
use amo_core::geometry::{Rect, Size};
use amo_dropdown::placement::{PlacementInput, PlacementPreference, Side, resolve};
use amo_dropdown::{Document, DropdownBuilder, DropdownConfig, SharedGeometry};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = PlacementInput> {
    (
        0i32..=1000,
        1i32..=200,
        200i32..=1200,
        1i32..=600,
        0i32..=32,
    )
        .prop_map(|(y, h, viewport_h, panel_h, offset)| PlacementInput {
            trigger: Rect::new(50.0, y as f32, 120.0, h as f32),
            viewport: Rect::from_size(1280.0, viewport_h as f32),
            preference: PlacementPreference::Auto,
            offset: offset as f32,
            panel: Size::new(180.0, panel_h as f32),
        })
}

proptest! {
    #[test]
    fn room_below_means_bottom(input in input_strategy()) {
        prop_assume!(input.space_below() >= input.panel.height + input.offset);
        prop_assert_eq!(resolve(&input).side, Side::Bottom);
    }

    #[test]
    fn cramped_below_and_roomier_above_means_top(input in input_strategy()) {
        prop_assume!(input.space_below() < input.panel.height + input.offset);
        prop_assume!(input.space_above() > input.space_below());
        prop_assert_eq!(resolve(&input).side, Side::Top);
    }

    #[test]
    fn explicit_preference_wins(input in input_strategy(), top in any::<bool>()) {
        let (preference, side) = if top {
            (PlacementPreference::Top, Side::Top)
        } else {
            (PlacementPreference::Bottom, Side::Bottom)
        };
        let input = PlacementInput { preference, ..input };
        prop_assert_eq!(resolve(&input).side, side);
    }

    #[test]
    fn panel_hugs_trigger(input in input_strategy()) {
        let placed = resolve(&input);
        prop_assert_eq!(placed.panel.x, input.trigger.x);
        match placed.side {
            Side::Bottom => prop_assert_eq!(placed.panel.top() - input.trigger.bottom(), input.offset),
            Side::Top => prop_assert_eq!(input.trigger.top() - placed.panel.bottom(), input.offset),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Toggle,
    Open,
    Close,
    Escape,
    PressTrigger,
    PressOutside,
    Resize,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Toggle),
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::Escape),
        Just(Op::PressTrigger),
        Just(Op::PressOutside),
        Just(Op::Resize),
    ]
}

proptest! {
    #[test]
    fn listener_pair_tracks_open_state(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let document = Document::new();
        let geometry = SharedGeometry::with(Rect::new(100.0, 100.0, 120.0, 36.0), Size::new(1280.0, 800.0));
        let mut dropdown = DropdownBuilder::new(&document)
            .config(DropdownConfig::default())
            .measure(geometry)
            .mount(|_t| (), |_c| ());

        for op in ops {
            match op {
                Op::Toggle => dropdown.toggle(),
                Op::Open => dropdown.request_open(),
                Op::Close => dropdown.request_close(),
                Op::Escape => {
                    dropdown.handle_event(&Event::key(KeyCode::Escape));
                }
                Op::PressTrigger => {
                    dropdown.handle_event(&Event::press(110.0, 110.0));
                }
                Op::PressOutside => {
                    dropdown.handle_event(&Event::press(1200.0, 780.0));
                }
                Op::Resize => {
                    dropdown.handle_event(&Event::Resize { width: 1280.0, height: 800.0 });
                }
            }
            let expected = if dropdown.is_open() { 2 } else { 0 };
            prop_assert_eq!(document.listener_count(), expected);
            prop_assert_eq!(dropdown.is_watching(), dropdown.is_open());
            prop_assert_eq!(
                dropdown.state().resolved_placement().is_some(),
                dropdown.is_open()
            );
        }

        drop(dropdown);
        prop_assert_eq!(document.listener_count(), 0);
    }
}

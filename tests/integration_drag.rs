use focus_wm::layout::{Position, Size, clamp_position};
use focus_wm::window::{PointerEvent, PointerKind, SurfaceAction};
use focus_wm::workspace::PointerOutcome;
use focus_wm::{LayoutConfig, WidgetId, Workspace};
use proptest::prelude::*;

fn id(name: &str) -> WidgetId {
    WidgetId::from(name)
}

fn pointer(kind: PointerKind, x: i32, y: i32) -> PointerEvent {
    PointerEvent::new(kind, x, y)
}

/// Drag `a` from its header at (150, 110) and release at the given delta.
fn drag_a(moves: &[(i32, i32)], release: (i32, i32)) -> Position {
    let mut ws = Workspace::in_memory(LayoutConfig::default(), Size::new(800, 600));
    ws.open_widget("a");
    ws.handle_pointer(pointer(PointerKind::Down, 150, 110));
    for (dx, dy) in moves {
        ws.handle_pointer(pointer(PointerKind::Move, 150 + dx, 110 + dy));
    }
    ws.handle_pointer(pointer(PointerKind::Up, 150 + release.0, 110 + release.1));
    ws.get_position(&id("a")).unwrap()
}

#[test]
fn thousand_moves_commit_like_one() {
    let release = (173, -41);
    let jitter: Vec<(i32, i32)> = (0..1000)
        .map(|step| if step % 2 == 0 { (600, 500) } else { (-600, -500) })
        .collect();
    let one = drag_a(&[release], release);
    let many = drag_a(&jitter, release);
    assert_eq!(one, Position::new(273, 59));
    assert_eq!(one, many);
}

#[test]
fn displacement_is_one_hop() {
    let config = LayoutConfig {
        max_attempts: 1,
        ..LayoutConfig::default()
    };
    let mut ws = Workspace::in_memory(config, Size::new(800, 600));
    for name in ["a", "b", "c"] {
        ws.open_widget(name);
    }
    ws.store_mut().update_position(&id("a"), 100, 380);
    ws.store_mut().update_position(&id("b"), 100, 100);
    ws.store_mut().update_position(&id("c"), 450, 100);

    ws.handle_pointer(pointer(PointerKind::Down, 110, 390));
    let outcome = ws.handle_pointer(pointer(PointerKind::Up, 110, 110));
    let PointerOutcome::Widget {
        action: SurfaceAction::DragEnded { position, displaced },
        ..
    } = outcome
    else {
        panic!("expected a committed drag, got {outcome:?}");
    };
    assert_eq!(position, Position::new(100, 100));
    // b only gets one candidate: east of the anchor, right onto c
    assert_eq!(displaced, vec![(id("b"), Position::new(180, 100))]);
    // c never touched a, so it is not re-checked against b's new spot
    assert_eq!(ws.get_position(&id("c")), Some(Position::new(450, 100)));
    let b = ws.store().rect(&id("b")).unwrap();
    let c = ws.store().rect(&id("c")).unwrap();
    assert!(b.overlaps(&c));
}

#[test]
fn interacting_raises_and_keeps_order_of_the_rest() {
    let mut ws = Workspace::in_memory(LayoutConfig::default(), Size::new(800, 600));
    for name in ["a", "b", "c"] {
        ws.open_widget(name);
    }
    // click a's content
    ws.handle_pointer(pointer(PointerKind::Down, 200, 200));
    assert_eq!(ws.store().stack(), &[id("b"), id("c"), id("a")]);
    let z: Vec<u32> = ws
        .store()
        .stack()
        .iter()
        .map(|w| ws.store().z_index(w).unwrap())
        .collect();
    assert_eq!(z, vec![1000, 1001, 1002]);
}

proptest! {
    #[test]
    fn committed_position_is_clamped_start_plus_delta(
        dx in -900i32..900,
        dy in -700i32..700,
        noise in prop::collection::vec((-1000i32..1000, -1000i32..1000), 0..50),
    ) {
        let expected = clamp_position(
            Position::new(100 + dx, 100 + dy),
            Size::new(300, 200),
            Size::new(800, 600),
            10,
        );
        prop_assert_eq!(drag_a(&noise, (dx, dy)), expected);
        prop_assert_eq!(drag_a(&[], (dx, dy)), expected);
    }

    #[test]
    fn front_widget_has_highest_z(ops in prop::collection::vec(0usize..5, 1..40)) {
        let mut ws = Workspace::in_memory(LayoutConfig::default(), Size::new(1600, 1200));
        let names = ["a", "b", "c", "d", "e"];
        for op in ops {
            let target = id(names[op]);
            ws.store_mut().bring_to_front(&target);
            let top = ws.store().z_index(&target).unwrap();
            for other in ws.store().stack() {
                if *other != target {
                    prop_assert!(ws.store().z_index(other).unwrap() < top);
                }
            }
            let snapshot = ws.store().snapshot();
            prop_assert_eq!(snapshot.widgets.stack.len(), snapshot.widgets.positions.len());
        }
    }
}

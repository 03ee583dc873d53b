use focus_wm::layout::{Position, Rect, Size, fits_viewport};
use focus_wm::{LayoutConfig, WidgetId, Workspace};
use proptest::prelude::*;

fn workspace(viewport: Size) -> Workspace {
    Workspace::in_memory(LayoutConfig::default(), viewport)
}

#[test]
fn three_widgets_open_in_ring_order() {
    let mut ws = workspace(Size::new(800, 600));
    assert_eq!(ws.open_widget("a"), Position::new(100, 100));
    // (180, 100) and the other first-ring spots all overlap A; the first free
    // candidate is straight down on the third ring
    assert_eq!(ws.open_widget("b"), Position::new(100, 340));
    assert_eq!(ws.open_widget("c"), Position::new(420, 100));
    assert_eq!(
        ws.open_widgets(),
        vec![WidgetId::from("a"), WidgetId::from("b"), WidgetId::from("c")]
    );
}

#[test]
fn crowded_viewport_still_opens() {
    let mut ws = workspace(Size::new(320, 240));
    let first = ws.open_widget("a");
    let second = ws.open_widget("b");
    assert_eq!(first, Position::new(10, 30));
    // nothing fits beside A; after 300 attempts the last candidate is ring 9
    // offset (9, -1), i.e. (820, 20) clamped
    let size = Size::new(300, 200);
    assert!(Rect::from_parts(first, size).overlaps(&Rect::from_parts(second, size)));
    assert_eq!(second, Position::new(10, 20));
    assert!(ws.is_open(&WidgetId::from("b")));
}

#[test]
fn closing_forgets_position() {
    let mut ws = workspace(Size::new(800, 600));
    ws.open_widget("a");
    ws.store_mut().update_position(&WidgetId::from("a"), 400, 300);
    ws.close_widget(&WidgetId::from("a"));
    assert_eq!(ws.get_position(&WidgetId::from("a")), None);
    assert_eq!(ws.open_widget("a"), Position::new(100, 100));
}

#[test]
fn measured_size_feeds_later_placements() {
    let mut ws = workspace(Size::new(1200, 900));
    ws.open_widget("wide");
    ws.set_measured_size(&WidgetId::from("wide"), Size::new(600, 200));
    let next = ws.open_widget("next");
    let wide = Rect::new(100, 100, 600, 200);
    assert!(!wide.overlaps(&Rect::from_parts(next, Size::new(300, 200))));
}

proptest! {
    #[test]
    fn opens_never_overlap_on_roomy_viewports(
        width in 1200i32..2000,
        height in 900i32..1400,
        count in 1usize..5,
    ) {
        let viewport = Size::new(width, height);
        let mut ws = workspace(viewport);
        let mut placed: Vec<Rect> = Vec::new();
        for index in 0..count {
            let position = ws.open_widget(format!("w{index}"));
            let rect = Rect::from_parts(position, Size::new(300, 200));
            prop_assert!(fits_viewport(rect, viewport, 10));
            prop_assert!(placed.iter().all(|other| !other.overlaps(&rect)));
            placed.push(rect);
        }
    }

    #[test]
    fn open_is_deterministic(width in 400i32..1600, height in 300i32..1200, count in 1usize..8) {
        let viewport = Size::new(width, height);
        let mut first = workspace(viewport);
        let mut second = workspace(viewport);
        for index in 0..count {
            let id = format!("w{index}");
            prop_assert_eq!(first.open_widget(id.clone()), second.open_widget(id));
        }
    }
}

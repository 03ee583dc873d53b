use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use focus_wm::dock::{Dock, DockItem, DockMetrics};
use focus_wm::layout::{Position, Size, fits_viewport};
use focus_wm::store::{JsonFileStorage, MemoryStorage};
use focus_wm::window::{PointerEvent, PointerKind};
use focus_wm::{LayoutConfig, WidgetId, Workspace};

fn id(name: &str) -> WidgetId {
    WidgetId::from(name)
}

fn dock() -> Dock {
    let items = ["a", "b"]
        .into_iter()
        .map(|name| DockItem {
            widget: id(name),
            label: name.to_string(),
        })
        .collect();
    Dock::new(items, DockMetrics::default())
}

#[test]
fn shrink_pulls_overflowing_widget_back() {
    let mut ws = Workspace::in_memory(LayoutConfig::default(), Size::new(800, 600));
    ws.open_widget("a");
    ws.store_mut().update_position(&id("a"), 750, 550);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    ws.on_position_change("a", move |pos| sink.borrow_mut().push(pos));

    let start = Instant::now();
    for step in 0..10u64 {
        let shrink = 30 * step as i32;
        ws.handle_resize(Size::new(800 - shrink, 600 - shrink), start + Duration::from_millis(10 * step));
    }
    ws.handle_resize(Size::new(500, 400), start + Duration::from_millis(100));
    assert!(ws.tick(start + Duration::from_millis(150)).is_empty());
    assert_eq!(ws.tick(start + Duration::from_millis(200)), vec![id("a")]);
    assert_eq!(ws.get_position(&id("a")), Some(Position::new(190, 190)));
    // one boundary pass, one notification
    assert_eq!(*seen.borrow(), vec![Position::new(190, 190)]);
}

#[test]
fn every_widget_is_on_screen_after_resize() {
    let mut ws = Workspace::in_memory(LayoutConfig::default(), Size::new(1600, 1200));
    for name in ["a", "b", "c", "d"] {
        ws.open_widget(name);
    }
    let viewport = Size::new(900, 700);
    ws.apply_viewport(viewport);
    for name in ["a", "b", "c", "d"] {
        let rect = ws.store().rect(&id(name)).unwrap();
        assert!(fits_viewport(rect, viewport, 10), "{name} at {rect:?}");
    }
}

#[test]
fn dock_is_clamped_on_resize() {
    let mut ws = Workspace::new(
        focus_wm::WindowStore::in_memory(LayoutConfig::default(), Size::new(800, 600)),
        dock(),
    );
    // drag the dock by its handle to the bottom-right corner
    let rect = ws.dock_rect();
    ws.handle_pointer(PointerEvent::new(PointerKind::Down, rect.x + 2, rect.y + 2));
    ws.handle_pointer(PointerEvent::new(PointerKind::Up, 2000, 2000));
    assert_eq!(
        ws.dock_state().position,
        Position::new(800 - 192 - 10, 600 - 48 - 10)
    );
    ws.apply_viewport(Size::new(400, 300));
    assert_eq!(ws.dock_state().position, Position::new(400 - 192 - 10, 300 - 48 - 10));
}

#[test]
fn layout_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let viewport = Size::new(800, 600);
    {
        let mut ws = Workspace::with_storage(
            LayoutConfig::default(),
            viewport,
            JsonFileStorage::new(&path),
            dock(),
        );
        ws.open_widget("a");
        ws.open_widget("b");
        ws.open_widget("c");
        ws.close_widget(&id("c"));
        // drag b by its header to the right
        ws.handle_pointer(PointerEvent::new(PointerKind::Down, 150, 350));
        ws.handle_pointer(PointerEvent::new(PointerKind::Up, 550, 350));
        // collapse a through its minimize control
        ws.handle_pointer(PointerEvent::new(PointerKind::Down, 350, 110));
        ws.set_dock_collapsed(true);
    }

    let mut ws = Workspace::with_storage(
        LayoutConfig::default(),
        viewport,
        JsonFileStorage::new(&path),
        dock(),
    );
    assert_eq!(ws.restore_session(), vec![id("b"), id("a")]);
    assert_eq!(ws.get_position(&id("a")), Some(Position::new(100, 100)));
    assert_eq!(ws.get_position(&id("b")), Some(Position::new(490, 340)));
    assert_eq!(ws.get_position(&id("c")), None);
    assert!(ws.store().is_collapsed(&id("a")));
    assert_eq!(ws.focused(), Some(&id("a")));
    assert!(ws.dock_state().collapsed);
}

#[test]
fn restored_layout_is_reclamped_to_a_smaller_screen() {
    let storage = MemoryStorage::new();
    {
        let mut ws = Workspace::with_storage(
            LayoutConfig::default(),
            Size::new(1600, 1200),
            storage.clone(),
            dock(),
        );
        ws.open_widget("a");
        ws.store_mut().update_position(&id("a"), 1200, 900);
    }
    let mut ws = Workspace::with_storage(
        LayoutConfig::default(),
        Size::new(800, 600),
        storage,
        dock(),
    );
    ws.restore_session();
    assert_eq!(ws.get_position(&id("a")), Some(Position::new(490, 390)));
}

fn session(storage: &MemoryStorage) -> Workspace {
    Workspace::with_storage(
        LayoutConfig::default(),
        Size::new(800, 600),
        storage.clone(),
        dock(),
    )
}

#[test]
fn new_widget_opened_before_restore_keeps_clear_of_saved_spot() {
    let storage = MemoryStorage::new();
    session(&storage).open_widget("a");

    let mut ws = session(&storage);
    let c = ws.open_widget("c");
    let a = ws.open_widget("a");
    assert_eq!(a, Position::new(100, 100));
    assert_eq!(c, Position::new(100, 340));
    let a_rect = ws.store().rect(&id("a")).unwrap();
    let c_rect = ws.store().rect(&id("c")).unwrap();
    assert!(!a_rect.overlaps(&c_rect));
}

#[test]
fn widgets_not_reopened_are_kept_for_later_sessions() {
    let storage = MemoryStorage::new();
    {
        let mut ws = session(&storage);
        ws.open_widget("a");
        ws.open_widget("b");
    }
    {
        let mut ws = session(&storage);
        ws.open_widget("c");
        ws.close_widget(&id("b"));
    }
    let mut ws = session(&storage);
    assert_eq!(ws.restore_session(), vec![id("a"), id("c")]);
    assert_eq!(ws.get_position(&id("a")), Some(Position::new(100, 100)));
    assert_eq!(ws.get_position(&id("b")), None);
}

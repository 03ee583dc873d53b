//! The widgets the workspace can host.
//!
//! Widget feature logic (timers, task lists, playback) lives behind other
//! services; the window manager only needs an id, a title and a size to lay
//! each one out. The bodies below are static previews for the terminal host.

use indoc::indoc;

use crate::dock::DockItem;
use crate::layout::Size;
use crate::window::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub hotkey: char,
    /// Preferred size in terminal cells, chrome included.
    pub size: Size,
    pub body: &'static str,
}

impl WidgetSpec {
    pub fn widget_id(&self) -> WidgetId {
        WidgetId::from(self.id)
    }
}

pub const CATALOG: [WidgetSpec; 7] = [
    WidgetSpec {
        id: "pomodoro",
        title: "Pomodoro",
        hotkey: '1',
        size: Size::new(26, 8),
        body: indoc! {"
            Focus   25:00
            Break   05:00

            [ start ]  [ reset ]
        "},
    },
    WidgetSpec {
        id: "tasks",
        title: "Tasks",
        hotkey: '2',
        size: Size::new(34, 12),
        body: indoc! {"
            [ ] Draft weekly plan
            [ ] Review open tickets
            [x] Inbox zero

            + add task
        "},
    },
    WidgetSpec {
        id: "music",
        title: "Music",
        hotkey: '3',
        size: Size::new(30, 9),
        body: indoc! {"
            Lo-fi focus mix
            00:00 ----------- 58:12

            |<<    >    >>|
        "},
    },
    WidgetSpec {
        id: "background",
        title: "Background",
        hotkey: '4',
        size: Size::new(30, 8),
        body: indoc! {"
            ( ) Forest
            (*) Night sky
            ( ) Ocean
        "},
    },
    WidgetSpec {
        id: "projects",
        title: "Projects",
        hotkey: '5',
        size: Size::new(34, 10),
        body: indoc! {"
            Website refresh     3 open
            Quarterly report    1 open
            Reading list        7 open
        "},
    },
    WidgetSpec {
        id: "reports",
        title: "Reports",
        hotkey: '6',
        size: Size::new(36, 10),
        body: indoc! {"
            This week   11h 20m focused
            Sessions    27
            Streak      5 days
        "},
    },
    WidgetSpec {
        id: "support",
        title: "Support",
        hotkey: '7',
        size: Size::new(30, 8),
        body: indoc! {"
            Questions or feedback?
            Press 7 again to close.
        "},
    },
];

pub fn find(id: &WidgetId) -> Option<&'static WidgetSpec> {
    CATALOG.iter().find(|entry| entry.id == id.as_str())
}

pub fn by_hotkey(key: char) -> Option<&'static WidgetSpec> {
    CATALOG.iter().find(|entry| entry.hotkey == key)
}

/// Dock launchers, one per catalog entry, in hotkey order.
pub fn dock_items() -> Vec<DockItem> {
    CATALOG
        .iter()
        .map(|entry| DockItem {
            widget: entry.widget_id(),
            label: entry.title.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn ids_and_hotkeys_are_unique() {
        let ids: BTreeSet<_> = CATALOG.iter().map(|entry| entry.id).collect();
        let keys: BTreeSet<_> = CATALOG.iter().map(|entry| entry.hotkey).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(keys.len(), CATALOG.len());
    }

    #[test]
    fn lookup_by_id_and_hotkey() {
        assert_eq!(by_hotkey('2').map(|entry| entry.id), Some("tasks"));
        assert_eq!(find(&WidgetId::from("music")).map(|entry| entry.hotkey), Some('3'));
        assert!(by_hotkey('9').is_none());
    }

    #[test]
    fn bodies_fit_their_windows() {
        for entry in CATALOG {
            // two columns of border, one header row and one bottom border row
            let lines: Vec<&str> = entry.body.lines().collect();
            assert!(lines.len() as i32 <= entry.size.height - 2, "{}", entry.id);
            assert!(
                lines.iter().all(|line| line.chars().count() as i32 <= entry.size.width - 2),
                "{}",
                entry.id
            );
        }
    }
}

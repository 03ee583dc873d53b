use std::collections::BTreeMap;

use crate::layout::Position;
use crate::window::WidgetId;

/// Handle returned by `on_position_change`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type PositionCallback = Box<dyn FnMut(Position)>;

/// Per-widget callbacks fired after a position is committed.
///
/// Subscriptions outlive the widget they watch: a listener registered for a
/// closed widget fires again once the widget reopens.
#[derive(Default)]
pub struct PositionListeners {
    by_widget: BTreeMap<WidgetId, Vec<(ListenerId, PositionCallback)>>,
    next_id: u64,
}

impl PositionListeners {
    pub fn subscribe<F>(&mut self, id: WidgetId, callback: F) -> ListenerId
    where
        F: FnMut(Position) + 'static,
    {
        let listener = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.by_widget
            .entry(id)
            .or_default()
            .push((listener, Box::new(callback)));
        listener
    }

    pub fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        let mut found = false;
        self.by_widget.retain(|_, callbacks| {
            let before = callbacks.len();
            callbacks.retain(|(id, _)| *id != listener);
            found |= callbacks.len() != before;
            !callbacks.is_empty()
        });
        found
    }

    pub fn notify(&mut self, id: &WidgetId, position: Position) {
        if let Some(callbacks) = self.by_widget.get_mut(id) {
            for (_, callback) in callbacks.iter_mut() {
                callback(position);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_widget.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_widget.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn notify_only_reaches_matching_widget() {
        let mut listeners = PositionListeners::default();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        listeners.subscribe(WidgetId::from("music"), move |_| counter.set(counter.get() + 1));
        listeners.notify(&WidgetId::from("tasks"), Position::new(1, 1));
        listeners.notify(&WidgetId::from("music"), Position::new(1, 1));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_unknown_handle_is_false() {
        let mut listeners = PositionListeners::default();
        let handle = listeners.subscribe(WidgetId::from("music"), |_| {});
        assert_eq!(listeners.len(), 1);
        assert!(listeners.unsubscribe(handle));
        assert!(!listeners.unsubscribe(handle));
        assert!(listeners.is_empty());
    }
}

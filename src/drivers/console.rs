use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;
use super::pointer::to_pointer_event;

/// Crossterm input filtered down to what the workspace reacts to.
///
/// Key releases and repeats, hover motion, wheel and non-left buttons never
/// reach the event loop. Consecutive drag reports are coalesced: a drag
/// commits from the last pointer position only, so intermediate reports that
/// were never drawn can be skipped.
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
    pending: VecDeque<Event>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyboardNormalizer::new(),
            pending: VecDeque::new(),
        }
    }

    /// Queue an event as if the terminal had reported it.
    pub fn push(&mut self, evt: Event) {
        if let Some(evt) = self.admit(evt) {
            self.enqueue(evt);
        }
    }

    fn admit(&mut self, evt: Event) -> Option<Event> {
        let evt = self.normalizer.normalize(evt)?;
        match &evt {
            Event::Mouse(mouse) => to_pointer_event(mouse).map(|_| evt),
            Event::Key(_) | Event::Resize(..) => Some(evt),
            _ => None,
        }
    }

    fn enqueue(&mut self, evt: Event) {
        if is_drag(&evt) && self.pending.back().is_some_and(is_drag) {
            self.pending.pop_back();
        }
        self.pending.push_back(evt);
    }
}

fn is_drag(evt: &Event) -> bool {
    matches!(
        evt,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            ..
        })
    )
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        let deadline = Instant::now() + timeout;
        while self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !crossterm::event::poll(remaining)? {
                return Ok(false);
            }
            let raw = crossterm::event::read()?;
            self.push(raw);
        }
        // drain whatever else is already buffered so drags coalesce
        while crossterm::event::poll(Duration::ZERO)? {
            let raw = crossterm::event::read()?;
            self.push(raw);
        }
        Ok(true)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = self.pending.pop_front() {
                return Ok(evt);
            }
            let raw = crossterm::event::read()?;
            self.push(raw);
        }
    }
}

/// Raw mode, alternate screen and mouse capture for the lifetime of the
/// value. Dropping it restores the terminal even on an error path.
pub struct ConsoleSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleSession {
    pub fn enter() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut session = Self {
            terminal: Terminal::new(backend)?,
            entered: false,
        };
        execute!(
            session.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        session.terminal.hide_cursor()?;
        session.entered = true;
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn pushed_events_are_read_in_order() {
        let mut d = ConsoleInputDriver::new();
        d.push(Event::Key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)));
        d.push(mouse(MouseEventKind::Down(MouseButton::Left), 2, 3));
        assert!(d.poll(Duration::ZERO).unwrap());
        assert!(matches!(d.read().unwrap(), Event::Key(k) if k.code == KeyCode::Char('1')));
        assert!(matches!(d.read().unwrap(), Event::Mouse(m) if m.column == 2 && m.row == 3));
    }

    #[test]
    fn noise_is_filtered() {
        let mut d = ConsoleInputDriver::new();
        let mut release = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        d.push(Event::Key(release));
        d.push(mouse(MouseEventKind::Moved, 1, 1));
        d.push(mouse(MouseEventKind::ScrollUp, 1, 1));
        d.push(Event::FocusGained);
        assert!(d.pending.is_empty());
        d.push(Event::Resize(80, 24));
        assert_eq!(d.pending.len(), 1);
    }

    #[test]
    fn consecutive_drags_keep_only_the_latest() {
        let mut d = ConsoleInputDriver::new();
        d.push(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        for x in 1..=5 {
            d.push(mouse(MouseEventKind::Drag(MouseButton::Left), x, 0));
        }
        d.push(mouse(MouseEventKind::Up(MouseButton::Left), 5, 0));
        let kinds: Vec<_> = d
            .pending
            .iter()
            .map(|evt| match evt {
                Event::Mouse(m) => (m.kind, m.column),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (MouseEventKind::Down(MouseButton::Left), 0),
                (MouseEventKind::Drag(MouseButton::Left), 5),
                (MouseEventKind::Up(MouseButton::Left), 5),
            ]
        );
    }
}

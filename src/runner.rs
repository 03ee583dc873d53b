//! Terminal host: draws the workspace with ratatui and feeds it crossterm
//! input.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::LayoutConfig;
use crate::dock::{Dock, DockMetrics};
use crate::drivers::InputDriver;
use crate::drivers::pointer::to_pointer_event;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::layout::{Rect, Size};
use crate::store::LayoutStorage;
use crate::widgets;
use crate::window::decorator::clip;
use crate::window::{BoxDecorator, WindowDecorator, WindowFrame};
use crate::workspace::Workspace;

const EMPTY_MESSAGE: &str = "press 1-7 or click the dock to open a widget, q to quit";

pub struct WorkspaceApp {
    workspace: Workspace,
    decorator: BoxDecorator,
}

impl WorkspaceApp {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            decorator: BoxDecorator,
        }
    }

    /// The terminal workspace: every catalog widget in the dock, cell-sized,
    /// with the previous session's widgets reopened.
    pub fn terminal(
        config: LayoutConfig,
        viewport: Size,
        storage: impl LayoutStorage + 'static,
    ) -> Self {
        let dock = Dock::new(widgets::dock_items(), DockMetrics::terminal());
        let mut workspace = Workspace::with_storage(config, viewport, storage, dock);
        for entry in &widgets::CATALOG {
            workspace.set_preferred_size(entry.widget_id(), entry.size);
        }
        workspace.restore_session();
        Self::new(workspace)
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return ControlFlow::Quit;
                }
                KeyCode::Char('q') => return ControlFlow::Quit,
                KeyCode::Char('d') => {
                    let collapsed = !self.workspace.dock_state().collapsed;
                    self.workspace.set_dock_collapsed(collapsed);
                }
                KeyCode::Char(c) => {
                    if let Some(entry) = widgets::by_hotkey(c) {
                        self.workspace.toggle_widget(&entry.widget_id());
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let Some(pointer) = to_pointer_event(mouse) {
                    self.workspace.handle_pointer(pointer);
                }
            }
            Event::Resize(width, height) => {
                let viewport = Size::new(i32::from(*width), i32::from(*height));
                self.workspace.handle_resize(viewport, now);
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    pub fn tick(&mut self, now: Instant) {
        self.workspace.tick(now);
    }

    pub fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let views = self.workspace.windows();
        if views.is_empty() {
            frame
                .buffer_mut()
                .set_stringn(area.x, area.y, EMPTY_MESSAGE, area.width as usize, Style::default());
        }
        for view in views {
            let entry = widgets::find(&view.id);
            let title = entry.map(|entry| entry.title).unwrap_or(view.id.as_str());
            let window = WindowFrame {
                chrome: view.chrome,
                title,
                focused: view.focused,
                collapsed: view.collapsed,
            };
            self.decorator.render_window(frame.buffer_mut(), &window);
            if let (Some(entry), Some(body)) =
                (entry, self.decorator.body_area(frame.buffer_mut(), &window))
            {
                frame.render_widget(Paragraph::new(entry.body), body);
            }
            self.workspace.record_region(view.id, view.chrome.frame);
        }
        render_dock(frame.buffer_mut(), &self.workspace);
    }
}

fn render_dock(buffer: &mut Buffer, workspace: &Workspace) {
    let dock = workspace.dock();
    let state = workspace.dock_state();
    let bar = Style::default().bg(Color::DarkGray).fg(Color::White);
    let open = bar.fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let rect = dock.rect(state);
    fill_clipped(buffer, rect, bar);
    let m = dock.metrics();
    put_clipped(buffer, Rect::new(rect.x, rect.y, m.handle_width, m.height), " ≡ ", bar);
    for (index, item) in dock.items().iter().enumerate() {
        let Some(slot) = dock.item_rect(state, index) else {
            continue;
        };
        let style = if workspace.is_open(&item.widget) { open } else { bar };
        let label = format!("{:^width$}", item.label, width = slot.width.max(0) as usize);
        put_clipped(buffer, slot, &label, style);
    }
    let toggle = if state.collapsed { " > " } else { " < " };
    let toggle_rect = Rect::new(rect.right() - m.toggle_width, rect.y, m.toggle_width, m.height);
    put_clipped(buffer, toggle_rect, toggle, bar);
}

fn fill_clipped(buffer: &mut Buffer, rect: Rect, style: Style) {
    if let Some(area) = clip(rect, buffer.area) {
        buffer.set_style(area, style);
    }
}

fn put_clipped(buffer: &mut Buffer, rect: Rect, text: &str, style: Style) {
    if rect.x < 0 || rect.y < 0 {
        return;
    }
    if let Some(area) = clip(rect, buffer.area) {
        buffer.set_stringn(area.x, area.y, text, area.width as usize, style);
    }
}

/// Drive `app` until it quits: tick and redraw every `poll_interval`,
/// dispatching input in between.
pub fn run<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    app: &mut WorkspaceApp,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|event| match event {
        Some(event) => Ok(app.handle_event(&event, Instant::now())),
        None => {
            app.tick(Instant::now());
            terminal
                .draw(|frame| app.draw(frame))
                .map_err(|err| io::Error::other(err.to_string()))?;
            Ok(ControlFlow::Continue)
        }
    })
}

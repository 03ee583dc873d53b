use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier, Style};

use crate::layout::Rect;

use super::chrome::ChromeLayout;

/// Everything a decorator needs to draw one window frame.
#[derive(Debug, Clone, Copy)]
pub struct WindowFrame<'a> {
    pub chrome: ChromeLayout,
    pub title: &'a str,
    pub focused: bool,
    pub collapsed: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw chrome and clear the content area. Windows are drawn
    /// back-to-front, so later frames simply paint over earlier ones.
    fn render_window(&self, buffer: &mut Buffer, window: &WindowFrame<'_>);

    /// Cells left for the widget body, if any are visible.
    fn body_area(&self, buffer: &Buffer, window: &WindowFrame<'_>) -> Option<ratatui::layout::Rect>;
}

/// Single-line box frame with a filled title bar.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxDecorator;

impl WindowDecorator for BoxDecorator {
    fn render_window(&self, buffer: &mut Buffer, window: &WindowFrame<'_>) {
        let chrome = window.chrome;
        let header_style = if window.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);

        fill(buffer, chrome.header, " ", header_style);
        let title_room = (chrome.minimize.x - chrome.header.x - 1).max(0) as usize;
        let title: String = window.title.chars().take(title_room).collect();
        put_str(buffer, chrome.header.x + 1, chrome.header.y, &title, header_style);
        let minimize = if window.collapsed { "[+]" } else { "[_]" };
        put_str(buffer, chrome.minimize.x, chrome.minimize.y, minimize, header_style);
        put_str(buffer, chrome.close.x, chrome.close.y, "[x]", header_style);

        if window.collapsed || chrome.content.height <= 0 {
            return;
        }
        let content = chrome.content;
        fill(buffer, content, " ", Style::reset());
        let left = content.x;
        let right = content.right() - 1;
        let bottom = content.bottom() - 1;
        for y in content.y..bottom {
            put_cell(buffer, left, y, "│", border_style);
            put_cell(buffer, right, y, "│", border_style);
        }
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            put_cell(buffer, x, bottom, symbol, border_style);
        }
    }

    fn body_area(&self, buffer: &Buffer, window: &WindowFrame<'_>) -> Option<ratatui::layout::Rect> {
        if window.collapsed {
            return None;
        }
        let content = window.chrome.content;
        let inner = Rect::new(
            content.x + 1,
            content.y,
            content.width - 2,
            content.height - 1,
        );
        clip(inner, buffer.area)
    }
}

/// Intersect a layout rectangle with the drawable area.
pub fn clip(rect: Rect, bounds: ratatui::layout::Rect) -> Option<ratatui::layout::Rect> {
    let left = rect.x.max(i32::from(bounds.x));
    let top = rect.y.max(i32::from(bounds.y));
    let right = rect.right().min(i32::from(bounds.right()));
    let bottom = rect.bottom().min(i32::from(bounds.bottom()));
    if right <= left || bottom <= top {
        return None;
    }
    Some(ratatui::layout::Rect::new(
        u16::try_from(left).ok()?,
        u16::try_from(top).ok()?,
        u16::try_from(right - left).ok()?,
        u16::try_from(bottom - top).ok()?,
    ))
}

fn put_cell(buffer: &mut Buffer, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(buffer: &mut Buffer, x: i32, y: i32, text: &str, style: Style) {
    let mut buf = [0u8; 4];
    for (offset, ch) in text.chars().enumerate() {
        put_cell(buffer, x + offset as i32, y, ch.encode_utf8(&mut buf), style);
    }
}

fn fill(buffer: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            put_cell(buffer, x, y, symbol, style);
        }
    }
}

//! Toast notifications.
//!
//! Toasts stack in the bottom-right corner above the footer and expire on
//! their own. Errors linger longer and can be dismissed early.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const TOAST_WIDTH: u16 = 44;
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}",
            ToastVariant::Info => "\u{2139}",
            ToastVariant::Warning => "\u{26A0}",
            ToastVariant::Error => "\u{2718}",
        }
    }

    pub fn color(&self) -> Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.info,
            ToastVariant::Warning => t.warning,
            ToastVariant::Error => t.error,
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            ToastVariant::Error => Duration::from_secs(6),
            _ => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: variant.default_duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Rows needed for the message at `width`, borders included.
    fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(4).max(1) as usize;
        let chars = self.message.chars().count() + 2;
        let lines = chars.div_ceil(inner).clamp(1, 4) as u16;
        lines + 2
    }
}

/// One toast, drawn inside `area`.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(Style::default().bg(t.background));

        Paragraph::new(format!(
            "{} {}",
            self.toast.variant.icon(),
            self.toast.message
        ))
        .block(block)
        .style(t.text_style().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest toasts go on top; the oldest falls off past the visible limit.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_front(toast);
        self.toasts.truncate(MAX_VISIBLE);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Toast::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Drop expired toasts. Returns whether any remain.
    pub fn tick(&mut self) -> bool {
        self.toasts.retain(|t| !t.is_expired());
        !self.toasts.is_empty()
    }

    /// Dismiss the newest toast. Returns false if there was none.
    pub fn dismiss(&mut self) -> bool {
        self.toasts.pop_front().is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.toasts.front()
    }

    pub fn has_toast(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Stack the toasts upward from just above the footer.
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(4));
        let x = area.x + area.width.saturating_sub(width + 2);
        let mut bottom = area.y + area.height.saturating_sub(3);

        for toast in &self.toasts {
            let height = toast.height(width);
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            frame.render_widget(ToastWidget::new(toast), Rect::new(x, bottom, width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_linger_longer() {
        assert!(Toast::error("x").duration > Toast::success("x").duration);
    }

    #[test]
    fn test_push_keeps_newest_first_and_caps() {
        let mut manager = ToastManager::new();
        for i in 0..5 {
            manager.info(format!("toast {}", i));
        }
        assert_eq!(manager.len(), MAX_VISIBLE);
        assert_eq!(manager.current().unwrap().message, "toast 4");
    }

    #[test]
    fn test_tick_drops_expired_and_dismiss_pops() {
        let mut manager = ToastManager::new();
        manager.push(Toast::info("gone").with_duration(Duration::ZERO));
        manager.error("Falha ao carregar barbeiros");
        assert!(manager.tick());
        assert_eq!(manager.len(), 1);
        assert!(manager.dismiss());
        assert!(!manager.dismiss());
    }

    #[test]
    fn test_long_messages_grow_taller() {
        let short = Toast::info("ok");
        let long = Toast::info("a".repeat(120));
        assert_eq!(short.height(40), 3);
        assert!(long.height(40) > 3);
    }
}

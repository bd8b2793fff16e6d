//! Cursor movement shared by lists and tables.

use crate::keymap::Action;
use ratatui::widgets::{ListState, TableState};

/// Rows moved by PageUp/PageDown.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Anything with an optional selected row.
pub trait Selectable {
    fn current(&self) -> Option<usize>;
    fn set_current(&mut self, index: Option<usize>);
}

impl Selectable for ListState {
    fn current(&self) -> Option<usize> {
        self.selected()
    }

    fn set_current(&mut self, index: Option<usize>) {
        self.select(index);
    }
}

impl Selectable for TableState {
    fn current(&self) -> Option<usize> {
        self.selected()
    }

    fn set_current(&mut self, index: Option<usize>) {
        self.select(index);
    }
}

/// Navigation helpers for any [`Selectable`] state.
pub trait ListStateExt: Selectable {
    fn move_up_by(&mut self, count: usize, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.current().unwrap_or(0);
        self.set_current(Some(current.saturating_sub(count)));
    }

    fn move_down_by(&mut self, count: usize, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.current().unwrap_or(0);
        self.set_current(Some((current + count).min(total_items - 1)));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.set_current(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.set_current(Some(total_items - 1));
        }
    }

    fn select_previous_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let next = match self.current() {
            Some(0) | None => total_items - 1,
            Some(i) => i - 1,
        };
        self.set_current(Some(next));
    }

    fn select_next_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let next = match self.current() {
            Some(i) if i + 1 < total_items => i + 1,
            _ => 0,
        };
        self.set_current(Some(next));
    }

    /// Keep the selection inside `0..total_items` after the list changed.
    fn clamp_to(&mut self, total_items: usize) {
        match self.current() {
            _ if total_items == 0 => self.set_current(None),
            None => self.set_current(Some(0)),
            Some(i) if i >= total_items => self.set_current(Some(total_items - 1)),
            Some(_) => {}
        }
    }

    /// Apply a navigation action. Returns false for non-navigation actions.
    fn navigate(&mut self, action: Action, total_items: usize) -> bool {
        match action {
            Action::MoveUp => self.move_up_by(1, total_items),
            Action::MoveDown => self.move_down_by(1, total_items),
            Action::PageUp => self.move_up_by(DEFAULT_PAGE_SIZE, total_items),
            Action::PageDown => self.move_down_by(DEFAULT_PAGE_SIZE, total_items),
            Action::GoToTop => self.select_first_item(total_items),
            Action::GoToEnd => self.select_last_item(total_items),
            _ => return false,
        }
        true
    }
}

impl<T: Selectable> ListStateExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_saturates_at_both_ends() {
        let mut state = ListState::default();
        state.select(Some(5));
        state.move_up_by(3, 10);
        assert_eq!(state.selected(), Some(2));
        state.move_up_by(10, 10);
        assert_eq!(state.selected(), Some(0));
        state.move_down_by(50, 10);
        assert_eq!(state.selected(), Some(9));
    }

    #[test]
    fn test_wrap_navigation() {
        let mut state = ListState::default();
        state.select(Some(0));
        state.select_previous_wrap(5);
        assert_eq!(state.selected(), Some(4));
        state.select_next_wrap(5);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_empty_list_keeps_no_selection() {
        let mut state = ListState::default();
        state.move_down_by(1, 0);
        state.select_first_item(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_clamp_after_refresh() {
        let mut state = TableState::default();
        state.select(Some(7));
        state.clamp_to(3);
        assert_eq!(state.selected(), Some(2));
        state.clamp_to(0);
        assert_eq!(state.selected(), None);
        state.clamp_to(4);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_navigate_maps_actions() {
        let mut state = TableState::default();
        assert!(state.navigate(Action::GoToEnd, 12));
        assert_eq!(state.selected(), Some(11));
        assert!(state.navigate(Action::PageUp, 12));
        assert_eq!(state.selected(), Some(1));
        assert!(!state.navigate(Action::Confirm, 12));
    }
}

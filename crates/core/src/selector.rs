//! Neighborhood multi-select state machine.
//!
//! Holds the selected labels (fixed options plus, optionally, the
//! [`OTHER_SENTINEL`]) and the free-text "other" value, and derives the
//! autocomplete list from the gazetteer as the free text changes.
//!
//! The sentinel is driven only by [`NeighborhoodSelector::toggle_other`].
//! Picking a suggestion fills the free-text value and nothing else.

use crate::gazetteer;
use crate::neighborhoods::{FIXED_NEIGHBORHOODS, OTHER_SENTINEL};

/// Keys the suggestion list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Which part of the control has input focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorFocus {
    #[default]
    Pills,
    OtherInput,
}

#[derive(Debug, Clone, Default)]
pub struct NeighborhoodSelector {
    selected: Vec<String>,
    other_text: String,
    suggestions: Vec<&'static str>,
    highlighted: Option<usize>,
    list_open: bool,
    focus: SelectorFocus,
}

impl NeighborhoodSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a fixed pill option. Returns `false` when `name` is not one
    /// of [`FIXED_NEIGHBORHOODS`] (the sentinel is routed to
    /// [`toggle_other`](Self::toggle_other)).
    pub fn toggle(&mut self, name: &str) -> bool {
        if name == OTHER_SENTINEL {
            self.toggle_other();
            return true;
        }
        let Some(option) = FIXED_NEIGHBORHOODS.iter().find(|o| **o == name) else {
            return false;
        };

        if let Some(pos) = self.selected.iter().position(|s| s == option) {
            self.selected.remove(pos);
        } else {
            self.selected.push((*option).to_string());
        }
        true
    }

    /// Switch "other" on or off.
    ///
    /// On: appends the sentinel and focuses the free-text input.
    /// Off: removes the sentinel, clears the free text and closes the list.
    pub fn toggle_other(&mut self) {
        if let Some(pos) = self.selected.iter().position(|s| s == OTHER_SENTINEL) {
            self.selected.remove(pos);
            self.other_text.clear();
            self.close_list();
            self.focus = SelectorFocus::Pills;
        } else {
            self.selected.push(OTHER_SENTINEL.to_string());
            self.focus = SelectorFocus::OtherInput;
        }
    }

    /// Replace the free-text value and recompute suggestions.
    ///
    /// Ignored while "other" is off, because the input is not shown then.
    pub fn set_other_text(&mut self, text: &str) {
        if !self.is_other_active() {
            return;
        }
        self.other_text = text.to_string();
        self.suggestions = gazetteer::suggest(&self.other_text, &self.selected);
        self.highlighted = None;
        self.list_open = !self.suggestions.is_empty();
    }

    /// Apply a key press to the suggestion list. Returns whether the key was
    /// consumed.
    pub fn handle_key(&mut self, key: SelectorKey) -> bool {
        if !self.list_open || self.suggestions.is_empty() {
            return false;
        }
        let last = self.suggestions.len() - 1;

        match key {
            SelectorKey::ArrowDown => {
                self.highlighted = Some(match self.highlighted {
                    Some(i) => (i + 1).min(last),
                    None => 0,
                });
                true
            }
            SelectorKey::ArrowUp => {
                self.highlighted = self.highlighted.map(|i| i.saturating_sub(1));
                true
            }
            SelectorKey::Enter => match self.highlighted {
                Some(i) => self.choose_suggestion(i),
                None => false,
            },
            SelectorKey::Escape => {
                self.close_list();
                true
            }
        }
    }

    /// Commit the suggestion at `index` as the free-text value and close
    /// the list. Returns `false` for an out-of-range index.
    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        let Some(name) = self.suggestions.get(index).copied() else {
            return false;
        };
        self.other_text = name.to_string();
        self.close_list();
        true
    }

    /// A pointer press landed outside the control.
    pub fn click_outside(&mut self) {
        self.close_list();
    }

    fn close_list(&mut self) {
        self.list_open = false;
        self.highlighted = None;
        self.suggestions.clear();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn is_other_active(&self) -> bool {
        self.is_selected(OTHER_SENTINEL)
    }

    /// Selected values in selection order, sentinel included.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    pub fn suggestions(&self) -> &[&'static str] {
        if self.list_open {
            &self.suggestions
        } else {
            &[]
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    pub fn focus(&self) -> SelectorFocus {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_other(text: &str) -> NeighborhoodSelector {
        let mut sel = NeighborhoodSelector::new();
        sel.toggle_other();
        sel.set_other_text(text);
        sel
    }

    #[test]
    fn toggling_fixed_option_adds_then_removes() {
        let mut sel = NeighborhoodSelector::new();
        assert!(sel.toggle("SoHo"));
        assert!(sel.toggle("Chelsea"));
        assert_eq!(sel.selected(), &["SoHo".to_string(), "Chelsea".to_string()]);
        assert!(sel.toggle("SoHo"));
        assert_eq!(sel.selected(), &["Chelsea".to_string()]);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut sel = NeighborhoodSelector::new();
        assert!(!sel.toggle("Astoria"));
        assert!(sel.selected().is_empty());
    }

    #[test]
    fn toggle_other_on_focuses_input() {
        let mut sel = NeighborhoodSelector::new();
        sel.toggle_other();
        assert!(sel.is_other_active());
        assert_eq!(sel.focus(), SelectorFocus::OtherInput);
    }

    #[test]
    fn toggle_other_off_clears_text() {
        let mut sel = with_other("Astoria");
        sel.toggle_other();
        assert!(!sel.is_other_active());
        assert_eq!(sel.other_text(), "");
        assert!(!sel.is_list_open());
    }

    #[test]
    fn typing_without_other_is_ignored() {
        let mut sel = NeighborhoodSelector::new();
        sel.set_other_text("Astoria");
        assert_eq!(sel.other_text(), "");
        assert!(sel.suggestions().is_empty());
    }

    #[test]
    fn typing_opens_suggestions() {
        let sel = with_other("astor");
        assert!(sel.is_list_open());
        assert_eq!(sel.suggestions(), &["Astoria"]);
        assert_eq!(sel.highlighted(), None);
    }

    #[test]
    fn arrows_clamp_without_wraparound() {
        let mut sel = with_other("park");
        let count = sel.suggestions().len();
        assert!(count > 1);

        sel.handle_key(SelectorKey::ArrowUp);
        assert_eq!(sel.highlighted(), None);

        for _ in 0..count + 3 {
            sel.handle_key(SelectorKey::ArrowDown);
        }
        assert_eq!(sel.highlighted(), Some(count - 1));

        for _ in 0..count + 3 {
            sel.handle_key(SelectorKey::ArrowUp);
        }
        assert_eq!(sel.highlighted(), Some(0));
    }

    #[test]
    fn enter_commits_highlighted_suggestion() {
        let mut sel = with_other("astor");
        sel.handle_key(SelectorKey::ArrowDown);
        assert!(sel.handle_key(SelectorKey::Enter));
        assert_eq!(sel.other_text(), "Astoria");
        assert!(!sel.is_list_open());
    }

    #[test]
    fn enter_without_highlight_does_nothing() {
        let mut sel = with_other("astor");
        assert!(!sel.handle_key(SelectorKey::Enter));
        assert_eq!(sel.other_text(), "astor");
        assert!(sel.is_list_open());
    }

    #[test]
    fn escape_closes_without_committing() {
        let mut sel = with_other("astor");
        sel.handle_key(SelectorKey::ArrowDown);
        sel.handle_key(SelectorKey::Escape);
        assert_eq!(sel.other_text(), "astor");
        assert!(!sel.is_list_open());
    }

    #[test]
    fn click_outside_closes() {
        let mut sel = with_other("astor");
        sel.click_outside();
        assert!(!sel.is_list_open());
        assert!(sel.suggestions().is_empty());
    }

    #[test]
    fn choosing_suggestion_does_not_touch_sentinel_count() {
        let mut sel = with_other("astor");
        assert!(sel.choose_suggestion(0));
        let sentinels = sel
            .selected()
            .iter()
            .filter(|s| s.as_str() == OTHER_SENTINEL)
            .count();
        assert_eq!(sentinels, 1);
        assert!(!sel.choose_suggestion(7));
    }

    #[test]
    fn selected_fixed_options_never_suggested() {
        let mut sel = NeighborhoodSelector::new();
        sel.toggle("Midtown");
        sel.toggle_other();
        sel.set_other_text("midtown");
        assert!(!sel.suggestions().contains(&"Midtown"));
        assert!(sel.suggestions().contains(&"Midtown East"));
    }
}

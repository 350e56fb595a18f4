//! Navigation menu model
//!
//! The menu is rendered in-scene by the presentation layer; this model owns
//! only selection state and the mapping from an activation to the semantic
//! action the embedder applies.

use crate::history::MatchHistory;
use crate::settings::Settings;

/// Root menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartRound,
    CycleDuration,
    ToggleVisualMode,
    ToggleHistorySort,
    ViewHistory,
    Quit,
}

const ROOT_ITEMS: [MenuItem; 6] = [
    MenuItem::StartRound,
    MenuItem::CycleDuration,
    MenuItem::ToggleVisualMode,
    MenuItem::ToggleHistorySort,
    MenuItem::ViewHistory,
    MenuItem::Quit,
];

/// Action produced by activating a menu entry; applied by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartRound,
    CycleDuration,
    ToggleVisualMode,
    ToggleHistorySort,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPage {
    #[default]
    Root,
    History,
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    open: bool,
    page: MenuPage,
    selected: usize,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn page(&self) -> MenuPage {
        self.page
    }

    pub fn selected_item(&self) -> MenuItem {
        ROOT_ITEMS[self.selected]
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        reset_navigation(self);
    }

    pub fn close(&mut self) {
        self.open = false;
        reset_navigation(self);
    }

    /// Move the selection, wrapping at both ends. No-op on the history page.
    pub fn move_selection(&mut self, delta: i32) {
        if !self.open || self.page != MenuPage::Root {
            return;
        }
        let len = ROOT_ITEMS.len() as i32;
        self.selected = ((self.selected as i32 + delta).rem_euclid(len)) as usize;
    }

    /// Activate the current entry. `ViewHistory` flips to the history page
    /// and produces no action; activating on the history page goes back.
    pub fn activate(&mut self) -> Option<MenuAction> {
        if !self.open {
            return None;
        }
        if self.page == MenuPage::History {
            self.page = MenuPage::Root;
            return None;
        }
        match self.selected_item() {
            MenuItem::StartRound => Some(MenuAction::StartRound),
            MenuItem::CycleDuration => Some(MenuAction::CycleDuration),
            MenuItem::ToggleVisualMode => Some(MenuAction::ToggleVisualMode),
            MenuItem::ToggleHistorySort => Some(MenuAction::ToggleHistorySort),
            MenuItem::ViewHistory => {
                self.page = MenuPage::History;
                None
            }
            MenuItem::Quit => Some(MenuAction::Quit),
        }
    }

    /// Text lines for the current page, ready to draw.
    pub fn lines(&self, settings: &Settings, history: &MatchHistory) -> Vec<String> {
        match self.page {
            MenuPage::Root => ROOT_ITEMS
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let marker = if i == self.selected { "> " } else { "  " };
                    let label = match item {
                        MenuItem::StartRound => "Start round".to_string(),
                        MenuItem::CycleDuration => {
                            format!("Round length: {}s", settings.round_duration_s)
                        }
                        MenuItem::ToggleVisualMode => format!(
                            "Visuals: {}",
                            if settings.textured { "textured" } else { "flat" }
                        ),
                        MenuItem::ToggleHistorySort => format!(
                            "History order: {}",
                            if settings.history_newest_first {
                                "newest first"
                            } else {
                                "oldest first"
                            }
                        ),
                        MenuItem::ViewHistory => "Match history".to_string(),
                        MenuItem::Quit => "Quit".to_string(),
                    };
                    format!("{marker}{label}")
                })
                .collect(),
            MenuPage::History => {
                if history.is_empty() {
                    vec!["No matches yet".to_string()]
                } else {
                    history
                        .sorted(settings.history_newest_first)
                        .iter()
                        .map(|r| r.to_line())
                        .collect()
                }
            }
        }
    }
}

fn reset_navigation(menu: &mut Menu) {
    menu.page = MenuPage::Root;
    menu.selected = 0;
}

//! Navigation model shared by every front end.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Page {
    Chat,
    Persona,
    Spellbook,
    History,
}

impl Page {
    pub fn href(&self) -> &'static str {
        match self {
            Page::Chat => "/",
            Page::Persona => "/persona",
            Page::Spellbook => "/spellbook",
            Page::History => "/history",
        }
    }

    pub fn from_href(href: &str) -> Option<Self> {
        Page::iter().find(|page| page.href() == href)
    }

    /// Chat is the only page with real content so far.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Page::Chat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub href: String,
}

impl From<Page> for NavigationItem {
    fn from(page: Page) -> Self {
        Self {
            name: page.to_string(),
            href: page.href().to_string(),
        }
    }
}

/// Navigation items in display order.
pub fn navigation() -> Vec<NavigationItem> {
    Page::iter().map(NavigationItem::from).collect()
}

/// Tracks which navigation item is active.
#[derive(Debug, Clone)]
pub struct NavigationState {
    items: Vec<NavigationItem>,
    active_tab: String,
}

impl NavigationState {
    /// Starts with the first item active (empty when there are no items).
    pub fn new(items: Vec<NavigationItem>) -> Self {
        let active_tab = items.first().map(|item| item.name.clone()).unwrap_or_default();
        Self { items, active_tab }
    }

    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Sets the active tab by name. Unknown names are ignored.
    pub fn set_active_tab(&mut self, name: &str) {
        if self.items.iter().any(|item| item.name == name) {
            self.active_tab = name.to_string();
        }
    }

    /// Sets the active tab to the item with the given href, if any.
    pub fn set_active_by_href(&mut self, href: &str) {
        if let Some(item) = self.items.iter().find(|item| item.href == href) {
            self.active_tab = item.name.clone();
        }
    }

    pub fn active_item(&self) -> Option<&NavigationItem> {
        self.items.iter().find(|item| item.name == self.active_tab)
    }

    pub fn is_active(&self, item: &NavigationItem) -> bool {
        item.name == self.active_tab
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(navigation())
    }
}

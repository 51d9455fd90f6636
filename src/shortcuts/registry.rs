//! Compiled-in table of actions and their default bindings.
//!
//! `DEFINITIONS` is ordered exactly like [`ActionId::ALL`] so lookups are an index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{KeyBinding, Modifiers};

/// A command that can be bound to a shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionId {
    SwitchTab1,
    SwitchTab2,
    SwitchTab3,
    SwitchTab4,
    SwitchTab5,
    SwitchTab6,
    SwitchTab7,
    SwitchTab8,
    SwitchTab9,
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    ToggleSettings,
    ToggleSidebar,
    CommandPalette,
    ToggleKanban,
    TogglePipelines,
    FocusSearch,
    ReloadWorkspace,
}

impl ActionId {
    pub const COUNT: usize = 20;

    pub const ALL: [ActionId; Self::COUNT] = [
        ActionId::SwitchTab1,
        ActionId::SwitchTab2,
        ActionId::SwitchTab3,
        ActionId::SwitchTab4,
        ActionId::SwitchTab5,
        ActionId::SwitchTab6,
        ActionId::SwitchTab7,
        ActionId::SwitchTab8,
        ActionId::SwitchTab9,
        ActionId::NewTab,
        ActionId::CloseTab,
        ActionId::NextTab,
        ActionId::PreviousTab,
        ActionId::ToggleSettings,
        ActionId::ToggleSidebar,
        ActionId::CommandPalette,
        ActionId::ToggleKanban,
        ActionId::TogglePipelines,
        ActionId::FocusSearch,
        ActionId::ReloadWorkspace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwitchTab1 => "switchTab1",
            Self::SwitchTab2 => "switchTab2",
            Self::SwitchTab3 => "switchTab3",
            Self::SwitchTab4 => "switchTab4",
            Self::SwitchTab5 => "switchTab5",
            Self::SwitchTab6 => "switchTab6",
            Self::SwitchTab7 => "switchTab7",
            Self::SwitchTab8 => "switchTab8",
            Self::SwitchTab9 => "switchTab9",
            Self::NewTab => "newTab",
            Self::CloseTab => "closeTab",
            Self::NextTab => "nextTab",
            Self::PreviousTab => "previousTab",
            Self::ToggleSettings => "toggleSettings",
            Self::ToggleSidebar => "toggleSidebar",
            Self::CommandPalette => "commandPalette",
            Self::ToggleKanban => "toggleKanban",
            Self::TogglePipelines => "togglePipelines",
            Self::FocusSearch => "focusSearch",
            Self::ReloadWorkspace => "reloadWorkspace",
        }
    }

    /// Position in [`ActionId::ALL`] and [`DEFINITIONS`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The tab-switch action for a 1-based tab number.
    pub fn switch_tab(n: usize) -> Option<Self> {
        match n {
            1..=9 => Some(Self::ALL[n - 1]),
            _ => None,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action id string that is not part of the current action set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action id '{0}'")]
pub struct UnknownActionId(pub String);

impl FromStr for ActionId {
    type Err = UnknownActionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownActionId(s.to_string()))
    }
}

/// Category for organizing shortcuts in UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutCategory {
    Tabs,
    Navigation,
    Views,
    General,
}

impl ShortcutCategory {
    /// Presentation order.
    pub const ALL: [ShortcutCategory; 4] = [
        ShortcutCategory::Tabs,
        ShortcutCategory::Navigation,
        ShortcutCategory::Views,
        ShortcutCategory::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tabs => "Tabs",
            Self::Navigation => "Navigation",
            Self::Views => "Views",
            Self::General => "General",
        }
    }
}

/// Metadata and default binding for one action.
#[derive(Clone, Debug)]
pub struct ShortcutDefinition {
    pub id: ActionId,
    pub label: &'static str,
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub default_binding: KeyBinding,
}

const fn def(
    id: ActionId,
    label: &'static str,
    description: &'static str,
    category: ShortcutCategory,
    modifiers: Modifiers,
    key: &'static str,
) -> ShortcutDefinition {
    ShortcutDefinition {
        id,
        label,
        description,
        category,
        default_binding: KeyBinding::from_static(modifiers, key),
    }
}

use ShortcutCategory::{General, Navigation, Tabs, Views};

#[rustfmt::skip]
pub static DEFINITIONS: [ShortcutDefinition; ActionId::COUNT] = [
    def(ActionId::SwitchTab1, "Switch to Tab 1", "Focus the first tab", Tabs, Modifiers::META, "1"),
    def(ActionId::SwitchTab2, "Switch to Tab 2", "Focus the second tab", Tabs, Modifiers::META, "2"),
    def(ActionId::SwitchTab3, "Switch to Tab 3", "Focus the third tab", Tabs, Modifiers::META, "3"),
    def(ActionId::SwitchTab4, "Switch to Tab 4", "Focus the fourth tab", Tabs, Modifiers::META, "4"),
    def(ActionId::SwitchTab5, "Switch to Tab 5", "Focus the fifth tab", Tabs, Modifiers::META, "5"),
    def(ActionId::SwitchTab6, "Switch to Tab 6", "Focus the sixth tab", Tabs, Modifiers::META, "6"),
    def(ActionId::SwitchTab7, "Switch to Tab 7", "Focus the seventh tab", Tabs, Modifiers::META, "7"),
    def(ActionId::SwitchTab8, "Switch to Tab 8", "Focus the eighth tab", Tabs, Modifiers::META, "8"),
    def(ActionId::SwitchTab9, "Switch to Tab 9", "Focus the ninth tab", Tabs, Modifiers::META, "9"),
    def(ActionId::NewTab, "New Tab", "Open a new terminal tab", Tabs, Modifiers::META, "t"),
    def(ActionId::CloseTab, "Close Tab", "Close the active tab", Tabs, Modifiers::META, "w"),
    def(ActionId::NextTab, "Next Tab", "Focus the tab to the right", Navigation, Modifiers::META_SHIFT, "]"),
    def(ActionId::PreviousTab, "Previous Tab", "Focus the tab to the left", Navigation, Modifiers::META_SHIFT, "["),
    def(ActionId::ToggleSettings, "Toggle Settings", "Open or close the settings page", General, Modifiers::META, ","),
    def(ActionId::ToggleSidebar, "Toggle Sidebar", "Show or hide the sidebar", Views, Modifiers::META, "b"),
    def(ActionId::CommandPalette, "Command Palette", "Open the command palette", Navigation, Modifiers::META, "k"),
    def(ActionId::ToggleKanban, "Toggle Kanban", "Show or hide the kanban board", Views, Modifiers::META_SHIFT, "k"),
    def(ActionId::TogglePipelines, "Toggle Pipelines", "Show or hide the pipeline editor", Views, Modifiers::META_SHIFT, "p"),
    def(ActionId::FocusSearch, "Focus Search", "Move focus to the search field", Navigation, Modifiers::META, "f"),
    def(ActionId::ReloadWorkspace, "Reload Workspace", "Reload the current workspace", General, Modifiers::META_SHIFT, "r"),
];

/// Look up the definition for an action.
pub fn definition(id: ActionId) -> &'static ShortcutDefinition {
    let def = &DEFINITIONS[id.index()];
    debug_assert_eq!(def.id, id, "DEFINITIONS out of order");
    def
}

/// The compiled-in default binding for an action.
pub fn default_binding(id: ActionId) -> &'static KeyBinding {
    &definition(id).default_binding
}

/// All definitions in registry order.
pub fn definitions() -> &'static [ShortcutDefinition] {
    &DEFINITIONS
}

/// Action ids grouped by category, in presentation order. Empty categories are omitted.
pub fn categories() -> Vec<(ShortcutCategory, Vec<ActionId>)> {
    ShortcutCategory::ALL
        .into_iter()
        .map(|category| {
            let ids = DEFINITIONS
                .iter()
                .filter(|d| d.category == category)
                .map(|d| d.id)
                .collect::<Vec<_>>();
            (category, ids)
        })
        .filter(|(_, ids)| !ids.is_empty())
        .collect()
}

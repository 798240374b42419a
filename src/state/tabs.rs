// Tab selection state.
// Exactly one panel and one selector are active at any time.

use crate::error::{ConsoleError, Result};

/// A tab panel in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Tab {
    #[default]
    Generate,
    Quality,
    Reports,
    Server,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Generate, Tab::Quality, Tab::Reports, Tab::Server];

    /// Stable identifier used in config and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Tab::Generate => "generate",
            Tab::Quality => "quality",
            Tab::Reports => "reports",
            Tab::Server => "server",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Generate => "Generate",
            Tab::Quality => "Quality Check",
            Tab::Reports => "Reports",
            Tab::Server => "Server",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Panel and selector activation for the tab bar.
///
/// Transitions return a new value so no intermediate state with zero or two
/// active tabs is ever observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabBar {
    active_panel: Tab,
    active_selector: Tab,
}

impl TabBar {
    pub fn new(initial: Tab) -> Self {
        Self {
            active_panel: initial,
            active_selector: initial,
        }
    }

    /// Deactivate everything, then activate `tab` and its selector.
    #[must_use]
    pub fn activate(self, tab: Tab) -> Self {
        Self {
            active_panel: tab,
            active_selector: tab,
        }
    }

    /// Activate a tab by its string id.
    ///
    /// An unknown id is a wiring bug (bad config or flag), so it is reported
    /// instead of being ignored.
    pub fn activate_id(self, id: &str) -> Result<Self> {
        Tab::from_id(id)
            .map(|tab| self.activate(tab))
            .ok_or_else(|| ConsoleError::UnknownTab(id.to_string()))
    }

    pub fn active(&self) -> Tab {
        self.active_panel
    }

    #[cfg(test)]
    pub fn is_panel_active(&self, tab: Tab) -> bool {
        self.active_panel == tab
    }

    pub fn is_selector_active(&self, tab: Tab) -> bool {
        self.active_selector == tab
    }

    pub fn next(self) -> Self {
        self.activate(self.active_panel.next())
    }

    pub fn prev(self) -> Self {
        self.activate(self.active_panel.prev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_exactly_one() {
        for start in Tab::ALL {
            for target in Tab::ALL {
                let bar = TabBar::new(start).activate(target);
                let panels: Vec<Tab> = Tab::ALL
                    .into_iter()
                    .filter(|t| bar.is_panel_active(*t))
                    .collect();
                let selectors: Vec<Tab> = Tab::ALL
                    .into_iter()
                    .filter(|t| bar.is_selector_active(*t))
                    .collect();
                assert_eq!(panels, vec![target]);
                assert_eq!(selectors, vec![target]);
            }
        }
    }

    #[test]
    fn test_activate_by_id() {
        let bar = TabBar::default().activate_id("reports").unwrap();
        assert_eq!(bar.active(), Tab::Reports);

        let err = TabBar::default().activate_id("settings").unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownTab(ref id) if id == "settings"));
    }

    #[test]
    fn test_cycle() {
        let bar = TabBar::new(Tab::Server);
        assert_eq!(bar.next().active(), Tab::Generate);
        assert_eq!(bar.prev().active(), Tab::Reports);
        assert_eq!(TabBar::new(Tab::Generate).prev().active(), Tab::Server);
    }
}

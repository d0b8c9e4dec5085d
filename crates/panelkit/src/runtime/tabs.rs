use crate::runtime::{Runtime, factory::{self, ComponentView}};
use panelkit_schema::TabsProps;
use std::collections::BTreeMap;

///
/// TabsPanel
///
/// Tabbed composition of nested components. With `load_on_click` set,
/// a tab's component tree is built the first time the tab is activated
/// and stays mounted afterwards; switching away never unmounts.
///

#[derive(Debug)]
pub struct TabsPanel {
    props: TabsProps,
    pub active: String,
    panes: BTreeMap<String, ComponentView>,
}

impl TabsPanel {
    /// Mount the panel on its first tab, building either every pane or
    /// just the first one depending on `load_on_click`.
    #[must_use]
    pub fn mount(runtime: &Runtime, role: Option<&str>, props: TabsProps) -> Self {
        let active = props
            .tabs
            .first()
            .map_or_else(String::new, |tab| tab.title.clone());

        let mut panel = Self {
            props,
            active,
            panes: BTreeMap::new(),
        };

        if panel.props.load_on_click {
            let first = panel.active.clone();
            panel.load(runtime, role, &first);
        } else {
            let titles: Vec<String> = panel
                .props
                .tabs
                .iter()
                .map(|tab| tab.title.clone())
                .collect();
            for title in titles {
                panel.load(runtime, role, &title);
            }
        }

        panel
    }

    #[must_use]
    pub const fn props(&self) -> &TabsProps {
        &self.props
    }

    /// Tab titles in declaration order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.props.tabs.iter().map(|tab| tab.title.as_str()).collect()
    }

    /// Activate a tab, building its pane on first activation.
    pub fn activate(&mut self, runtime: &Runtime, role: Option<&str>, title: &str) {
        if !self.props.tabs.iter().any(|tab| tab.title == title) {
            return;
        }

        self.active = title.to_string();
        self.load(runtime, role, title);
    }

    /// Whether a tab's component tree has been built.
    #[must_use]
    pub fn is_loaded(&self, title: &str) -> bool {
        self.panes.contains_key(title)
    }

    /// The built pane for a tab, if it has been activated/loaded.
    #[must_use]
    pub fn pane(&self, title: &str) -> Option<&ComponentView> {
        self.panes.get(title)
    }

    fn load(&mut self, runtime: &Runtime, role: Option<&str>, title: &str) {
        if self.panes.contains_key(title) {
            return;
        }
        let Some(tab) = self.props.tabs.iter().find(|tab| tab.title == title) else {
            return;
        };

        let pane = factory::build_component(runtime, role, &tab.component);
        self.panes.insert(title.to_string(), pane);
    }
}

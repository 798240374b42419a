// Result regions and the content rendered into them.
// A region is overwritten wholesale by each action, never appended to.

use std::collections::BTreeMap;

use super::tabs::Tab;

/// Styling tag for a rendered region. Has no effect on later logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderKind {
    Success,
    Error,
    #[default]
    Info,
}

/// Named output area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    Single,
    Batch,
    Quality,
    Report,
    Server,
}

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        RegionId::Single,
        RegionId::Batch,
        RegionId::Quality,
        RegionId::Report,
        RegionId::Server,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            RegionId::Single => "single-result",
            RegionId::Batch => "generate-result",
            RegionId::Quality => "quality-result",
            RegionId::Report => "report-result",
            RegionId::Server => "server-result",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RegionId::Single => "Single Review",
            RegionId::Batch => "Batch",
            RegionId::Quality => "Quality",
            RegionId::Report => "Report",
            RegionId::Server => "Server",
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            RegionId::Single | RegionId::Batch => Tab::Generate,
            RegionId::Quality => Tab::Quality,
            RegionId::Report => Tab::Reports,
            RegionId::Server => Tab::Server,
        }
    }
}

/// Score card in a row of metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub label: String,
    pub value: String,
    /// `Some(true)` passed styling, `Some(false)` failed styling.
    pub passed: Option<bool>,
}

/// One block of pre-formatted result content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Field { label: String, value: String },
    Text(String),
    Meta(String),
    Scores(Vec<ScoreCard>),
    /// Reference to a server artifact; `path` is relative to the file endpoint.
    Link { label: String, path: String, url: String },
    Preformatted(String),
}

/// Rendered content for a region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub blocks: Vec<Block>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Server paths referenced by download links, in display order.
    pub fn link_paths(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Link { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Flatten to plain text, one line per block line.
    #[cfg(test)]
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Heading(text) | Block::Text(text) | Block::Meta(text) => {
                    lines.push(text.clone())
                }
                Block::Field { label, value } => lines.push(format!("{}: {}", label, value)),
                Block::Scores(cards) => lines.push(
                    cards
                        .iter()
                        .map(|c| format!("{}: {}", c.label, c.value))
                        .collect::<Vec<_>>()
                        .join(" | "),
                ),
                Block::Link { label, url, .. } => lines.push(format!("{} <{}>", label, url)),
                Block::Preformatted(text) => lines.extend(text.lines().map(str::to_string)),
            }
        }
        lines.join("\n")
    }
}

/// A region's current display state.
#[derive(Debug, Clone, Default)]
pub struct Region {
    pub visible: bool,
    pub kind: RenderKind,
    pub content: Fragment,
    /// Vertical scroll offset within the region.
    pub scroll: u16,
}

/// All result regions.
#[derive(Debug, Clone)]
pub struct Regions {
    regions: BTreeMap<RegionId, Region>,
}

impl Default for Regions {
    fn default() -> Self {
        Self {
            regions: RegionId::ALL
                .into_iter()
                .map(|id| (id, Region::default()))
                .collect(),
        }
    }
}

impl Regions {
    /// Show the region, tag it, and replace its content.
    pub fn render(&mut self, id: RegionId, content: Fragment, kind: RenderKind) {
        self.regions.insert(
            id,
            Region {
                visible: true,
                kind,
                content,
                scroll: 0,
            },
        );
    }

    #[cfg(test)]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    /// Visible regions belonging to a tab.
    pub fn for_tab(&self, tab: Tab) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .filter(move |(id, region)| id.tab() == tab && region.visible)
            .map(|(id, region)| (*id, region))
    }

    pub fn scroll(&mut self, tab: Tab, delta: i32) {
        for (id, region) in self.regions.iter_mut() {
            if id.tab() == tab && region.visible {
                region.scroll = if delta < 0 {
                    region.scroll.saturating_sub(delta.unsigned_abs() as u16)
                } else {
                    region.scroll.saturating_add(delta as u16)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_overwrites() {
        let mut regions = Regions::default();
        assert!(!regions.get(RegionId::Report).unwrap().visible);

        regions.render(
            RegionId::Report,
            Fragment::new().push(Block::Text("first".into())),
            RenderKind::Success,
        );
        regions.render(
            RegionId::Report,
            Fragment::new().push(Block::Text("second".into())),
            RenderKind::Error,
        );

        let region = regions.get(RegionId::Report).unwrap();
        assert!(region.visible);
        assert_eq!(region.kind, RenderKind::Error);
        assert_eq!(region.content.to_plain_text(), "second");
    }

    #[test]
    fn test_for_tab_only_visible() {
        let mut regions = Regions::default();
        assert_eq!(regions.for_tab(Tab::Generate).count(), 0);

        regions.render(RegionId::Batch, Fragment::new(), RenderKind::Info);
        let ids: Vec<RegionId> = regions.for_tab(Tab::Generate).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RegionId::Batch]);
    }

    #[test]
    fn test_link_paths() {
        let fragment = Fragment::new()
            .push(Block::Heading("Files".into()))
            .push(Block::Link {
                label: "CSV Log".into(),
                path: "data/logs/a.csv".into(),
                url: "http://x/api/files/data/logs/a.csv".into(),
            });
        assert_eq!(fragment.link_paths(), vec!["data/logs/a.csv"]);
    }
}

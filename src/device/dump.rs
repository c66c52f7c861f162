use crate::device::DeviceError;

/// One element of a UI hierarchy dump. The same visible label may surface as
/// displayed `text`, as the accessibility `desc`, or both, depending on which
/// toolkit rendered the widget; the resolver probes both channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNode {
    pub text: String,
    pub desc: String,
    pub class: String,
    pub resource_id: String,
    pub bounds: Bounds,
}

/// Screen-space rectangle of a node, as dumped: `[left,top][right,bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    fn parse(raw: &str) -> Option<Bounds> {
        // "[0,63][1080,1920]"
        let mut coords = raw
            .split(['[', ']', ','])
            .filter(|part| !part.is_empty())
            .map(|part| part.trim().parse::<i32>());
        let mut next = || coords.next()?.ok();
        Some(Bounds {
            left: next()?,
            top: next()?,
            right: next()?,
            bottom: next()?,
        })
    }
}

/// A point-in-time dump of the UI tree. Never cached: screen content changes
/// between steps, so callers re-dump for every resolution.
#[derive(Debug, Clone, Default)]
pub struct UiSnapshot {
    pub nodes: Vec<UiNode>,
}

impl UiSnapshot {
    pub fn new(nodes: Vec<UiNode>) -> Self {
        UiSnapshot { nodes }
    }

    /// Non-empty displayed texts, in tree order. Used for diagnostics only.
    pub fn visible_texts(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .map(|node| node.text.trim())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Parse a `uiautomator dump` document into a flat node list. Nodes without
/// text, description or bounds are kept; the resolver filters as it matches.
pub fn parse_ui_dump(xml: &str) -> Result<UiSnapshot, DeviceError> {
    let document = roxmltree::Document::parse(xml)?;
    let nodes = document
        .descendants()
        .filter(|element| element.has_tag_name("node"))
        .map(|element| UiNode {
            text: element.attribute("text").unwrap_or_default().to_string(),
            desc: element
                .attribute("content-desc")
                .unwrap_or_default()
                .to_string(),
            class: element.attribute("class").unwrap_or_default().to_string(),
            resource_id: element
                .attribute("resource-id")
                .unwrap_or_default()
                .to_string(),
            bounds: element
                .attribute("bounds")
                .and_then(Bounds::parse)
                .unwrap_or_default(),
        })
        .collect();
    Ok(UiSnapshot::new(nodes))
}

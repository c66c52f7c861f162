use crate::device::{DeviceError, UiDriver, UiNode, UiSnapshot};

/// Lookup strategies, in the order they are tried. The target app renders
/// the same visible label through different accessibility channels depending
/// on which toolkit drew the widget, and labels may be truncated or composed
/// into larger strings, hence the substring fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExactText,
    TextContains,
    ExactDesc,
    DescContains,
}

impl Strategy {
    const CHAIN: [Strategy; 4] = [
        Strategy::ExactText,
        Strategy::TextContains,
        Strategy::ExactDesc,
        Strategy::DescContains,
    ];

    fn matches(self, node: &UiNode, label: &str) -> bool {
        match self {
            Strategy::ExactText => node.text == label,
            Strategy::TextContains => !node.text.is_empty() && node.text.contains(label),
            Strategy::ExactDesc => node.desc == label,
            Strategy::DescContains => !node.desc.is_empty() && node.desc.contains(label),
        }
    }
}

/// A resolved element: the matching node plus how it was found.
#[derive(Debug, Clone)]
pub struct UiElement {
    pub node: UiNode,
    pub strategy: Strategy,
    pub label: String,
}

impl UiElement {
    pub fn tap_point(&self) -> (i32, i32) {
        self.node.bounds.center()
    }
}

/// Locate an element for `label`, trying each strategy in turn against a
/// fresh dump; the first hit wins and later strategies are never attempted.
/// Absence is an expected outcome, not an error, and nothing is memoized:
/// screen content changes between steps, so every call re-queries the tree.
pub async fn resolve<D: UiDriver>(
    driver: &D,
    label: &str,
) -> Result<Option<UiElement>, DeviceError> {
    let snapshot = driver.dump().await?;
    Ok(find_in(&snapshot, label))
}

/// First label of `labels` that resolves, each against its own fresh dump.
pub async fn resolve_any<D: UiDriver>(
    driver: &D,
    labels: &[String],
) -> Result<Option<UiElement>, DeviceError> {
    for label in labels {
        if let Some(element) = resolve(driver, label).await? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

/// Strategy chain over an already-taken snapshot.
pub fn find_in(snapshot: &UiSnapshot, label: &str) -> Option<UiElement> {
    if label.is_empty() {
        return None;
    }
    for strategy in Strategy::CHAIN {
        if let Some(node) = snapshot
            .nodes
            .iter()
            .find(|node| strategy.matches(node, label))
        {
            tracing::debug!(label, ?strategy, ?node.bounds, "resolved element");
            return Some(UiElement {
                node: node.clone(),
                strategy,
                label: label.to_string(),
            });
        }
    }
    tracing::debug!(label, "element not found");
    None
}

/// Log what is actually on screen and which of the expected labels resolve.
/// Diagnostic only; failures are swallowed.
pub async fn log_visible_labels<D: UiDriver>(driver: &D, expected: &[String]) {
    match driver.dump().await {
        Ok(snapshot) => {
            tracing::debug!(texts = ?snapshot.visible_texts(), "visible displayed texts");
            for label in expected {
                let found = find_in(&snapshot, label).is_some();
                tracing::debug!(label, found, "expected label");
            }
        }
        Err(err) => tracing::warn!(?err, "could not dump UI tree for diagnostics"),
    }
}

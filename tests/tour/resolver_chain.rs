use webspace_tour::resolver::{self, Strategy};

use crate::fake::{FakeDevice, node};

#[tokio::test]
async fn exact_text_never_falls_through() {
    let device = FakeDevice::new();
    // A desc-channel decoy sits earlier in the tree than the exact text hit.
    device.screen(
        "root",
        vec![node("", "Tasks", 0), node("Tasks", "", 1), node("Tasks today", "", 2)],
    );

    let element = resolver::resolve(&device, "Tasks").await.unwrap().unwrap();
    assert_eq!(element.strategy, Strategy::ExactText);
    assert_eq!(element.node.bounds.top, 100);
}

#[tokio::test]
async fn partial_and_desc_fallbacks_engage_in_order() {
    let device = FakeDevice::new();
    device.screen(
        "root",
        vec![node("Home Dashboard", "", 0), node("", "News Feed", 1)],
    );

    // Truncated label: substring on displayed text.
    let element = resolver::resolve(&device, "Dashboard").await.unwrap().unwrap();
    assert_eq!(element.strategy, Strategy::TextContains);

    // Label only present on the accessibility channel.
    let element = resolver::resolve(&device, "News Feed").await.unwrap().unwrap();
    assert_eq!(element.strategy, Strategy::ExactDesc);

    let element = resolver::resolve(&device, "News").await.unwrap().unwrap();
    assert_eq!(element.strategy, Strategy::DescContains);
}

#[tokio::test]
async fn absence_is_a_value_not_an_error() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("All", "", 0)]);

    let outcome = resolver::resolve(&device, "Nonexistent").await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn every_resolution_re_queries_the_tree() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("All", "", 0)]);

    resolver::resolve(&device, "All").await.unwrap();
    resolver::resolve(&device, "All").await.unwrap();
    assert_eq!(device.dump_count(), 2);
}

#[tokio::test]
async fn resolve_any_returns_the_first_label_that_resolves() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("Notes", "", 0), node("Tasks", "", 1)]);

    let labels = vec![
        "Missing".to_string(),
        "Tasks".to_string(),
        "Notes".to_string(),
    ];
    let element = resolver::resolve_any(&device, &labels).await.unwrap().unwrap();
    assert_eq!(element.label, "Tasks");
}

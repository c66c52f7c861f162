use webspace_tour::drawer::{DRAWER_TOGGLE_DESC, DrawerVerifier};

use crate::fake::{FakeDevice, node, quick_pauses};

fn probes() -> Vec<String> {
    vec!["My Blog".to_string(), "Tasks".to_string()]
}

#[tokio::test]
async fn open_via_toggle_reports_observed_state() {
    let device = FakeDevice::new();
    device
        .screen("root", vec![node("", DRAWER_TOGGLE_DESC, 0)])
        .screen("drawer", vec![node("My Blog", "", 0)])
        .on_tap(DRAWER_TOGGLE_DESC, "drawer");

    let drawer = DrawerVerifier::new(probes(), &quick_pauses());
    assert!(drawer.open(&device).await.unwrap());
    // The toggle was tapped rather than swiped.
    assert_eq!(device.taps().len(), 1);
}

#[tokio::test]
async fn open_falls_back_to_edge_swipe() {
    let device = FakeDevice::new();
    device
        .screen("root", vec![node("All", "", 0)])
        .screen("drawer", vec![node("Tasks", "", 0)])
        .on_swipe("drawer");

    let drawer = DrawerVerifier::new(probes(), &quick_pauses());
    assert!(drawer.open(&device).await.unwrap());
    assert!(device.taps().is_empty());
}

#[tokio::test]
async fn open_reports_closed_when_no_probe_appears() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("All", "", 0)]);
    // No swipe route: the gesture does nothing visible.

    let drawer = DrawerVerifier::new(probes(), &quick_pauses());
    assert!(!drawer.open(&device).await.unwrap());
}

#[tokio::test]
async fn empty_probe_set_reports_closed_without_crashing() {
    let device = FakeDevice::new();
    device
        .screen("root", vec![node("All", "", 0)])
        .screen("drawer", vec![node("My Blog", "", 0)])
        .on_swipe("drawer");

    let drawer = DrawerVerifier::new(Vec::new(), &quick_pauses());
    assert!(!drawer.open(&device).await.unwrap());
}

#[tokio::test]
async fn close_uses_the_back_affordance_without_reverifying() {
    let device = FakeDevice::new();
    device
        .screen("drawer", vec![node("My Blog", "", 0)])
        .on_back("root");
    device.on_swipe("drawer");

    let drawer = DrawerVerifier::new(probes(), &quick_pauses());
    drawer.open(&device).await.unwrap();
    let dumps_before_close = device.dump_count();

    drawer.close(&device).await.unwrap();
    assert_eq!(device.current_screen(), "root");
    // Fire and forget: closing takes no further tree dumps.
    assert_eq!(device.dump_count(), dumps_before_close);
}

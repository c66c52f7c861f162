use webspace_tour::capture::NullCapture;
use webspace_tour::device::DeviceError;
use webspace_tour::drawer::DrawerVerifier;
use webspace_tour::scenario::{PauseClass, RunState, ScenarioRunner, Step};

use crate::fake::{FakeDevice, RecordingCapture, node, quick_pauses};

fn runner<'a>(
    device: &'a FakeDevice,
    drawer: &'a DrawerVerifier,
    capture: &'a mut RecordingCapture,
) -> ScenarioRunner<'a, FakeDevice, RecordingCapture> {
    ScenarioRunner::new(device, drawer, capture, quick_pauses(), "org.example.app".to_string())
}

fn no_probes() -> DrawerVerifier {
    DrawerVerifier::new(Vec::new(), &quick_pauses())
}

#[tokio::test]
async fn missing_element_degrades_without_stopping_independent_steps() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("All", "", 0)]);
    let drawer = no_probes();
    let mut capture = RecordingCapture::new();

    let steps = vec![
        Step::tap("Missing", vec![Step::capture(1, "dependent")]),
        Step::capture(2, "independent"),
    ];
    let report = runner(&device, &drawer, &mut capture)
        .run(&steps)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Degraded);
    assert_eq!(report.missed_targets, vec!["Missing"]);
    assert_eq!(report.steps_skipped, 1);
    // The independent checkpoint still fired.
    assert_eq!(report.checkpoints, vec![(2, "independent".to_string())]);
    assert_eq!(capture.labels(), vec!["02-independent"]);
}

#[tokio::test]
async fn full_tour_completes_when_everything_resolves() {
    let device = FakeDevice::new();
    device
        .screen("root", vec![node("All", "", 0)])
        .screen("sites", vec![node("Search", "", 0)])
        .screen("drawer", vec![node("My Blog", "", 0)])
        .on_tap("All", "sites")
        .on_swipe("drawer");
    let drawer = DrawerVerifier::new(vec!["My Blog".to_string()], &quick_pauses());
    let mut capture = RecordingCapture::new();

    let steps = vec![
        Step::capture(1, "webspaces-list"),
        Step::tap(
            "All",
            vec![
                Step::settle(PauseClass::Short),
                Step::capture(2, "all-sites"),
            ],
        ),
        Step::VerifyDrawer {
            then: vec![Step::capture(3, "sites-drawer")],
        },
    ];
    let report = runner(&device, &drawer, &mut capture)
        .run(&steps)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Completed);
    assert!(report.missed_targets.is_empty());
    assert_eq!(report.steps_skipped, 0);
    assert_eq!(
        capture.labels(),
        vec!["01-webspaces-list", "02-all-sites", "03-sites-drawer"]
    );
}

#[tokio::test]
async fn unverified_drawer_skips_only_its_branch() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("All", "", 0)]);
    // No swipe route and no probes on screen: the drawer never verifies.
    let drawer = DrawerVerifier::new(vec!["My Blog".to_string()], &quick_pauses());
    let mut capture = RecordingCapture::new();

    let steps = vec![
        Step::VerifyDrawer {
            then: vec![Step::capture(1, "drawer")],
        },
        Step::capture(2, "after"),
    ];
    let report = runner(&device, &drawer, &mut capture)
        .run(&steps)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Degraded);
    assert_eq!(report.missed_targets, vec!["drawer"]);
    assert_eq!(capture.labels(), vec!["02-after"]);
}

#[tokio::test]
async fn vanished_process_aborts_the_run() {
    let device = FakeDevice::new();
    device.kill_app();
    let drawer = no_probes();
    let mut capture = RecordingCapture::new();

    let err = runner(&device, &drawer, &mut capture)
        .run(&[Step::capture(1, "never")])
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceError::ProcessUnavailable(_)));
    assert!(capture.labels().is_empty());
}

#[tokio::test]
async fn capture_failure_is_logged_not_propagated() {
    let device = FakeDevice::new();
    let drawer = no_probes();
    let mut capture = RecordingCapture::failing();

    let report = runner(&device, &drawer, &mut capture)
        .run(&[Step::capture(1, "artifact"), Step::capture(2, "second")])
        .await
        .unwrap();

    // The tour keeps going and the checkpoints still count as visited.
    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.checkpoints.len(), 2);
}

#[tokio::test]
async fn repeating_a_checkpoint_is_legal() {
    let device = FakeDevice::new();
    let drawer = no_probes();
    let mut capture = RecordingCapture::new();

    let steps = vec![Step::capture(4, "site-webview"), Step::capture(4, "site-webview")];
    let report = runner(&device, &drawer, &mut capture)
        .run(&steps)
        .await
        .unwrap();

    assert_eq!(report.checkpoints.len(), 2);
    assert_eq!(capture.labels(), vec!["04-site-webview", "04-site-webview"]);
}

#[tokio::test]
async fn type_text_taps_then_types() {
    let device = FakeDevice::new();
    device.screen("root", vec![node("", "Address bar", 0)]);
    let drawer = no_probes();
    let mut capture = NullCapture;

    let steps = vec![Step::TypeText {
        target: "Address bar".to_string(),
        text: "https://example.com".to_string(),
    }];
    let report = ScenarioRunner::new(
        &device,
        &drawer,
        &mut capture,
        quick_pauses(),
        "org.example.app".to_string(),
    )
    .run(&steps)
    .await
    .unwrap();

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(device.taps().len(), 1);
    assert_eq!(device.typed(), vec!["https://example.com"]);
}

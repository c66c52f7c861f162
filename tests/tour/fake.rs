//! Scripted in-process stand-ins for the attached device and the capture
//! collaborator, so tours run without hardware.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use webspace_tour::capture::{Capture, CaptureError};
use webspace_tour::device::{Bounds, DeviceError, UiDriver, UiNode, UiSnapshot};

/// A node whose bounds are derived from a slot index, so tap coordinates map
/// back to it unambiguously.
pub fn node(text: &str, desc: &str, slot: i32) -> UiNode {
    UiNode {
        text: text.to_string(),
        desc: desc.to_string(),
        class: "android.widget.TextView".to_string(),
        resource_id: String::new(),
        bounds: Bounds {
            left: 0,
            top: slot * 100,
            right: 400,
            bottom: slot * 100 + 80,
        },
    }
}

#[derive(Default)]
struct Inner {
    screens: HashMap<String, Vec<UiNode>>,
    current: String,
    tap_routes: HashMap<String, String>,
    swipe_route: Option<String>,
    back_route: Option<String>,
    alive: bool,
    dumps: usize,
    taps: Vec<(i32, i32)>,
    typed: Vec<String>,
}

/// Fake device: named screens, routes that switch screens on tap, swipe or
/// back, and counters for the interactions a test wants to assert on.
pub struct FakeDevice {
    inner: Mutex<Inner>,
}

impl FakeDevice {
    pub fn new() -> Self {
        let mut inner = Inner {
            current: "root".to_string(),
            alive: true,
            ..Inner::default()
        };
        inner.screens.insert("root".to_string(), Vec::new());
        FakeDevice {
            inner: Mutex::new(inner),
        }
    }

    pub fn screen(&self, name: &str, nodes: Vec<UiNode>) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .screens
            .insert(name.to_string(), nodes);
        self
    }

    /// Tapping a node whose text or description equals `label` switches to
    /// `screen`.
    pub fn on_tap(&self, label: &str, screen: &str) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .tap_routes
            .insert(label.to_string(), screen.to_string());
        self
    }

    pub fn on_swipe(&self, screen: &str) -> &Self {
        self.inner.lock().unwrap().swipe_route = Some(screen.to_string());
        self
    }

    pub fn on_back(&self, screen: &str) -> &Self {
        self.inner.lock().unwrap().back_route = Some(screen.to_string());
        self
    }

    pub fn kill_app(&self) {
        self.inner.lock().unwrap().alive = false;
    }

    pub fn dump_count(&self) -> usize {
        self.inner.lock().unwrap().dumps
    }

    pub fn taps(&self) -> Vec<(i32, i32)> {
        self.inner.lock().unwrap().taps.clone()
    }

    pub fn typed(&self) -> Vec<String> {
        self.inner.lock().unwrap().typed.clone()
    }

    pub fn current_screen(&self) -> String {
        self.inner.lock().unwrap().current.clone()
    }
}

impl UiDriver for FakeDevice {
    async fn dump(&self) -> Result<UiSnapshot, DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.dumps += 1;
        let nodes = inner
            .screens
            .get(&inner.current)
            .cloned()
            .unwrap_or_default();
        Ok(UiSnapshot::new(nodes))
    }

    async fn tap(&self, x: i32, y: i32) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.taps.push((x, y));
        let Some(nodes) = inner.screens.get(&inner.current) else {
            return Ok(());
        };
        let hit = nodes
            .iter()
            .find(|node| node.bounds.contains(x, y))
            .cloned();
        if let Some(node) = hit {
            let route = inner
                .tap_routes
                .get(&node.text)
                .or_else(|| inner.tap_routes.get(&node.desc))
                .cloned();
            if let Some(screen) = route {
                inner.current = screen;
            }
        }
        Ok(())
    }

    async fn swipe(
        &self,
        _from: (i32, i32),
        _to: (i32, i32),
        _duration: Duration,
    ) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(screen) = inner.swipe_route.clone() {
            inner.current = screen;
        }
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), DeviceError> {
        self.inner.lock().unwrap().typed.push(text.to_string());
        Ok(())
    }

    async fn press_back(&self) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(screen) = inner.back_route.clone() {
            inner.current = screen;
        }
        Ok(())
    }

    async fn display_size(&self) -> Result<(i32, i32), DeviceError> {
        Ok((1080, 1920))
    }

    async fn is_app_alive(&self) -> Result<bool, DeviceError> {
        Ok(self.inner.lock().unwrap().alive)
    }
}

/// Capture that records checkpoint labels, optionally failing every call to
/// exercise the swallow-and-continue path.
#[derive(Default)]
pub struct RecordingCapture {
    labels: Vec<String>,
    pub fail: bool,
}

impl RecordingCapture {
    pub fn new() -> Self {
        RecordingCapture::default()
    }

    pub fn failing() -> Self {
        RecordingCapture {
            fail: true,
            ..RecordingCapture::default()
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }
}

impl Capture for RecordingCapture {
    async fn capture(&mut self, label: &str) -> Result<(), CaptureError> {
        if self.fail {
            return Err(CaptureError::Io(std::io::Error::other("disk full")));
        }
        self.labels.push(label.to_string());
        Ok(())
    }
}

/// Short settle delays so tours finish instantly in tests.
pub fn quick_pauses() -> webspace_tour::config::Pauses {
    webspace_tour::config::Pauses {
        short: Duration::from_millis(1),
        medium: Duration::from_millis(1),
        long: Duration::from_millis(1),
    }
}

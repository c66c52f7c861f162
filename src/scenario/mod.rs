pub mod tours;

use std::pin::Pin;

use tokio::time::sleep;

use crate::capture::Capture;
use crate::config::Pauses;
use crate::device::{DeviceError, UiDriver};
use crate::drawer::DrawerVerifier;
use crate::resolver;

/// Settle classes instead of raw durations, so tours stay data and the
/// actual timings remain a configuration concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseClass {
    Short,
    Medium,
    Long,
}

/// One step of a tour. Steps with a `then` branch gate their sub-steps on
/// the step itself succeeding; a miss skips the branch and degrades the run
/// without aborting it.
#[derive(Debug, Clone)]
pub enum Step {
    /// Resolve the first matching target and tap it. Multiple targets model
    /// "whichever of these is on screen", first resolvable wins.
    ResolveAndTap { targets: Vec<String>, then: Vec<Step> },
    /// Resolve the target, tap it, then type into the focused element.
    TypeText { target: String, text: String },
    /// Open the drawer and verify it by proxy before running the branch.
    VerifyDrawer { then: Vec<Step> },
    CloseDrawer,
    /// Invoke the external capture at a named checkpoint. Idempotent: the
    /// same checkpoint may fire more than once and simply produces another
    /// artifact.
    Capture { ordinal: u32, name: String },
    Settle { pause: PauseClass },
}

impl Step {
    pub fn tap(target: impl Into<String>, then: Vec<Step>) -> Self {
        Step::ResolveAndTap {
            targets: vec![target.into()],
            then,
        }
    }

    pub fn tap_any(targets: impl IntoIterator<Item = String>, then: Vec<Step>) -> Self {
        Step::ResolveAndTap {
            targets: targets.into_iter().collect(),
            then,
        }
    }

    pub fn capture(ordinal: u32, name: impl Into<String>) -> Self {
        Step::Capture {
            ordinal,
            name: name.into(),
        }
    }

    pub fn settle(pause: PauseClass) -> Self {
        Step::Settle { pause }
    }
}

/// Total number of steps in a branch, nested branches included. Used to
/// account for skipped work when a branch is abandoned.
fn count_steps(steps: &[Step]) -> usize {
    steps
        .iter()
        .map(|step| match step {
            Step::ResolveAndTap { then, .. } | Step::VerifyDrawer { then } => {
                1 + count_steps(then)
            }
            _ => 1,
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    /// Every step executed.
    Completed,
    /// At least one target failed to resolve; the affected branches were
    /// skipped and everything independent still ran.
    Degraded,
}

/// What a tour did. A degraded run is a normal outcome; the only way a tour
/// fails outright is the target process disappearing.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub state: RunState,
    pub steps_executed: usize,
    pub steps_skipped: usize,
    pub checkpoints: Vec<(u32, String)>,
    pub missed_targets: Vec<String>,
}

impl RunReport {
    fn new() -> Self {
        RunReport {
            state: RunState::NotStarted,
            steps_executed: 0,
            steps_skipped: 0,
            checkpoints: Vec::new(),
            missed_targets: Vec::new(),
        }
    }
}

/// Drives a declarative tour against the live app: resolve, act, verify,
/// capture. Strictly sequential; no step starts before the previous step's
/// settle has elapsed.
pub struct ScenarioRunner<'a, D, C> {
    driver: &'a D,
    drawer: &'a DrawerVerifier,
    capture: &'a mut C,
    pauses: Pauses,
    package: String,
    report: RunReport,
}

impl<'a, D: UiDriver, C: Capture> ScenarioRunner<'a, D, C> {
    pub fn new(
        driver: &'a D,
        drawer: &'a DrawerVerifier,
        capture: &'a mut C,
        pauses: Pauses,
        package: String,
    ) -> Self {
        ScenarioRunner {
            driver,
            drawer,
            capture,
            pauses,
            package,
            report: RunReport::new(),
        }
    }

    /// Run the tour to completion. A missing element degrades the run; only
    /// an unrecoverable platform error aborts it.
    pub async fn run(mut self, steps: &[Step]) -> Result<RunReport, DeviceError> {
        self.report.state = RunState::Running;
        for step in steps {
            self.ensure_app_alive().await?;
            self.run_step(step).await?;
        }
        self.report.state = if self.report.missed_targets.is_empty() {
            RunState::Completed
        } else {
            RunState::Degraded
        };
        tracing::info!(
            state = ?self.report.state,
            executed = self.report.steps_executed,
            skipped = self.report.steps_skipped,
            checkpoints = self.report.checkpoints.len(),
            "tour finished"
        );
        Ok(self.report)
    }

    async fn ensure_app_alive(&self) -> Result<(), DeviceError> {
        if self.driver.is_app_alive().await? {
            Ok(())
        } else {
            Err(DeviceError::ProcessUnavailable(self.package.clone()))
        }
    }

    async fn run_step(&mut self, step: &Step) -> Result<(), DeviceError> {
        match step {
            Step::ResolveAndTap { targets, then } => {
                match resolver::resolve_any(self.driver, targets).await? {
                    Some(element) => {
                        let (x, y) = element.tap_point();
                        tracing::debug!(label = %element.label, x, y, "tapping");
                        self.driver.tap(x, y).await?;
                        self.report.steps_executed += 1;
                        self.run_branch(then).await?;
                    }
                    None => self.miss(&targets.join(" | "), then),
                }
            }
            Step::TypeText { target, text } => match resolver::resolve(self.driver, target).await? {
                Some(element) => {
                    let (x, y) = element.tap_point();
                    self.driver.tap(x, y).await?;
                    self.driver.type_text(text).await?;
                    self.report.steps_executed += 1;
                }
                None => self.miss(target, &[]),
            },
            Step::VerifyDrawer { then } => {
                if self.drawer.open(self.driver).await? {
                    self.report.steps_executed += 1;
                    self.run_branch(then).await?;
                } else {
                    self.miss("drawer", then);
                }
            }
            Step::CloseDrawer => {
                self.drawer.close(self.driver).await?;
                self.report.steps_executed += 1;
            }
            Step::Capture { ordinal, name } => {
                let label = format!("{ordinal:02}-{name}");
                if let Err(err) = self.capture.capture(&label).await {
                    tracing::warn!(?err, label, "capture failed");
                }
                self.report.checkpoints.push((*ordinal, name.clone()));
                self.report.steps_executed += 1;
            }
            Step::Settle { pause } => {
                sleep(self.pauses.duration(*pause)).await;
                self.report.steps_executed += 1;
            }
        }
        Ok(())
    }

    /// Boxed so the step/branch recursion has a finite future size.
    fn run_branch<'s>(
        &'s mut self,
        steps: &'s [Step],
    ) -> Pin<Box<dyn Future<Output = Result<(), DeviceError>> + 's>> {
        Box::pin(async move {
            for step in steps {
                self.run_step(step).await?;
            }
            Ok(())
        })
    }

    fn miss(&mut self, label: &str, skipped: &[Step]) {
        let skipped = count_steps(skipped);
        tracing::warn!(label, skipped, "target not found, skipping dependent steps");
        self.report.missed_targets.push(label.to_string());
        self.report.steps_skipped += skipped;
    }
}

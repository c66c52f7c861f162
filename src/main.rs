use itertools::Itertools;

use webspace_tour::app_dir::{create_harness_data_directory_if_not_exists, run_artifact_dir_path};
use webspace_tour::capture::Screencap;
use webspace_tour::config::TourConfig;
use webspace_tour::device::{Adb, AdbDriver};
use webspace_tour::drawer::DrawerVerifier;
use webspace_tour::model::Snapshot;
use webspace_tour::scenario::{RunReport, RunState, ScenarioRunner, tours};
use webspace_tour::store::{DevicePrefStore, StateSeeder};
use webspace_tour::{HarnessError, logging, resolver};

fn main() {
    create_harness_data_directory_if_not_exists()
        .expect("Failed to create harness data directory");
    logging::initialize_logger();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("multi-threading runtime cannot be initialized");

    match runtime.block_on(run()) {
        Ok(report) => {
            let checkpoints = report
                .checkpoints
                .iter()
                .map(|(ordinal, name)| format!("{ordinal:02}-{name}"))
                .join(", ");
            println!(
                "tour {:?}: {} step(s) executed, {} skipped, checkpoints: [{}]",
                report.state, report.steps_executed, report.steps_skipped, checkpoints
            );
            if report.state == RunState::Degraded {
                println!("missed targets: {}", report.missed_targets.iter().join(", "));
            }
        }
        Err(err) => {
            tracing::error!(?err, "tour aborted");
            eprintln!("tour aborted: {err}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<RunReport, HarnessError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting webspace tour");
    let config = TourConfig::load()?;
    let pauses = config.pauses()?;
    let adb = Adb::locate(config.device_serial.clone())?;
    let launch = config.launch_spec();

    // Clean process state before touching the store. Best effort: a failed
    // stop is logged, not fatal.
    if let Err(err) = adb.force_stop(&config.package).await {
        tracing::warn!(?err, "failed to force-stop target app");
    }

    let snapshot = Snapshot::store_listing();
    if launch.demo_mode {
        // The launch flag tells the app to self-seed; writing the store
        // externally as well would race it.
        tracing::info!("demo-mode launch flag set, skipping external seeding");
    } else {
        let store = DevicePrefStore::new(adb.clone(), config.package.clone());
        let mut seeder = StateSeeder::new(store, config.list_scheme);
        seeder.seed(&snapshot).await?;
        let report = seeder.verify().await?;
        tracing::info!(report = %report.summary(), "seeded store verified");
    }

    adb.launch(&launch).await?;
    if !adb
        .wait_for_focus(&config.package, config.launch_timeout()?)
        .await
    {
        tracing::warn!("target app never took focus; continuing anyway");
    }

    let driver = AdbDriver::new(adb.clone(), config.package.clone());
    resolver::log_visible_labels(&driver, &snapshot.site_names()).await;

    let artifact_dir = match &config.capture_dir {
        Some(dir) => dir.clone(),
        None => run_artifact_dir_path()?,
    };
    let mut capture = Screencap::create(adb, artifact_dir)?;
    tracing::info!(dir = %capture.dir().display(), "writing checkpoint artifacts");

    let drawer = DrawerVerifier::new(snapshot.site_names(), &pauses);
    let runner = ScenarioRunner::new(&driver, &drawer, &mut capture, pauses, config.package.clone());
    let report = runner
        .run(&tours::store_listing_tour(&snapshot.site_names()))
        .await?;
    Ok(report)
}

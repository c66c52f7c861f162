use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const QUALIFIER: &str = ""; // Typically empty on macOS and Linux
const ORGANIZATION: &str = "";
const APPLICATION: &str = "Webspace-Tour";

pub fn harness_data_dir_path() -> Result<PathBuf, std::io::Error> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Failed to determine project directories",
        )
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn create_harness_data_directory_if_not_exists() -> Result<(), std::io::Error> {
    let data_dir = harness_data_dir_path()?;
    fs::create_dir_all(&data_dir)?;

    // Verify directory permissions
    let metadata = fs::metadata(&data_dir)?;
    if !metadata.is_dir() {
        return Err(std::io::Error::other("Created path is not a directory"));
    }
    Ok(())
}

pub fn harness_data_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if filename.is_empty() || filename.contains(std::path::is_separator) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid filename",
        ));
    }
    let data_dir = harness_data_dir_path()?;
    Ok(data_dir.join(filename))
}

/// Directory for one tour's checkpoint artifacts, stamped with the local
/// start time.
pub fn run_artifact_dir_path() -> Result<PathBuf, std::io::Error> {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    Ok(harness_data_dir_path()?
        .join("runs")
        .join(stamp.to_string()))
}

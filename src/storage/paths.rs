// Local path utilities.
// Resolves platform directories and derives safe file names for downloaded artifacts.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "review-console";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Default config file (~/.config/review-console/config.toml on Linux).
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Log file in the platform data directory.
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(format!("{}.log", APP_NAME)))
}

/// Default directory for downloaded artifacts.
pub fn default_download_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("downloads"))
}

/// Local file name for a server artifact path: its last segment, sanitized.
pub fn download_file_name(remote: &str) -> String {
    let name = remote
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .unwrap_or("download");
    sanitize_name(name)
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple.md"), "simple.md");
        assert_eq!(sanitize_name("report:v2?.md"), "report_v2_.md");
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("data/synthetic/logs/generation_log_1.csv"),
            "generation_log_1.csv"
        );
        assert_eq!(download_file_name("outputs/"), "outputs");
        assert_eq!(download_file_name("../.."), "download");
        assert_eq!(download_file_name(""), "download");
    }

    #[test]
    fn test_platform_paths() {
        // Path construction only; nothing touches the filesystem.
        if let Some(path) = config_path() {
            assert!(path.ends_with("config.toml"));
        }
        if let Some(path) = log_path() {
            assert!(path.ends_with("review-console.log"));
        }
    }
}

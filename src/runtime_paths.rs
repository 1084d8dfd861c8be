use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const APP_NAME: &str = "nova-bot";

/// Root for the database and config file. `NOVA_HOME` pins it, which keeps
/// several daemons (or test runs) on one machine apart.
pub fn app_root() -> PathBuf {
    app_root_with(|name| std::env::var(name).ok())
}

fn app_root_with<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(home) = lookup("NOVA_HOME").filter(|home| !home.trim().is_empty()) {
        return PathBuf::from(home.trim());
    }
    if let Some(project_dirs) = ProjectDirs::from("", "", APP_NAME) {
        return project_dirs.data_dir().to_path_buf();
    }
    if let Some(base_dirs) = BaseDirs::new() {
        return base_dirs.data_local_dir().join(APP_NAME);
    }
    std::env::temp_dir().join(APP_NAME)
}

pub fn default_db_path() -> String {
    app_root()
        .join("data")
        .join(format!("{APP_NAME}.db"))
        .to_string_lossy()
        .to_string()
}

pub fn default_config_path() -> String {
    app_root().join("config.json").to_string_lossy().to_string()
}

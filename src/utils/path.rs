use std::path::PathBuf;

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Config directory: `BARBERSHOP_CONFIG_DIR` if set, else `<config_dir>/barbershop`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BARBERSHOP_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| get_home_dir().join(".config"))
        .join("barbershop")
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Where the signed-in customer profile is stored.
pub fn get_session_path() -> PathBuf {
    get_config_dir().join("session.json")
}

pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("barbershop")
}

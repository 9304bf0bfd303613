use std::path::PathBuf;

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

pub fn get_config_dir() -> PathBuf {
    home_dir().join(".config").join("userdir")
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

pub fn get_state_dir() -> PathBuf {
    home_dir().join(".local").join("state").join("userdir")
}

pub fn get_theme_path() -> PathBuf {
    get_state_dir().join("theme")
}

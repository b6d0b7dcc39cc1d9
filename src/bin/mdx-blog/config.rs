use std::env;
use std::path::PathBuf;

use mdx_blog::config::{read_config, Config, CFG_FILE_NAME};

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// An explicit path must exist; otherwise the first config found wins and
/// no config at all means defaults.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Ok(Config::default()),
    };

    read_config(&config_path).map_err(|e| e.to_string())
}

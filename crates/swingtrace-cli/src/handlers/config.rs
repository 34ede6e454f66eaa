use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::Result;
use std::path::Path;
use swingtrace_runtime::Config;
use swingtrace_runtime::config::CONFIG_FILE;

pub fn init(data_dir: &Path, force: bool, renderer: &ConsoleRenderer) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let written = if path.exists() && !force {
        false
    } else {
        Config::default().save_to(&path)?;
        true
    };

    renderer.render(presenters::present_config_init(path, written))
}

pub fn show(data_dir: &Path, renderer: &ConsoleRenderer) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let exists = path.exists();
    let config = Config::load_from(&path)?;

    renderer.render(presenters::present_config(path, exists, config))
}

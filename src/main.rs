use std::io::{self, BufWriter, Write};

use anyhow::{Context, bail};
use glview::replay::ReplayScript;
use glview::settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command line arguments
    let mut script_path = None;
    let mut save_settings = false;
    for arg in std::env::args().skip(1) {
        if arg == "--save-settings" {
            save_settings = true;
        } else if script_path.is_none() {
            script_path = Some(arg);
        } else {
            bail!("unexpected argument '{}'", arg);
        }
    }

    let settings = Settings::load();
    if save_settings {
        settings.save().context("failed to store settings")?;
        log::info!("stored settings under '{}'", glview::CONFY_APP_NAME);
    }

    let Some(path) = script_path else {
        if save_settings {
            return Ok(());
        }
        bail!("usage: glview <script.json> [--save-settings]");
    };

    let script = ReplayScript::load(&path).with_context(|| format!("failed to load '{}'", path))?;
    let reports = script.run(&settings).context("replay failed")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for report in &reports {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

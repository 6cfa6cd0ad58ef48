use gravisynth::{run_3d, SceneController, ToyConfig};

use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scene file under `scenes/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_config() -> Result<ToyConfig> {
    let args = Args::parse();
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenes")
        .join(&args.file_name);
    ToyConfig::load(&config_path)
}

fn main() -> Result<()> {
    let cfg = load_config()?;

    let controller = SceneController::new(&cfg);
    run_3d(controller, &cfg);

    Ok(())
}

//! Caliper viewer binary: GPU depth-readback silhouette measurement and
//! nearest-point picking viewer.

use std::path::Path;

use caliper::{Options, Viewer};

/// Resolve the optional CLI argument into a loaded options preset.
///
/// The argument is either a path to a TOML preset file or the stem of a
/// preset under `assets/presets/`.
fn resolve_options(input: &str) -> Result<Options, String> {
    let direct = Path::new(input);
    if direct.exists() {
        return Options::load(direct)
            .map_err(|e| format!("failed to load preset {input}: {e}"));
    }

    let presets_dir = Path::new("assets/presets");
    let named = presets_dir.join(format!("{input}.toml"));
    if named.exists() {
        return Options::load(&named)
            .map_err(|e| format!("failed to load preset {input}: {e}"));
    }

    let available = Options::list_presets(presets_dir);
    Err(format!(
        "preset not found: {input} (available: {})",
        available.join(", ")
    ))
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(arg) => match resolve_options(&arg) {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let result = Viewer::builder()
        .with_title("Caliper")
        .with_options(options)
        .build()
        .run();

    if let Err(e) = result {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}

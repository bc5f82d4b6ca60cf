use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Puts the workspace config.toml next to the built binary, where
// `load_config` looks before the working directory.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!("cargo:warning=no config.toml at {:?}, the embedded default will be used", source_config);
        return;
    }

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=cannot locate the target profile directory, config.toml not copied");
        return;
    };

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}

/// target/<profile>, found by walking up from OUT_DIR
/// (target/<profile>/build/backend-xxx/out)
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

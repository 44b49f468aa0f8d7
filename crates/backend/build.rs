use std::env;
use std::fs;
use std::path::Path;

// Puts the workspace config.toml next to the built binary, where load_config looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR looks like target/<profile>/build/backend-xxx/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target/{} not found, config.toml not copied", profile);
        return;
    };

    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !config.exists() {
        println!("cargo:warning=no workspace config.toml, the embedded default is used");
        return;
    }

    let dest = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&config, &dest) {
        println!("cargo:warning=failed to copy config.toml to {:?}: {}", dest, e);
    }
}

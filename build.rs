// build.rs
use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let environment_dir = manifest_dir.join("assets").join("environment");
    fs::create_dir_all(&environment_dir).ok();

    // Seed a default environment manifest so a fresh checkout renders with
    // image-based lighting. An existing manifest is left untouched.
    let manifest_path = environment_dir.join("manifest.json");
    if manifest_path.exists() {
        return;
    }

    let default_manifest = serde_json::json!({
        "diffuse_map": "environment/diffuse_rgb9e5_zstd.ktx2",
        "specular_map": "environment/specular_rgb9e5_zstd.ktx2",
        "intensity": 900.0,
    });

    let json_content = serde_json::to_string_pretty(&default_manifest).unwrap();
    fs::write(&manifest_path, &json_content).expect("Failed to write environment manifest");

    println!("cargo:warning=Generated default assets/environment/manifest.json");
}

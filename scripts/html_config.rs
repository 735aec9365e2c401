use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    //  Environment variable parameter - the distributed directory
    let staging_dir = env::var("TRUNK_STAGING_DIR").unwrap();

    //  Using the configured html output name (set in Trunk.toml)
    let staged_html_path = PathBuf::from(staging_dir).join("glb-viewer.html");

    // Read the html file
    let html_change = fs::read_to_string(&staged_html_path).unwrap();

    // Rewrite absolute bundle paths so the page works from a subdirectory
    let html_change = html_change
        .replace("/glb-viewer.js", "./glb-viewer.js")
        .replace("/glb-viewer_bg.wasm", "./glb-viewer_bg.wasm");

    // Write
    fs::write(staged_html_path, html_change).unwrap();
}

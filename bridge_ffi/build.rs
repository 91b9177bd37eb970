use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };

    // Header generation is best-effort; a cbindgen parse failure must not
    // break the build.
    if let Ok(bindings) = cbindgen::generate(&crate_dir) {
        bindings.write_to_file("include/bridge_ffi.h");
    }
}

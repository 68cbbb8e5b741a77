//! Build script for the optional N-API bindings.
//!
//! The `node` feature compiles `src/node.rs` into a Node.js addon. `napi-build`
//! only needs to configure the linker in that case; plain library builds skip it.

extern crate napi_build;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    if std::env::var_os("CARGO_FEATURE_NODE").is_some() {
        napi_build::setup();
    }
}

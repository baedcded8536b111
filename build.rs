//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time, and records the build host's local time
//! so the watch has a starting point before the companion syncs the clock.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // Local wall clock as seconds since the epoch; the watch keeps naive local time
    let local = chrono::Local::now().naive_local().and_utc().timestamp();
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!("const UTC_TIME: i64 = {:?};", local))
        .unwrap();

    println!("cargo:rerun-if-changed=memory.x");
}

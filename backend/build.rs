use std::fs;
use std::io::ErrorKind;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        match fs::remove_dir_all(out_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => println!("cargo:warning=could not clear {}: {}", out_dir.display(), e),
        }
        if let Err(e) = fs::create_dir_all("static") {
            println!("cargo:warning=could not create static/: {}", e);
        }
        if let Err(e) = fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        ) {
            println!(
                "cargo:warning=could not copy {} into {}: {}",
                dist_dir.display(),
                out_dir.display(),
                e
            );
        }
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}

use chrono::{DateTime, Utc};

/// Stamps `BUILD_DATE` for `--version`, honouring `SOURCE_DATE_EPOCH` for
/// reproducible package builds.
fn main() {
    let stamp = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);
    println!("cargo:rustc-env=BUILD_DATE={}", stamp.format("%Y-%m-%d"));
}

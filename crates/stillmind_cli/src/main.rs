//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stillmind_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("stillmind_core ping={}", stillmind_core::ping());
    println!("stillmind_core version={}", stillmind_core::core_version());
}

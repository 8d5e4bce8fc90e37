//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todokit_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::sync::Arc;
use todokit_core::{Deadline, MemoryGateway, SystemClock, TaskStore};

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("todokit_core ping={}", todokit_core::ping());
    println!("todokit_core version={}", todokit_core::core_version());

    let mut store = TaskStore::open(Arc::new(MemoryGateway::new()), Arc::new(SystemClock));
    store.add_task("smoke task", Deadline::None);
    println!("todokit_core tasks={}", store.len());
}

//! FFI crate exposing the to-do core to the Flutter shell.

pub mod api;

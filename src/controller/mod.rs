// src/controller/mod.rs

// Blocking request/response client; the only runner this crate provides.
pub mod sync_controller;

// Re-export the public SyncController struct
pub use sync_controller::SyncController;

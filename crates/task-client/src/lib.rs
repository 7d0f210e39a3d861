//! REST client for the task backend.
//!
//! Implements [`assistant_core::TaskStore`] over the backend's JSON
//! endpoints (`GET/POST /tasks`, `PATCH/DELETE /tasks/:id`). The client
//! stamps `createdAt` on creation; the backend assigns identifiers.

mod client;
mod config;

pub use client::TaskServerClient;
pub use config::TaskServerConfig;

// Re-export the trait and payloads so callers don't need assistant-core
// in scope.
pub use assistant_core::{NewTask, StoreError, Task, TaskPatch, TaskStore};

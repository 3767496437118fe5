// ============================================================================
// SYLLABUS REVEAL - Typed prompt, loading overlay, typewriter content reveal,
// and a drifting particle network behind it all.
// ============================================================================
//
// Core logic (field/, reveal/) is plain Rust driven by virtual time and runs
// natively under `cargo test`. The browser host in web/ only exists on wasm.

pub mod config;
pub mod error;
pub mod field;
pub mod reveal;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{FieldConfig, Millis, PageConfig, RevealConfig};
pub use error::{HostError, HostResult};
pub use field::{ParticleField, Surface};
pub use reveal::{Page, Phase, Progress, Regions, Sequencer};

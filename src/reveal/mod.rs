// reveal/ - Scripted page reveal
//
// Prompt typing, loading overlay, then a staggered typewriter reveal of the
// page content. Driven entirely by virtual time so the browser host and the
// tests run the same code.

pub mod content;
pub mod loading;
pub mod page;
pub mod sequencer;
pub mod timeline;
pub mod typewriter;

pub use content::{RevealStep, Section};
pub use page::{Page, Regions};
pub use sequencer::{Phase, Progress, Sequencer};

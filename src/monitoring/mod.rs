pub mod narrator;

pub use narrator::{GenerationObserver, GenerationReport, LogNarrator, NoopObserver};

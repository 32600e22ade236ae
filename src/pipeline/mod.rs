//! Document intake pipeline: model routing, extraction against the
//! remote document-understanding backend, and deterministic mapping into
//! the Form 1040 aggregate.

pub mod extraction;
pub mod mapping;
pub mod model_router;
pub mod processor;

pub use processor::{map_document, DocumentProcessor};

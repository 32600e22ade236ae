//! Tax document intake.
//!
//! Takes a scanned W-2 or 1099 (INT/DIV/MISC/NEC), runs it through a
//! remote document-understanding backend with an OCR fallback and a
//! single-pass document-type self-correction, and folds the extracted
//! box values deterministically into a consolidated [`Form1040Data`]
//! aggregate.
//!
//! ```no_run
//! use taxintake::config::ServiceConfig;
//! use taxintake::models::enums::DocumentType;
//! use taxintake::models::form1040::Form1040Data;
//! use taxintake::pipeline::DocumentProcessor;
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), taxintake::pipeline::extraction::ExtractionError> {
//! let config = ServiceConfig::from_env()?;
//! let processor = DocumentProcessor::new(&config)?;
//! let bytes = std::fs::read("w2.pdf").unwrap();
//! let aggregate = processor.process(
//!     &Uuid::new_v4(),
//!     &bytes,
//!     DocumentType::W2,
//!     Form1040Data::default(),
//! )?;
//! println!("wages: {}", aggregate.wages);
//! # Ok(())
//! # }
//! ```
//!
//! [`Form1040Data`]: models::form1040::Form1040Data

pub mod config;
pub mod models;
pub mod pipeline;

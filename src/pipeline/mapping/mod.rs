//! Deterministic field-to-return mapping. Every mapper is a pure fold:
//! `map(record, aggregate) -> aggregate`, additive into line amounts,
//! precedence-guarded for identity. Callers folding several documents
//! into one aggregate must do so sequentially.

pub mod box12;
pub mod form1099;
pub mod identity;
pub mod w2;

pub use form1099::div::map_1099_div;
pub use form1099::int::map_1099_int;
pub use form1099::misc::map_1099_misc;
pub use form1099::nec::map_1099_nec;
pub use w2::map_w2;

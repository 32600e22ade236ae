pub mod enums;
pub mod form1040;
pub mod records;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field} value: '{value}'")]
    InvalidEnum { field: String, value: String },
}

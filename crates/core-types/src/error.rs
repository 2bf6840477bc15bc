use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid value for {field}: '{value}'")]
    InvalidParameter { field: &'static str, value: String },
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        CoreError::InvalidParameter {
            field,
            value: value.to_string(),
        }
    }
}

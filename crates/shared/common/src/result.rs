//! Result wrappers for expected failures.
//!
//! A wrapper is either a success carrying data or a failure carrying an
//! [`ErrorCode`] and a message, never both. Over the wire both serialize to
//! the same envelope:
//!
//! ```json
//! { "isSuccess": false, "errorMessage": "Report not found", "errorCode": 1 }
//! ```

use domain::ErrorCode;
use serde::{Deserialize, Serialize, Serializer};

/// Failure half of a result wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultError {
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl ResultError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: code,
            error_message: message.into(),
        }
    }
}

impl From<ErrorCode> for ResultError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }
}

/// Wire shape shared by both wrappers
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, D: ?Sized> {
    is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<i32>,
}

impl<'a, D: ?Sized> Envelope<'a, D> {
    fn failure(error: &'a ResultError) -> Self {
        Self {
            is_success: false,
            data: None,
            count: None,
            error_message: Some(&error.error_message),
            error_code: Some(error.error_code.code()),
        }
    }
}

// =============================================================================
// Single item
// =============================================================================

/// Outcome of an operation returning at most one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseResult<T> {
    Success(T),
    Failure(ResultError),
}

impl<T> BaseResult<T> {
    pub fn success(data: T) -> Self {
        BaseResult::Success(data)
    }

    /// Failure with the code's default message
    pub fn failure(code: ErrorCode) -> Self {
        BaseResult::Failure(ResultError::from(code))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BaseResult::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            BaseResult::Success(data) => Some(data),
            BaseResult::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            BaseResult::Success(data) => Some(data),
            BaseResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResultError> {
        match self {
            BaseResult::Success(_) => None,
            BaseResult::Failure(error) => Some(error),
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error().map(|e| e.error_code)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.error_message.as_str())
    }
}

impl<T> From<ResultError> for BaseResult<T> {
    fn from(error: ResultError) -> Self {
        BaseResult::Failure(error)
    }
}

impl<T: Serialize> Serialize for BaseResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BaseResult::Success(data) => Envelope {
                is_success: true,
                data: Some(data),
                count: None,
                error_message: None,
                error_code: None,
            }
            .serialize(serializer),
            BaseResult::Failure(error) => Envelope::<T>::failure(error).serialize(serializer),
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// Outcome of an operation returning a list of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionResult<T> {
    Success(Vec<T>),
    Failure(ResultError),
}

impl<T> CollectionResult<T> {
    pub fn success(data: Vec<T>) -> Self {
        CollectionResult::Success(data)
    }

    /// Failure with the code's default message
    pub fn failure(code: ErrorCode) -> Self {
        CollectionResult::Failure(ResultError::from(code))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CollectionResult::Success(_))
    }

    pub fn data(&self) -> Option<&[T]> {
        match self {
            CollectionResult::Success(data) => Some(data),
            CollectionResult::Failure(_) => None,
        }
    }

    /// Number of items carried; always zero for failures
    pub fn count(&self) -> usize {
        self.data().map_or(0, <[T]>::len)
    }

    pub fn error(&self) -> Option<&ResultError> {
        match self {
            CollectionResult::Success(_) => None,
            CollectionResult::Failure(error) => Some(error),
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error().map(|e| e.error_code)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.error_message.as_str())
    }
}

impl<T> From<ResultError> for CollectionResult<T> {
    fn from(error: ResultError) -> Self {
        CollectionResult::Failure(error)
    }
}

impl<T: Serialize> Serialize for CollectionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CollectionResult::Success(data) => Envelope {
                is_success: true,
                data: Some(data.as_slice()),
                count: Some(data.len()),
                error_message: None,
                error_code: None,
            }
            .serialize(serializer),
            CollectionResult::Failure(error) => {
                Envelope::<[T]>::failure(error).serialize(serializer)
            }
        }
    }
}

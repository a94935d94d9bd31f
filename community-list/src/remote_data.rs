/// Why a fetch failed, passed through untouched from the data service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    /// The response status, if the failure came from a response.
    pub status_code: Option<u16>,
    /// Human readable reason.
    pub message: String,
}

impl FetchError {
    /// Create a new [`FetchError`].
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

/// The state of an asynchronous fetch.
///
/// A holder of the latest [`RemoteData`] starts out [`RemoteData::Unloaded`], before anything has been requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RemoteData<T> {
    /// Nothing requested yet.
    #[default]
    Unloaded,
    /// A request is in flight.
    Loading,
    /// The request completed.
    Success(T),
    /// The request failed.
    Error(FetchError),
}

impl<T> RemoteData<T> {
    /// True while the request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteData::Loading)
    }

    /// True if the request completed with a payload.
    pub fn has_succeeded(&self) -> bool {
        matches!(self, RemoteData::Success(_))
    }

    /// True if the request failed.
    pub fn has_failed(&self) -> bool {
        matches!(self, RemoteData::Error(_))
    }

    /// The payload, if succeeded.
    pub fn payload(&self) -> Option<&T> {
        match self {
            RemoteData::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// The error, if failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            RemoteData::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Map the payload, keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteData<U> {
        match self {
            RemoteData::Unloaded => RemoteData::Unloaded,
            RemoteData::Loading => RemoteData::Loading,
            RemoteData::Success(payload) => RemoteData::Success(f(payload)),
            RemoteData::Error(error) => RemoteData::Error(error),
        }
    }
}

impl<T> From<Result<T, FetchError>> for RemoteData<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(payload) => RemoteData::Success(payload),
            Err(error) => RemoteData::Error(error),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_state_helpers() {
        let unloaded = RemoteData::<u32>::default();
        assert_eq!(unloaded, RemoteData::Unloaded);
        assert!(!unloaded.is_loading() && !unloaded.has_succeeded() && !unloaded.has_failed());

        let success = RemoteData::from(Ok::<_, FetchError>(3));
        assert!(success.has_succeeded());
        assert_eq!(success.payload(), Some(&3));
        assert_eq!(success.map(|v| v * 2).payload(), Some(&6));

        let failed = RemoteData::<u32>::from(Err(FetchError::new(Some(500), "boom")));
        assert!(failed.has_failed());
        assert_eq!(failed.error().map(|e| e.to_string()), Some("boom".to_string()));
        assert_eq!(failed.map(|v| v * 2).error().and_then(|e| e.status_code), Some(500));
    }
}

//! `{data, loading, error}` view state

use crate::{ClientError, ClientResult};

/// State of one query as a view sees it.
///
/// After a failed refetch `data` still holds the last successful value,
/// so a view can keep rendering it next to the error message.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Initial state while the first fetch runs
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    /// Failed fetch; `previous` is the last value that loaded
    pub fn failed(error: &ClientError, previous: Option<T>) -> Self {
        Self {
            data: previous,
            loading: false,
            error: Some(error.display_message()),
        }
    }

    pub fn from_result(result: ClientResult<T>, previous: Option<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failed(&e, previous),
        }
    }

    /// Mark a refetch in progress, keeping what is shown
    pub fn refetching(mut self) -> Self {
        self.loading = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.map(f),
            loading: self.loading,
            error: self.error,
        }
    }
}

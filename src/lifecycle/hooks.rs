//! Response and error hooks.
//!
//! Injected strategies for turning a raw response into the caller's data
//! type and a failure into the caller's error type. Both contracts are
//! fallible: a hook failure routes through the normal failure transition
//! instead of wedging the state machine.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::transport::RawResponse;

/// Async hook mapping a raw response to the caller's data type.
pub type ResponseHook<T> =
    Arc<dyn Fn(RawResponse) -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

/// Hook mapping an episode failure to the caller's error type.
pub type ErrorHook<E> = Arc<dyn Fn(FetchError) -> E + Send + Sync>;

/// Default response hook: parse the body as JSON.
pub fn json_response<T>() -> ResponseHook<T>
where
    T: DeserializeOwned + Send + 'static,
{
    Arc::new(|response: RawResponse| {
        Box::pin(async move {
            response
                .json::<T>()
                .map_err(|e| FetchError::Decode(e.to_string()))
        })
    })
}

/// Default error hook: pass the failure through unchanged.
pub fn identity_error() -> ErrorHook<FetchError> {
    Arc::new(|error| error)
}

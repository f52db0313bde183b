//! Operation guard.
//!
//! Every facade operation runs inside [`guard`] (or [`guard_sync`]), which
//! passes successes through unchanged and turns any failure into a
//! [`FacadeError`] attributed to the fully-qualified operation name.
//! [`guarded`] is the same thing as a combinator: it takes an operation and
//! returns a wrapped operation.

use crate::error::{classify, BoxError, FacadeError, FacadeResult};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use tracing::debug;

/// Fully-qualified name of a facade operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    module: &'static str,
    name: &'static str,
}

impl Operation {
    /// Create an operation name from a module path and a function name.
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self { module, name }
    }

    /// Module path, e.g. `aws_facade::services::dynamodb`.
    pub fn module(&self) -> &'static str {
        self.module
    }

    /// Function name, e.g. `scan`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last segment of the module path.
    pub fn service(&self) -> &'static str {
        self.module.rsplit("::").next().unwrap_or(self.module)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

/// Name an operation defined in the current module.
///
/// ```
/// let op = aws_facade::operation!("scan");
/// assert_eq!(op.name(), "scan");
/// ```
#[macro_export]
macro_rules! operation {
    ($name:literal) => {
        $crate::guard::Operation::new(module_path!(), $name)
    };
}

/// Run `future`, classifying any failure it returns.
pub async fn guard<T, E, Fut>(operation: Operation, future: Fut) -> FacadeResult<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    match future.await {
        Ok(value) => Ok(value),
        Err(error) => Err(reject(operation, error.into())),
    }
}

/// Run `f`, classifying any failure it returns.
pub fn guard_sync<T, E, F>(operation: Operation, f: F) -> FacadeResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    f().map_err(|error| reject(operation, error.into()))
}

/// Wrap `f` so every call goes through [`guard`].
///
/// ```
/// use aws_facade::guard::guarded;
/// use aws_facade::error::ProviderError;
///
/// # tokio_test_block_on(async {
/// let lookup = guarded(aws_facade::operation!("lookup"), |id: u32| async move {
///     if id == 0 {
///         Err(ProviderError::service("NotFound", "no such id"))
///     } else {
///         Ok(id * 2)
///     }
/// });
/// assert_eq!(lookup(21).await.unwrap(), 42);
/// assert!(lookup(0).await.is_err());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub fn guarded<A, T, E, F, Fut>(
    operation: Operation,
    f: F,
) -> impl Fn(A) -> BoxFuture<'static, FacadeResult<T>>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    move |args| guard(operation, f(args)).boxed()
}

fn reject(operation: Operation, error: BoxError) -> FacadeError {
    let error = classify(operation, error);
    debug!(
        operation = %operation,
        kind = %error.kind(),
        code = error.error_code().unwrap_or("-"),
        "Facade operation failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, NetworkError, ProviderError};

    #[test]
    fn test_operation_macro_uses_module_path() {
        let op = crate::operation!("scan");
        assert_eq!(op.module(), "aws_facade::guard::tests");
        assert_eq!(op.name(), "scan");
        assert_eq!(op.service(), "tests");
        assert_eq!(op.to_string(), "aws_facade::guard::tests::scan");
    }

    #[tokio::test]
    async fn test_guard_passes_success_through() {
        let result = guard(crate::operation!("ok"), async { Ok::<_, ProviderError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_guard_classifies_failure() {
        let op = crate::operation!("fail");
        let err = guard(op, async {
            Err::<(), _>(ProviderError::Network(NetworkError::ConnectionReset))
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.operation(), op);
    }

    #[test]
    fn test_guard_sync() {
        let err = guard_sync(crate::operation!("parse"), || "x".parse::<u32>()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.message().starts_with("An error occurred in aws_facade::guard::tests::parse"));
    }

    #[tokio::test]
    async fn test_guarded_wraps_each_call() {
        let wrapped = guarded(crate::operation!("double"), |n: i32| async move {
            if n < 0 {
                Err(ProviderError::service("ValidationException", "negative"))
            } else {
                Ok(n * 2)
            }
        });

        assert_eq!(wrapped(4).await.unwrap(), 8);
        let err = wrapped(-1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceFault);
        assert_eq!(err.operation().name(), "double");
    }
}

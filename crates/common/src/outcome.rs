//! Two-variant success/failure container.

/// The result of a fallible step.
///
/// Unlike `Option`, a failure keeps its error payload. Combinators only ever
/// evaluate the closure for the branch that is actually held; the other
/// closure is dropped without being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an Outcome may hold a failure that should be handled"]
pub enum Outcome<T, E> {
    /// The step produced a value.
    Success(T),
    /// The step failed with an error.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns true if this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns true if this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Returns the success value, discarding any error.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the error, discarding any success value.
    pub fn failure(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Borrows the payload of either variant.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the success value, leaving a failure untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the error, leaving a success untouched.
    pub fn map_failure<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Converts the error into a broader error type.
    pub fn widen<E2>(self) -> Outcome<T, E2>
    where
        E: Into<E2>,
    {
        self.map_failure(Into::into)
    }

    /// Runs the next fallible step on success and returns its outcome as is.
    ///
    /// A failure short-circuits: `f` is never called.
    pub fn chain<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Collapses both variants into a single value.
    pub fn fold<C, L, R>(self, on_failure: L, on_success: R) -> C
    where
        L: FnOnce(E) -> C,
        R: FnOnce(T) -> C,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(error) => on_failure(error),
        }
    }

    /// Extracts the success value, or the error built by `error_factory`.
    pub fn unwrap_or_fail<X, F>(self, error_factory: F) -> Result<T, X>
    where
        F: FnOnce() -> X,
    {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(_) => Err(error_factory()),
        }
    }

    /// Extracts the failure payload, or the error built by `error_factory`.
    pub fn unwrap_failure_or_fail<X, F>(self, error_factory: F) -> Result<E, X>
    where
        F: FnOnce() -> X,
    {
        match self {
            Outcome::Success(_) => Err(error_factory()),
            Outcome::Failure(error) => Ok(error),
        }
    }

    /// Calls `action` with the error when this is a failure, then hands the
    /// outcome back unchanged.
    pub fn on_failure<F>(self, action: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Outcome::Failure(error) = &self {
            action(error);
        }
        self
    }

    /// Converts into a standard library `Result`.
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}

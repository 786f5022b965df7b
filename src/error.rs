//! Failures reported by the main loop's external collaborators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The debug serial line rejected a byte
    Telemetry(E),
    /// A digital pin could not be read or driven
    Pin,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Telemetry(err)
    }
}

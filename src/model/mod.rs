pub mod linear_regression;

/// Anything that can turn years of experience into a salary estimate.
/// The server only depends on this, so tests can swap in a stub
pub trait Model: Send + Sync {
    fn predict(&self, experience: f64) -> f64;
}

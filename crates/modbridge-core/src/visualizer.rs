//! Visualization hook for missing elements.
//!
//! An external viewer may render a missing block (model + texture) while the
//! operator decides. The decision loop never depends on it: the result is
//! advisory and any error is logged and dropped.

use crate::errors::ExError;
use crate::model::MissingElement;

/// Show a missing element to the operator through some external viewer.
pub trait Visualizer {
    /// Render `missing`.
    ///
    /// Returns `Ok(true)` if something was displayed, `Ok(false)` if no viewer
    /// is available.
    ///
    /// # Errors
    ///
    /// Implementations report viewer failures as `ExErrorKind::ExternalService`.
    fn render(&self, missing: &MissingElement) -> Result<bool, ExError>;
}

/// Default visualizer: nothing is ever displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn render(&self, _missing: &MissingElement) -> Result<bool, ExError> {
        Ok(false)
    }
}

impl<V: Visualizer + ?Sized> Visualizer for &V {
    fn render(&self, missing: &MissingElement) -> Result<bool, ExError> {
        (**self).render(missing)
    }
}

use async_trait::async_trait;
use std::time::Duration;

use magpie_common::descriptor::Descriptor;
pub use magpie_common::error::SurfaceError;
use magpie_common::protocol::{ElementId, SelectBy, SelectOptionInfo, WaitState};

/// The UI surface capability the core consumes and does not implement.
///
/// A surface is a live page or document. The core borrows it for the
/// duration of one action and never owns it; each scenario holds its own
/// surface, so no cross-scenario locking is needed.
///
/// Implementations back these primitives with a real automation driver
/// (CDP, WebDriver, an embedded webview); tests use mocks.
#[async_trait]
pub trait Surface: Send {
    /// Resolve a descriptor to zero or more element handles.
    async fn locate(&mut self, descriptor: &Descriptor) -> Result<Vec<ElementId>, SurfaceError>;

    async fn click(&mut self, id: ElementId) -> Result<(), SurfaceError>;

    async fn fill(&mut self, id: ElementId, text: &str) -> Result<(), SurfaceError>;

    /// Option list of a select control. `NoMatch` for non-select elements.
    async fn options(&mut self, id: ElementId) -> Result<Vec<SelectOptionInfo>, SurfaceError>;

    /// Pick an option. `NoMatch` when the index is out of range or no
    /// option carries the requested value/label.
    async fn select(&mut self, id: ElementId, by: &SelectBy) -> Result<(), SurfaceError>;

    /// Wait until the descriptor reaches the given state, or `Timeout`.
    ///
    /// This is the cancellation-propagating wait primitive: aborting the
    /// hosting scenario cancels the suspended wait.
    async fn wait_for(
        &mut self,
        descriptor: &Descriptor,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), SurfaceError>;

    /// Number of elements currently matching the descriptor.
    async fn count(&mut self, descriptor: &Descriptor) -> Result<usize, SurfaceError>;

    async fn press_key(&mut self, _key: &str) -> Result<(), SurfaceError> {
        Err(SurfaceError::NotSupported("press_key".into()))
    }

    /// Navigate to a path relative to the suite's base URL.
    async fn navigate(&mut self, path: &str) -> Result<(), SurfaceError>;

    async fn current_path(&mut self) -> Result<String, SurfaceError> {
        Err(SurfaceError::NotSupported("current_path".into()))
    }
}

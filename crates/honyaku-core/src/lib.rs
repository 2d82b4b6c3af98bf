pub mod engine;
pub mod error;
pub mod font;
pub mod history;
pub mod language;
pub mod oneshot;
pub mod overlay;
pub mod positions;
pub mod presenter;
pub mod selection;
pub mod sink;
pub mod watch;

#[cfg(test)]
mod tests;

pub use engine::{CaptureSource, Frame, OcrEngine};
pub use error::{CaptureError, OcrError, StoreError, SurfaceError, WatchError};
pub use history::HistoryBuffer;
pub use overlay::{OverlayGeometry, OverlayRenderer, OverlaySurface};
pub use positions::PositionStore;
pub use presenter::{Presenter, PresenterConfig, Reaction};
pub use selection::{RegionSelector, SelectionSurface, SelectorPhase};
pub use sink::UiSink;
pub use watch::{WatchController, WatchServices, WatchSettings};

//! Headless testing framework: Pilot, recorders, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Ui`](crate::ui::Ui) without a native
//! window. The recorders stand in for the host, the notification target and
//! the drawing surface. Use [`paint_to_string`] and [`layout_to_string`] to
//! capture output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod recorder;
pub mod snapshot;

pub use pilot::Pilot;
pub use recorder::{DrawOp, RecordingHost, RecordingSurface, RecordingTarget, TargetEvent};
pub use snapshot::{layout_to_string, paint_to_string};

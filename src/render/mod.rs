//! Rendering collaborator.
//!
//! The ingestion loop never draws anything itself. It publishes
//! [`RenderFrame`]s into a single-slot, latest-wins channel; a dedicated
//! render thread drains that slot into a [`RenderSink`].
//!
//! ```text
//! IngestionLoop ──publish──▶ [ FrameSlot (1) ] ──recv──▶ RenderThread ──▶ RenderSink
//!                 (evicts the unrendered frame)
//! ```
//!
//! # Contents
//!
//! - [`frame`]: [`RenderFrame`], snapshot + camera framing
//! - [`slot`]: [`FramePublisher`] / [`FrameReceiver`], latest-wins channel
//! - [`sink`]: [`RenderSink`] trait and [`LogRenderSink`]
//! - [`svg_sink`]: [`SvgRenderSink`], writes the map as an SVG image
//! - [`thread`]: [`RenderThread`], owns the sink for its lifetime

pub mod frame;
pub mod sink;
pub mod slot;
pub mod svg_sink;
pub mod thread;

pub use frame::RenderFrame;
pub use sink::{LogRenderSink, RenderSink};
pub use slot::{FramePublisher, FrameReceiver, frame_slot};
pub use svg_sink::{SvgRenderSink, SvgSettings};
pub use thread::{RenderStats, RenderThread};

//! SVG render sink.
//!
//! Draws the map as a plan view (x right, y up) scaled to fit the frame's
//! bounding box. Front/up camera vectors only matter to 3D viewers; they are
//! written into the document as data attributes so downstream tools can
//! reproduce the framing.
//!
//! Each frame is written to a sibling temporary file and renamed over the
//! output, so anything watching the image never reads half a document.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::{Circle, Group, Rectangle, Text};

use super::frame::RenderFrame;
use super::sink::RenderSink;
use crate::error::RenderError;
use crate::mapping::{BoundingBox, CameraFraming};

/// Extents below this are drawn as if they were one unit wide.
const MIN_EXTENT: f32 = 1e-6;

/// SVG output appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgSettings {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Point fill color.
    pub point_color: String,
    /// Point radius in pixels.
    pub point_radius: f32,
    /// Caption drawn in the top-left corner.
    pub title: String,
    /// Blank border in pixels.
    pub margin: f32,
}

impl Default for SvgSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_color: "#FF0000".to_string(),
            point_radius: 1.5,
            title: "LiDAR Point Cloud".to_string(),
            margin: 20.0,
        }
    }
}

/// Writes each frame to an SVG file.
#[derive(Debug)]
pub struct SvgRenderSink {
    path: PathBuf,
    staging: PathBuf,
    settings: SvgSettings,
    frames: u64,
}

impl SvgRenderSink {
    /// Acquire the output file and draw an empty canvas into it.
    ///
    /// Failing here means the map can never be shown, so callers treat it
    /// as fatal.
    pub fn create(path: impl AsRef<Path>, settings: SvgSettings) -> Result<Self, RenderError> {
        let path = path.as_ref().to_path_buf();
        let staging = staging_path(&path);

        let mut file = File::create(&path).map_err(|source| RenderError::Surface {
            path: path.clone(),
            source,
        })?;
        let blank = base_document(&settings).add(caption(&settings, "waiting for scans"));
        svg::write(&mut file, &blank).map_err(|source| RenderError::Surface {
            path: path.clone(),
            source,
        })?;

        log::info!("SVG render surface: {}", path.display());
        Ok(Self {
            path,
            staging,
            settings,
            frames: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Build the SVG document for a frame.
    pub fn document(&self, frame: &RenderFrame) -> Document {
        let settings = &self.settings;
        let mut doc = base_document(settings).set("data-sequence", frame.sequence);

        let Some(framing) = frame.framing else {
            return doc.add(caption(settings, "empty map"));
        };

        doc = doc
            .set(
                "data-look-at",
                format!("{} {} {}", framing.look_at.x, framing.look_at.y, framing.look_at.z),
            )
            .set("data-zoom", framing.zoom)
            .set("data-front", vector_attr(framing.front))
            .set("data-up", vector_attr(framing.up));

        let projection = Projection::fit(&framing, settings);
        let mut points = Group::new()
            .set("id", "points")
            .set("fill", settings.point_color.as_str());
        for p in frame.snapshot.iter() {
            let (sx, sy) = projection.apply(p.x, p.y);
            points = points.add(
                Circle::new()
                    .set("cx", sx)
                    .set("cy", sy)
                    .set("r", settings.point_radius),
            );
        }

        let (rx, ry) = projection.apply(frame.translation.x, frame.translation.y);
        let robot = Circle::new()
            .set("id", "translation")
            .set("cx", rx)
            .set("cy", ry)
            .set("r", settings.point_radius * 3.0)
            .set("fill", "none")
            .set("stroke", "#0072B2")
            .set("stroke-width", 1.5);

        let label = format!(
            "{} | frame {} | {} points",
            settings.title,
            frame.sequence,
            frame.point_count()
        );
        doc.add(points).add(robot).add(caption(settings, &label))
    }
}

impl RenderSink for SvgRenderSink {
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
        let doc = self.document(frame);
        svg::save(&self.staging, &doc)?;
        fs::rename(&self.staging, &self.path)?;
        self.frames += 1;
        log::debug!(
            "Wrote frame {} ({} points) to {}",
            frame.sequence,
            frame.point_count(),
            self.path.display()
        );
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        match fs::remove_file(&self.staging) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "svg"
    }
}

/// World → pixel mapping that fits a bounding box inside the margins.
struct Projection {
    bounds: BoundingBox,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    height: f32,
}

impl Projection {
    fn fit(framing: &CameraFraming, settings: &SvgSettings) -> Self {
        let bounds = framing.bounds;
        let [ext_x, ext_y, _] = bounds.extent();
        let usable_w = (settings.width as f32 - 2.0 * settings.margin).max(1.0);
        let usable_h = (settings.height as f32 - 2.0 * settings.margin).max(1.0);
        let scale = (usable_w / ext_x.max(MIN_EXTENT)).min(usable_h / ext_y.max(MIN_EXTENT));
        let scale = if ext_x.max(ext_y) <= MIN_EXTENT {
            1.0
        } else {
            scale
        };

        // Center the drawing inside the usable area
        let offset_x = settings.margin + (usable_w - ext_x * scale) * 0.5;
        let offset_y = settings.margin + (usable_h - ext_y * scale) * 0.5;

        Self {
            bounds,
            scale,
            offset_x,
            offset_y,
            height: settings.height as f32,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let sx = self.offset_x + (x - self.bounds.min.x) * self.scale;
        let sy = self.height - (self.offset_y + (y - self.bounds.min.y) * self.scale);
        (sx, sy)
    }
}

fn base_document(settings: &SvgSettings) -> Document {
    Document::new()
        .set("width", settings.width)
        .set("height", settings.height)
        .set("viewBox", (0, 0, settings.width, settings.height))
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", settings.width)
                .set("height", settings.height)
                .set("fill", "white"),
        )
}

fn caption(settings: &SvgSettings, text: &str) -> Text {
    Text::new(text)
        .set("x", settings.margin)
        .set("y", settings.margin)
        .set("font-family", "monospace")
        .set("font-size", 12)
        .set("fill", "#333333")
}

fn vector_attr(v: [f32; 3]) -> String {
    format!("{} {} {}", v[0], v[1], v[2])
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "map.svg".into());
    name.push(".tmp");
    path.with_file_name(name)
}

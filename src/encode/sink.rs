use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::render::raster::Raster;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub frame_count: u64,
}

/// Consumer of finished frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CrossPlotResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> CrossPlotResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CrossPlotResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Raster)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, Raster)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CrossPlotResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> CrossPlotResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CrossPlotResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `<dir>/NNNN.png`, numbered from `0001`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}.png", idx.file_stem()))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> CrossPlotResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CrossPlotError::io(&self.dir, e))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Raster) -> CrossPlotResult<()> {
        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CrossPlotResult<()> {
        Ok(())
    }
}

/// Encode one raster as a straight-alpha RGBA8 PNG.
pub fn write_png(path: &Path, frame: &Raster) -> CrossPlotResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => CrossPlotError::io(path, io),
        other => CrossPlotError::Other(
            anyhow::Error::new(other).context(format!("encode png '{}'", path.display())),
        ),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;

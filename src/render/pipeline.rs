use rayon::prelude::*;

use crate::config::CrossPlotConfig;
use crate::data::dataset::RawDataset;
use crate::data::jitter::JitterTable;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::render::compositor::{ComposedFrame, FrameCompositor};

/// Lifecycle of an [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Done,
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_rendered: u64,
    pub frames_written: u64,
}

/// Drives one full animation: normalize once, then compose and emit every frame in order.
///
/// A driver runs once. After a failure it stays in [`DriverState::Running`].
#[derive(Debug)]
pub struct AnimationDriver {
    config: CrossPlotConfig,
    threading: RenderThreading,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(config: CrossPlotConfig) -> CrossPlotResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            threading: RenderThreading::default(),
            state: DriverState::Idle,
        })
    }

    pub fn with_threading(mut self, threading: RenderThreading) -> Self {
        self.threading = threading;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &CrossPlotConfig {
        &self.config
    }

    pub fn threading(&self) -> &RenderThreading {
        &self.threading
    }

    /// Render all frames into `sink`.
    pub fn run(
        &mut self,
        raw: RawDataset,
        sink: &mut dyn FrameSink,
    ) -> CrossPlotResult<RenderStats> {
        if self.state != DriverState::Idle {
            return Err(CrossPlotError::validation(format!(
                "animation driver already started (state {:?})",
                self.state
            )));
        }
        raw.check_position(self.config.position)?;
        let pool = if self.threading.parallel {
            Some(build_thread_pool(self.threading.threads)?)
        } else {
            None
        };

        self.state = DriverState::Running;
        let frame_count = u64::from(self.config.frame_count);
        tracing::info!(
            frames = frame_count,
            parallel = self.threading.parallel,
            "starting animation"
        );

        let data = raw.normalize(self.config.columns, self.config.scale)?;
        let table = JitterTable::generate(
            &self.config.seed,
            frame_count,
            self.config.layers,
            self.config.jitter_step,
        )?;
        let compositor = FrameCompositor::new(&self.config, &data);

        sink.begin(SinkConfig {
            width: self.config.frame_size.width,
            height: self.config.frame_size.height,
            frame_count,
        })?;

        let mut stats = RenderStats::default();
        match &pool {
            None => {
                for f in 0..frame_count {
                    let tau = FrameIndex(f);
                    let frame = compositor.compose(tau, table.row(tau)?)?;
                    stats.frames_rendered += 1;
                    sink.push_frame(tau, &frame.raster)?;
                    stats.frames_written += 1;
                }
            }
            Some(pool) => {
                let chunk_size = normalized_chunk_size(self.threading.chunk_size);
                let mut chunk_start = 0u64;
                while chunk_start < frame_count {
                    let chunk_end = (chunk_start + chunk_size).min(frame_count);
                    let indices: Vec<FrameIndex> =
                        (chunk_start..chunk_end).map(FrameIndex).collect();
                    let frames = pool.install(|| {
                        indices
                            .par_iter()
                            .map(|&tau| compositor.compose(tau, table.row(tau)?))
                            .collect::<CrossPlotResult<Vec<ComposedFrame>>>()
                    })?;
                    stats.frames_rendered += frames.len() as u64;
                    for (&tau, frame) in indices.iter().zip(&frames) {
                        sink.push_frame(tau, &frame.raster)?;
                        stats.frames_written += 1;
                    }
                    tracing::debug!(start = chunk_start, end = chunk_end, "chunk written");
                    chunk_start = chunk_end;
                }
            }
        }

        sink.end()?;
        self.state = DriverState::Done;
        tracing::info!(
            rendered = stats.frames_rendered,
            written = stats.frames_written,
            "animation done"
        );
        Ok(stats)
    }
}

/// Render frame `tau` alone. Jitter draws of frames `0..tau` are replayed and discarded so the
/// result matches frame `tau` of a full run.
pub fn render_single_frame(
    config: &CrossPlotConfig,
    raw: RawDataset,
    tau: FrameIndex,
) -> CrossPlotResult<ComposedFrame> {
    config.validate()?;
    raw.check_position(config.position)?;
    if tau.0 >= u64::from(config.frame_count) {
        return Err(CrossPlotError::validation(format!(
            "frame {} is outside the animation ({} frames)",
            tau.0, config.frame_count
        )));
    }

    let data = raw.normalize(config.columns, config.scale)?;
    let jitter = JitterTable::replay_row(&config.seed, tau, config.layers, config.jitter_step);
    FrameCompositor::new(config, &data).compose(tau, &jitter)
}

fn build_thread_pool(threads: Option<usize>) -> CrossPlotResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CrossPlotError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CrossPlotError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

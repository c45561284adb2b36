//! Step recording and GIF generation for step-by-step visualization

use crate::io::configuration::{MAX_CAPTURED_FRAMES, Palette, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{ImageAction, IoContext, MazeError, Result, image_error};
use crate::io::image::{ensure_parent_dir, render_snapshot};
use crate::maze::cell::Direction;
use crate::maze::generator::MazeGenerator;
use crate::maze::snapshot::{CellSnapshot, Snapshot, StepObserver};
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

/// The finished maze stays on screen this many frame delays
const FINAL_FRAME_HOLD: u32 = 25;

/// One productive step as seen between two observations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Steps taken once this step completed
    pub step: usize,
    /// Cell the traversal left
    pub from: [usize; 2],
    /// Cell the traversal moved to
    pub to: [usize; 2],
    /// Whether the move carved a passage rather than backtracking
    pub carved: bool,
}

#[derive(Clone, Copy)]
struct Observed {
    position: [usize; 2],
    depth: usize,
    step: usize,
}

/// Records a maze run and turns it into an animation
///
/// Only the starting state and one small [`StepRecord`] per step are kept.
/// Frames are rebuilt by replaying the records when exporting, and only
/// every `stride`-th step is rendered.
pub struct FrameCapture {
    initial: Option<Snapshot>,
    records: Vec<StepRecord>,
    previous: Option<Observed>,
    stride: usize,
    delay_ms: u32,
    cell_pixels: u32,
    palette: Palette,
}

impl FrameCapture {
    /// Create a capture sized for a maze over `in_mask_cells` cells
    ///
    /// The stride combines the frame budget (`MAX_CAPTURED_FRAMES` for a
    /// connected run of `2 * in_mask_cells - 2` steps) with the frames a
    /// short `frame_delay_ms` drops to respect `VIEWER_MIN_FRAME_DELAY_MS`.
    pub fn new(
        in_mask_cells: usize,
        cell_pixels: u32,
        palette: Palette,
        frame_delay_ms: u32,
    ) -> Self {
        let expected_steps = (2 * in_mask_cells).saturating_sub(1).max(1);
        let budget_stride = expected_steps.div_ceil(MAX_CAPTURED_FRAMES).max(1);
        let (delay_ms, skip) = playback_timing(frame_delay_ms);

        Self {
            initial: None,
            records: Vec::with_capacity(expected_steps),
            previous: None,
            stride: budget_stride.saturating_mul(skip),
            delay_ms,
            cell_pixels,
            palette,
        }
    }

    /// Steps between rendered frames
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Delay written for each frame, in milliseconds
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Steps recorded so far
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Number of frames the animation will show, excluding the final hold
    pub fn frame_count(&self) -> usize {
        if self.initial.is_none() {
            return 0;
        }
        let total = self.records.len();
        let tail = usize::from(total % self.stride != 0);
        1 + total / self.stride + tail
    }

    /// Replayed states for every frame, starting state first and final state last
    pub fn snapshots(&self) -> impl Iterator<Item = Snapshot> + '_ {
        let stride = self.stride;
        let total = self.records.len();

        self.initial.iter().flat_map(move |initial| {
            let mut replay = Replay::new(initial.clone());
            let first = replay.state.clone();
            let rest = self
                .records
                .iter()
                .enumerate()
                .filter_map(move |(index, record)| {
                    replay.apply(record);
                    let applied = index + 1;
                    (applied % stride == 0 || applied == total).then(|| replay.state.clone())
                });
            std::iter::once(first).chain(rest)
        })
    }

    /// Rendered frames, produced one at a time
    pub fn frames(&self) -> impl Iterator<Item = RgbaImage> + '_ {
        self.snapshots()
            .map(|snapshot| render_snapshot(&snapshot, self.cell_pixels, &self.palette))
    }

    /// Render the recorded run and write it as a GIF
    ///
    /// Frames are encoded as they are rendered. The final frame is repeated
    /// and shown `FINAL_FRAME_HOLD` times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing was recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path) -> Result<()> {
        let nothing = MazeError::NothingToRender {
            what: "no frames captured for the animation",
        };
        if self.initial.is_none() {
            return Err(nothing);
        }

        let delay = Delay::from_numer_denom_ms(self.delay_ms, 1);
        let hold = Delay::from_numer_denom_ms(self.delay_ms.saturating_mul(FINAL_FRAME_HOLD), 1);

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).io_context("create file", output_path)?;
        let mut encoder = GifEncoder::new(file);
        let mut encode = |img: RgbaImage, shown_for: Delay| {
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, shown_for))
                .map_err(|e| image_error(ImageAction::Save, output_path, e))
        };

        let mut pending: Option<RgbaImage> = None;
        for img in self.frames() {
            if let Some(done) = pending.replace(img) {
                encode(done, delay)?;
            }
        }

        let Some(last) = pending else {
            return Err(nothing);
        };
        encode(last.clone(), delay)?;
        encode(last, hold)
    }
}

// Delay actually written and how many steps each written frame spans
fn playback_timing(frame_delay_ms: u32) -> (u32, usize) {
    let requested = frame_delay_ms.max(1);
    if requested >= VIEWER_MIN_FRAME_DELAY_MS {
        (requested, 1)
    } else {
        (
            VIEWER_MIN_FRAME_DELAY_MS,
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(requested) as usize,
        )
    }
}

// Snapshot being rebuilt from step records
struct Replay {
    state: Snapshot,
    index: HashMap<[usize; 2], usize>,
}

impl Replay {
    fn new(state: Snapshot) -> Self {
        let index = state
            .cells
            .iter()
            .enumerate()
            .map(|(slot, cell)| (cell.position, slot))
            .collect();
        Self { state, index }
    }

    fn apply(&mut self, record: &StepRecord) {
        self.mark_visited(record.from);
        if record.carved {
            self.mark_visited(record.to);
            if let Some(direction) = Direction::between(record.from, record.to) {
                self.clear_wall(record.from, direction);
                self.clear_wall(record.to, direction.opposite());
            }
        }
        self.state.current = record.to;
        self.state.step = record.step;
    }

    fn mark_visited(&mut self, position: [usize; 2]) {
        if let Some(cell) = self.cell_mut(position) {
            cell.visited = true;
        }
    }

    fn clear_wall(&mut self, position: [usize; 2], direction: Direction) {
        if let Some(wall) = self
            .cell_mut(position)
            .and_then(|cell| cell.walls.get_mut(direction.index()))
        {
            *wall = false;
        }
    }

    fn cell_mut(&mut self, position: [usize; 2]) -> Option<&mut CellSnapshot> {
        let slot = *self.index.get(&position)?;
        self.state.cells.get_mut(slot)
    }
}

impl StepObserver for FrameCapture {
    fn observe(&mut self, generator: &MazeGenerator) {
        let now = Observed {
            position: generator.current(),
            depth: generator.stack_depth(),
            step: generator.steps_taken(),
        };

        let Some(previous) = self.previous.replace(now) else {
            self.initial = Some(generator.snapshot());
            return;
        };

        // A run with no productive step still visits its start on termination
        let settled_without_steps = generator.is_terminal() && self.records.is_empty();
        if now.step > previous.step || settled_without_steps {
            self.records.push(StepRecord {
                step: now.step,
                from: previous.position,
                to: now.position,
                carved: now.depth > previous.depth,
            });
        }
    }
}

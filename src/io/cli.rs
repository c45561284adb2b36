//! Command-line interface for generating masked mazes from PNG masks

use crate::analysis::topology::MazeTopology;
use crate::io::configuration::{
    DEFAULT_AREA_SIZE, DEFAULT_CELL_LENGTH, DEFAULT_PALETTE, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
    MazeConfig, OUTPUT_SUFFIX,
};
use crate::io::error::{IoContext, Result, invalid_parameter};
use crate::io::image::export_maze_png;
use crate::io::mask_image::{MaskImage, parse_hex_color};
use crate::io::progress::ProgressManager;
use crate::io::visualization::FrameCapture;
use crate::maze::generator::MazeGenerator;
use crate::maze::snapshot::StepObserver;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File stem used for outputs when no mask image is given
const UNCONSTRAINED_STEM: &str = "unconstrained";

#[derive(Parser)]
#[command(name = "maskmaze")]
#[command(
    author,
    version,
    about = "Generate perfect mazes inside image masks with depth-first backtracking"
)]
/// Command-line arguments for the maze generation tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Mask PNG file or directory of mask PNGs (omit for an unconstrained maze)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Cell edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_CELL_LENGTH)]
    pub cell_length: usize,

    /// Area width in pixels for an unconstrained maze
    #[arg(short = 'w', long, default_value_t = DEFAULT_AREA_SIZE)]
    pub width: usize,

    /// Area height in pixels for an unconstrained maze
    #[arg(short = 'H', long, default_value_t = DEFAULT_AREA_SIZE)]
    pub height: usize,

    /// Start column, overriding the mask's first cell
    #[arg(long, requires = "start_row")]
    pub start_col: Option<usize>,

    /// Start row, overriding the mask's first cell
    #[arg(long, requires = "start_col")]
    pub start_row: Option<usize>,

    /// Mask colour as RRGGBB; repeat to accept several colours
    #[arg(short, long = "mask-color", value_parser = parse_hex_color, default_value = "000000")]
    pub mask_colors: Vec<[u8; 3]>,

    /// Enable step-by-step visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(long, default_value_t = GIF_FRAME_DELAY_MS)]
    pub frame_delay: u32,

    /// Reject masks with cells unreachable from the start
    #[arg(short, long)]
    pub require_connected: bool,

    /// Write an image of the sampled mask cell centres
    #[arg(short = 'p', long)]
    pub mask_preview: bool,

    /// Directory for outputs (defaults to beside each mask)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process mask files even if their maze output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Explicit start cell, when both coordinates were given
    pub const fn start(&self) -> Option<[usize; 2]> {
        match (self.start_col, self.start_row) {
            (Some(i), Some(j)) => Some([i, j]),
            _ => None,
        }
    }

    /// Generation parameters for an area of the given size
    pub const fn maze_config(&self, area_width: usize, area_height: usize) -> MazeConfig {
        MazeConfig {
            area_width,
            area_height,
            cell_length: self.cell_length,
            start: self.start(),
            seed: self.seed,
            require_connected: self.require_connected,
        }
    }
}

/// One maze to generate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeJob {
    /// Full rectangle of `--width` x `--height`
    Unconstrained,
    /// Mask read from this image
    MaskFile(PathBuf),
}

impl MazeJob {
    fn stem(&self) -> String {
        match self {
            Self::Unconstrained => UNCONSTRAINED_STEM.to_string(),
            Self::MaskFile(path) => path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        }
    }

    fn directory(&self) -> Option<&Path> {
        match self {
            Self::Unconstrained => None,
            Self::MaskFile(path) => path.parent(),
        }
    }
}

// Forwards each step to the frame capture and the progress display
struct RunObserver<'a> {
    index: usize,
    capture: Option<&'a mut FrameCapture>,
    progress: Option<&'a mut ProgressManager>,
}

impl StepObserver for RunObserver<'_> {
    fn observe(&mut self, generator: &MazeGenerator) {
        if let Some(capture) = self.capture.as_deref_mut() {
            capture.observe(generator);
        }
        if let Some(progress) = self.progress.as_deref_mut() {
            progress.update_step(self.index, generator.steps_taken());
        }
    }
}

/// Orchestrates batch generation over mask files with progress tracking
pub struct MazeRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MazeRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate every maze the CLI arguments describe
    ///
    /// # Errors
    ///
    /// Returns an error if target validation fails, a configuration is
    /// invalid, or an output cannot be written. Processing stops at the
    /// first failing mask.
    pub fn process(&mut self) -> Result<()> {
        let jobs = self.collect_jobs()?;

        if jobs.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        for (index, job) in jobs.iter().enumerate() {
            self.process_job(job, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve the target into the list of mazes to generate
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a directory,
    /// or the directory cannot be read
    pub fn collect_jobs(&self) -> Result<Vec<MazeJob>> {
        // Flags alone describe an unconstrained maze, so its output is always rewritten
        let Some(target) = &self.cli.target else {
            return Ok(vec![MazeJob::Unconstrained]);
        };

        if target.is_file() {
            if target.extension().and_then(|s| s.to_str()) != Some("png") {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a PNG mask image",
                ));
            }
            let job = MazeJob::MaskFile(target.clone());
            Ok(if self.should_process(&job) {
                vec![job]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut jobs = Vec::new();
            for entry in std::fs::read_dir(target).io_context("read directory", target)? {
                let path = entry.io_context("read directory", target)?.path();
                if path.extension().and_then(|s| s.to_str()) != Some("png") {
                    continue;
                }
                let job = MazeJob::MaskFile(path);
                if self.should_process(&job) {
                    jobs.push(job);
                }
            }
            jobs.sort_by(|a, b| a.stem().cmp(&b.stem()));
            Ok(jobs)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG mask image or a directory",
            ))
        }
    }

    fn should_process(&self, job: &MazeJob) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(job, &format!("{OUTPUT_SUFFIX}.png"));
        if output_path.exists() {
            info!("Skipping {} (output exists)", output_path.display());
            false
        } else {
            true
        }
    }

    fn process_job(&mut self, job: &MazeJob, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let mask_image = match job {
            MazeJob::Unconstrained => None,
            MazeJob::MaskFile(path) => Some(MaskImage::from_png(
                path,
                self.cli.cell_length,
                &self.cli.mask_colors,
            )?),
        };

        let config = match &mask_image {
            Some(mask_image) => self
                .cli
                .maze_config(mask_image.area_width, mask_image.area_height),
            None => self.cli.maze_config(self.cli.width, self.cli.height),
        };

        let mut generator =
            MazeGenerator::from_config(&config, mask_image.as_ref().map(|m| &m.mask))?;

        let reachable = generator.grid().in_mask_count() - generator.unreachable_count();
        let expected_steps = (2 * reachable).saturating_sub(2);
        let cell_pixels = self.cli.cell_length as u32;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_run(index, &job.stem(), expected_steps);
        }

        let mut capture = self
            .cli
            .visualize
            .then(|| {
                FrameCapture::new(reachable, cell_pixels, DEFAULT_PALETTE, self.cli.frame_delay)
            });

        let mut observer = RunObserver {
            index,
            capture: capture.as_mut(),
            progress: self.progress_manager.as_mut(),
        };
        generator.generate_observed(&mut observer);

        let topology = MazeTopology::analyze(generator.grid());
        info!("{}: {topology}", job.stem());
        if generator.unreachable_count() == 0 && !topology.is_perfect() {
            warn!("{}: generated maze is not a spanning tree", job.stem());
        }

        export_maze_png(
            &generator.snapshot(),
            cell_pixels,
            &DEFAULT_PALETTE,
            &self.output_path(job, &format!("{OUTPUT_SUFFIX}.png")),
        )?;

        if let Some(capture) = &capture {
            capture.export_gif(&self.output_path(job, "_visualization.gif"))?;
        }

        if self.cli.mask_preview {
            if let Some(mask_image) = &mask_image {
                mask_image.export_sample_preview(&self.output_path(job, "_mask_preview.png"))?;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_run(index, start_time.elapsed());
        }

        Ok(())
    }

    /// Output location for `job` with the given file name suffix
    pub fn output_path(&self, job: &MazeJob, suffix: &str) -> PathBuf {
        let file_name = format!("{}{suffix}", job.stem());

        match (&self.cli.output, job.directory()) {
            (Some(dir), _) => dir.join(file_name),
            (None, Some(parent)) => parent.join(file_name),
            (None, None) => PathBuf::from(file_name),
        }
    }
}

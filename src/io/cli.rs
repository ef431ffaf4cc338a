//! Command-line interface and sampling driver
//!
//! The driver wires the full exact path together: weight construction,
//! square-move rescaling, probability extraction, order-by-order growth and
//! optional heat-bath sweeps, ending in a PNG render of the sampled tiling.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::algorithm::glauber::GlauberRefiner;
use crate::algorithm::probability::extract;
use crate::algorithm::recursion::rescale;
use crate::algorithm::shuffle::ShuffleGenerator;
use crate::analysis::census::OrientationCensus;
use crate::io::configuration::{DEFAULT_ORDER, DEFAULT_OUTPUT, DEFAULT_SWEEPS};
use crate::io::error::Result;
use crate::io::image::export_tiling_as_png;
use crate::io::progress::ProgressManager;
use crate::spatial::weights::WeightMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Weight matrix construction policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WeightPattern {
    /// All weights equal; the uniform measure on tilings
    Uniform,
    /// Two-by-two periodic weights alternating between `a` and `b`
    TwoPeriodic,
    /// Independent two-value Bernoulli weights drawn per cell
    Bernoulli,
}

#[derive(Parser)]
#[command(name = "dominoshuffle")]
#[command(
    author,
    version,
    about = "Sample random domino tilings of the Aztec diamond"
)]
/// Command-line arguments for the sampling tool
pub struct Cli {
    /// Diamond order N (the weight matrix is 2N x 2N)
    #[arg(value_name = "ORDER", default_value_t = DEFAULT_ORDER)]
    pub order: usize,

    /// Random seed; drawn from the operating system when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Weight matrix construction policy
    #[arg(short, long, value_enum, default_value = "uniform")]
    pub weights: WeightPattern,

    /// First weight parameter (two-periodic `a`, Bernoulli low value)
    #[arg(short = 'a', long, default_value_t = 1.0)]
    pub weight_a: f64,

    /// Second weight parameter (two-periodic `b`, Bernoulli high value)
    #[arg(short = 'b', long, default_value_t = 1.0)]
    pub weight_b: f64,

    /// Bernoulli probability of drawing the low value
    #[arg(short, long, default_value_t = 0.5)]
    pub probability: f64,

    /// Heat-bath sweeps to run after exact generation
    #[arg(long, default_value_t = DEFAULT_SWEEPS)]
    pub sweeps: u64,

    /// Output path for the rendered PNG
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates one sampling run with progress tracking
pub struct SampleRunner {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl SampleRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Run the sampling pipeline end to end
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation fails or the rendered
    /// tiling cannot be written.
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        let seed = self.cli.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let weights = match self.cli.weights {
            WeightPattern::Uniform => WeightMatrix::uniform(self.cli.order)?,
            WeightPattern::TwoPeriodic => {
                WeightMatrix::two_periodic(self.cli.order, self.cli.weight_a, self.cli.weight_b)?
            }
            WeightPattern::Bernoulli => WeightMatrix::bernoulli(
                self.cli.order,
                self.cli.weight_a,
                self.cli.weight_b,
                self.cli.probability,
                &mut rng,
            )?,
        };

        let stack = rescale(&weights);
        if stack.degenerate_denominators() > 0 && !self.cli.quiet {
            eprintln!(
                "Warning: {} denominator(s) clamped during rescaling; \
                 the weight matrix is near a singular configuration",
                stack.degenerate_denominators()
            );
        }
        let tables = extract(&stack);
        drop(stack);

        let mut generator = ShuffleGenerator::new(&tables, &mut rng)?;
        if let Some(progress) = &mut self.progress {
            progress.start_phase("growing", (generator.target_order() - 1) as u64);
        }
        while generator.advance(&mut rng) {
            if let Some(progress) = &self.progress {
                progress.tick();
            }
        }
        if let Some(progress) = &mut self.progress {
            progress.finish_phase();
        }

        if generator.fallback_draws() > 0 && !self.cli.quiet {
            eprintln!(
                "Warning: {} creation draw(s) used the uniform fallback",
                generator.fallback_draws()
            );
        }
        let mut tiling = generator.into_tiling();

        let mut flips = 0;
        if self.cli.sweeps > 0 {
            let refiner = GlauberRefiner::new(&weights);
            if let Some(progress) = &mut self.progress {
                progress.start_phase("refining", self.cli.sweeps);
            }
            for _ in 0..self.cli.sweeps {
                flips += refiner.sweep(&mut tiling, &mut rng)?;
                if let Some(progress) = &self.progress {
                    progress.tick();
                }
            }
            if let Some(progress) = &mut self.progress {
                progress.finish_phase();
            }
        }

        if !self.cli.quiet {
            let census = OrientationCensus::of(&tiling);
            eprintln!(
                "Sampled order {} with seed {seed}: {} dominoes, diagonal fraction {:.4}, {} flip(s)",
                self.cli.order,
                tiling.marker_count(),
                census.diagonal_fraction(),
                flips
            );
        }

        let output = self.cli.output.to_string_lossy();
        export_tiling_as_png(&tiling, output.as_ref())
    }
}

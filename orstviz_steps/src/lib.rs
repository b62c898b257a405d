//! Sorting algorithms reworked as lazy producers of array snapshots.
//!
//! Instead of sorting a slice and returning, every [`Sorter`] hands out an iterator of
//! [`Snapshot`]s. Each call to `next()` performs exactly one primitive comparison or one
//! exchange/placement of the textbook algorithm and returns a full copy of the array annotated
//! with the indices involved. The sequence is finite, deterministic for a given input, and ends
//! with a snapshot where everything is in order and marked [`Highlight::Sorted`].
//!
//! # Example
//!
//! ```
//! use orstviz_steps::{Element, QuickSorter, Sorter};
//!
//! let input: Vec<Element> = [3, 1, 2].into_iter().map(Element::new).collect();
//! let mut steps = QuickSorter.steps(&input);
//!
//! // A partition opens by showing its pivot, the last element of the range.
//! assert_eq!(steps.next().unwrap().pivot, Some(2));
//!
//! let last = steps.last().unwrap();
//! assert_eq!(last.values(), [1, 2, 3]);
//! assert!(last.is_terminal());
//! ```

pub mod input;
pub mod registry;
pub mod snapshot;
pub mod stats;
mod sorters;

pub use input::{random_elements, InputSource, VALUE_RANGE};
pub use registry::{Algorithm, ParseAlgorithmError, Steps};
pub use snapshot::{Element, Highlight, Snapshot, StepKind};
pub use sorters::bubble_sorter::{BubbleSorter, BubbleSteps};
pub use sorters::heap_sorter::{HeapSorter, HeapSteps};
pub use sorters::insertion_sorter::{InsertionSorter, InsertionSteps};
pub use sorters::merge_sorter::{MergeSorter, MergeSteps};
pub use sorters::quick_sorter::{QuickSorter, QuickSteps};
pub use sorters::selection_sorter::{SelectionSorter, SelectionSteps};

use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};

/// Every sorting algorithm must implement the trait `Sorter`.
///
/// `steps` copies the input into a working buffer owned by the returned iterator, so any number
/// of runs can be taken from the same input without sharing progress.
pub trait Sorter {
    type Steps: Iterator<Item = Snapshot>;

    fn steps(&self, input: &[Element]) -> Self::Steps;

    /// Runs the algorithm to completion and writes the final snapshot back into `slice`.
    fn sort(&self, slice: &mut [Element]) {
        if let Some(last) = self.steps(slice).last() {
            slice.copy_from_slice(&last.elements);
        }
    }
}

/// Inspect step traces without animating them. Install the `orstviz` binary and run
/// `orstviz steps --help` to see what options are available
#[derive(Debug, Args)]
#[command(flatten_help = true, subcommand_required = true)]
pub struct StepsArgs {
    #[command(subcommand)]
    command: StepsCommands,
}

#[derive(Clone, Subcommand, Debug)]
#[command(arg_required_else_help = true)]
enum StepsCommands {
    /// Print every snapshot of one run.
    Trace {
        /// Algorithm to trace.
        #[arg(short, long, value_enum, default_value_t = Algorithm::Bubble)]
        algorithm: Algorithm,

        /// Comma separated input values. A random array is used when absent.
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        values: Option<Vec<u32>>,

        /// Size of the random array.
        #[arg(short, long, default_value_t = 10)]
        size: usize,

        /// Seed for the random array.
        #[arg(long)]
        seed: Option<u64>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = TraceFormat::Text)]
        format: TraceFormat,
    },

    /// Count the steps every algorithm takes on the same random arrays.
    Stats {
        /// Array sizes to measure.
        #[arg(short, long, value_delimiter = ',', default_values_t = [10, 50, 100])]
        sizes: Vec<usize>,

        /// Seed for the random arrays.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum TraceFormat {
    /// Coloured, one snapshot per line
    Text,

    /// One JSON object per line
    Json,
}

impl StepsArgs {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            StepsCommands::Trace {
                algorithm,
                values,
                size,
                seed,
                format,
            } => {
                let input = match (values, seed) {
                    (Some(values), _) => values.into_iter().map(Element::new).collect(),
                    (None, Some(seed)) => InputSource::seeded(size, seed).elements().to_vec(),
                    (None, None) => random_elements(size),
                };

                let stdout = std::io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                write_trace(&mut out, algorithm, &input, format)?;
                out.flush().context("Unable to flush the trace")?;
            }
            StepsCommands::Stats { sizes, seed } => stats::run_stats(&sizes, seed),
        }

        Ok(())
    }
}

fn write_trace<W: Write>(
    out: &mut W,
    algorithm: Algorithm,
    input: &[Element],
    format: TraceFormat,
) -> anyhow::Result<()> {
    if format == TraceFormat::Text {
        writeln!(
            out,
            "{} {} on {} elements",
            algorithm.display_name(),
            algorithm.complexity(),
            input.len()
        )?;
    }

    for (i, snapshot) in algorithm.steps(input).enumerate() {
        match format {
            TraceFormat::Text => {
                writeln!(out, "{i:>5} {:<10} {snapshot}", format!("{:?}", snapshot.kind()))?
            }
            TraceFormat::Json => {
                serde_json::to_writer(&mut *out, &snapshot)
                    .context("Unable to serialize the snapshot")?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_trace_is_one_object_per_snapshot() {
        let input: Vec<Element> = [2, 1].into_iter().map(Element::new).collect();
        let mut out = Vec::new();
        write_trace(&mut out, Algorithm::Bubble, &input, TraceFormat::Json).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), Algorithm::Bubble.steps(&input).count());

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["comparing"], serde_json::json!([0, 1]));
        assert_eq!(first["elements"][0]["highlight"], "comparing");
        assert!(first.get("pivot").is_none());
    }

    #[test]
    fn text_trace_has_a_header() {
        let input: Vec<Element> = [1].into_iter().map(Element::new).collect();
        let mut out = Vec::new();
        write_trace(&mut out, Algorithm::Heap, &input, TraceFormat::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Heap Sort O(n log n) on 1 elements"));
        assert_eq!(text.lines().count(), 2);
    }
}

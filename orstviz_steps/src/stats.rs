use colored::Colorize;
use prettytable::{row, Cell, Table};
use rayon::prelude::*;

use crate::{Algorithm, Element, InputSource, StepKind};

/// How many snapshots of each kind one run produced.
///
/// `placements` counts every unannotated move, so insertion shifts and merge takes land there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepCounts {
    pub comparisons: usize,
    pub swaps: usize,
    pub pivots: usize,
    pub placements: usize,
    pub sorted: usize,
}

impl StepCounts {
    /// Column headers matching [`StepCounts::columns`].
    pub const HEADERS: [&'static str; 5] = [
        "Comparisons",
        "Swaps",
        "Pivots",
        "Placements / Shifts",
        "Sorted",
    ];

    pub fn columns(&self) -> [usize; 5] {
        [
            self.comparisons,
            self.swaps,
            self.pivots,
            self.placements,
            self.sorted,
        ]
    }

    pub fn total(&self) -> usize {
        self.columns().iter().sum()
    }

    fn record(&mut self, kind: StepKind) {
        match kind {
            StepKind::Comparison => self.comparisons += 1,
            StepKind::Swap => self.swaps += 1,
            StepKind::Pivot => self.pivots += 1,
            StepKind::Placement => self.placements += 1,
            StepKind::Sorted => self.sorted += 1,
        }
    }
}

/// Drains a full run of `algorithm` over `input` and tallies its snapshots.
pub fn count_steps(algorithm: Algorithm, input: &[Element]) -> StepCounts {
    algorithm
        .steps(input)
        .fold(StepCounts::default(), |mut counts, snapshot| {
            counts.record(snapshot.kind());
            counts
        })
}

/// Counts every algorithm on the same input. Runs are independent, so they go in parallel.
pub fn count_all(input: &[Element]) -> Vec<(Algorithm, StepCounts)> {
    Algorithm::ALL
        .par_iter()
        .map(|&algorithm| (algorithm, count_steps(algorithm, input)))
        .collect()
}

pub fn run_stats(sizes: &[usize], seed: Option<u64>) {
    for &n in sizes {
        let source = match seed {
            Some(seed) => InputSource::seeded(n, seed),
            None => InputSource::new(n),
        };

        println!(
            "{} {}",
            "List Size -> ".bold().underline().blue(),
            n.to_string().bold()
        );

        let mut table = Table::new();
        let mut header = row!["Sorter".bold(), "Complexity".bold()];
        for title in StepCounts::HEADERS {
            header.add_cell(Cell::new(&title.bold().to_string()));
        }
        header.add_cell(Cell::new(&"Total Steps".bold().to_string()));
        table.add_row(header);

        for (algorithm, counts) in count_all(source.elements()) {
            let mut line = row![algorithm.display_name(), algorithm.complexity()];
            for count in counts.columns() {
                line.add_cell(Cell::new(&count.to_string()));
            }
            line.add_cell(Cell::new(&counts.total().to_string().bold().to_string()));
            table.add_row(line);
        }

        table.printstd();
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(values: &[u32]) -> Vec<Element> {
        values.iter().copied().map(Element::new).collect()
    }

    #[test]
    fn reverse_four_counts() {
        let input = elements(&[4, 3, 2, 1]);
        let bubble = count_steps(Algorithm::Bubble, &input);
        assert_eq!(
            bubble,
            StepCounts {
                comparisons: 6,
                swaps: 6,
                pivots: 0,
                placements: 0,
                sorted: 4,
            }
        );
        assert_eq!(bubble.total(), 16);
        assert_eq!(count_steps(Algorithm::Selection, &input).total(), 12);
        assert_eq!(count_steps(Algorithm::Insertion, &input).total(), 19);
    }

    #[test]
    fn columns_add_up_to_the_total() {
        let input = InputSource::seeded(10, 3).elements().to_vec();
        for (algorithm, counts) in count_all(&input) {
            assert_eq!(counts.columns().len(), StepCounts::HEADERS.len());
            assert_eq!(
                counts.columns().iter().sum::<usize>(),
                algorithm.steps(&input).count(),
                "{algorithm}"
            );
        }
        let quick = count_steps(Algorithm::Quick, &input);
        assert!(quick.pivots > 0);
        assert_eq!(quick.sorted, 1);
    }

    #[test]
    fn insertion_shifts_count_as_placements() {
        // Keys 3, 2 and 1 shift 1, 2 and 3 slots, then each settles with one placement.
        let counts = count_steps(Algorithm::Insertion, &elements(&[4, 3, 2, 1]));
        assert_eq!(counts.comparisons, 3 + 6);
        assert_eq!(counts.placements, 6 + 3);
        assert_eq!(counts.sorted, 1);
    }

    #[test]
    fn count_all_keeps_registry_order() {
        let input = elements(&[2, 1]);
        let all = count_all(&input);
        let order: Vec<_> = all.iter().map(|(a, _)| *a).collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
        assert!(all.iter().all(|(_, c)| c.sorted >= 1));
    }
}

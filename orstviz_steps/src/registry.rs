//! Static mapping from algorithm identifiers to their display metadata and step generator.

use std::fmt::{self, Display};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BubbleSorter, Element, HeapSorter, InsertionSorter, MergeSorter, QuickSorter,
    SelectionSorter, Snapshot, Sorter,
};

/// A boxed, type-erased step sequence, as handed to the playback driver.
pub type Steps = Box<dyn Iterator<Item = Snapshot> + Send>;

/// The sorting algorithms that can be traced.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Merge,
    Quick,
    Insertion,
    Selection,
    Heap,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sorting algorithm `{0}`, expected one of bubble, merge, quick, insertion, selection, heap")]
pub struct ParseAlgorithmError(pub String);

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Heap,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Heap => "heap",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    pub fn complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Insertion | Algorithm::Selection => "O(n²)",
            Algorithm::Merge | Algorithm::Quick | Algorithm::Heap => "O(n log n)",
        }
    }

    /// Starts a fresh run of this algorithm over a private copy of `input`.
    pub fn steps(self, input: &[Element]) -> Steps {
        match self {
            Algorithm::Bubble => Box::new(BubbleSorter.steps(input)),
            Algorithm::Merge => Box::new(MergeSorter.steps(input)),
            Algorithm::Quick => Box::new(QuickSorter.steps(input)),
            Algorithm::Insertion => Box::new(InsertionSorter.steps(input)),
            Algorithm::Selection => Box::new(SelectionSorter.steps(input)),
            Algorithm::Heap => Box::new(HeapSorter.steps(input)),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.id());
        }
        assert_eq!(" Quick ".parse::<Algorithm>(), Ok(Algorithm::Quick));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let err = "bogo".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, ParseAlgorithmError("bogo".into()));
        assert!(err.to_string().contains("bogo"));
    }

    #[test]
    fn display_metadata() {
        assert_eq!(Algorithm::Heap.display_name(), "Heap Sort");
        assert_eq!(Algorithm::Selection.complexity(), "O(n²)");
        assert_eq!(Algorithm::Merge.complexity(), "O(n log n)");
        assert_eq!(Algorithm::default(), Algorithm::Bubble);
    }

    #[test]
    fn every_algorithm_terminates_sorted() {
        let input: Vec<Element> = [5, 3, 9, 1, 3, 7].into_iter().map(Element::new).collect();
        for algorithm in Algorithm::ALL {
            let last = algorithm.steps(&input).last().unwrap();
            assert_eq!(last.values(), [1, 3, 3, 5, 7, 9], "{algorithm}");
            assert!(last.is_terminal(), "{algorithm}");
        }
    }
}

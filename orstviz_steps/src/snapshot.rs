//! The unit of animation: one immutable copy of the array plus the indices that explain it.
//!
//! Generators never hand out references into their working buffer. Every [`Snapshot`] is built
//! by [`Tape::snapshot`], which copies the buffer and recomputes each element's [`Highlight`]
//! from scratch:
//!
//! 1. elements finalized earlier in the run are [`Highlight::Sorted`], everything else
//!    [`Highlight::Default`];
//! 2. the step's `comparing` indices are applied, then `swapping`, then `pivot`. A later mark
//!    wins over an earlier one on the same index.

use std::fmt::{self, Display};

use colored::Colorize;
use serde::Serialize;

/// Why an element is currently visually distinguished. Never part of the sort key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    Default,
    Comparing,
    Swapping,
    Pivot,
    Sorted,
}

/// One logical array entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Element {
    pub value: u32,
    pub highlight: Highlight,
}

impl Element {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            highlight: Highlight::Default,
        }
    }
}

impl From<u32> for Element {
    fn from(value: u32) -> Self {
        Element::new(value)
    }
}

/// A fully materialized copy of the array at one instant of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub elements: Vec<Element>,

    /// One or two indices currently under comparison.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comparing: Vec<usize>,

    /// The pair that was just exchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapping: Option<(usize, usize)>,

    /// Indices that became final in this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorted: Vec<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// `true` when the values are non-decreasing and every element is marked sorted. This is
    /// what the last snapshot of every run looks like.
    pub fn is_terminal(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value <= w[1].value)
            && self
                .elements
                .iter()
                .all(|e| e.highlight == Highlight::Sorted)
    }

    /// Classifies the step for counting purposes.
    pub fn kind(&self) -> StepKind {
        if self.swapping.is_some() {
            StepKind::Swap
        } else if !self.comparing.is_empty() {
            StepKind::Comparison
        } else if self.pivot.is_some() {
            StepKind::Pivot
        } else if !self.sorted.is_empty() || self.is_terminal() {
            StepKind::Sorted
        } else {
            StepKind::Placement
        }
    }
}

/// Coarse category of a snapshot, derived from its annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Comparison,
    Swap,
    Pivot,
    /// No annotation at all: an element moved or settled. This covers insertion shifts and key
    /// placements as well as merge takes and drains.
    Placement,
    Sorted,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let value = element.value.to_string();
            let value = match element.highlight {
                Highlight::Default => value.blue(),
                Highlight::Comparing => value.yellow().bold(),
                Highlight::Swapping => value.red().bold(),
                Highlight::Pivot => value.purple().bold(),
                Highlight::Sorted => value.green(),
            };
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// Annotations for the snapshot about to be taken.
#[derive(Debug, Default)]
pub(crate) struct Marks {
    comparing: Vec<usize>,
    swapping: Option<(usize, usize)>,
    sorted: Vec<usize>,
    pivot: Option<usize>,
}

impl Marks {
    pub(crate) fn comparing(mut self, indices: &[usize]) -> Self {
        self.comparing = indices.to_vec();
        self
    }

    pub(crate) fn swapping(mut self, a: usize, b: usize) -> Self {
        self.swapping = Some((a, b));
        self
    }

    pub(crate) fn sorted(mut self, indices: Vec<usize>) -> Self {
        self.sorted = indices;
        self
    }

    pub(crate) fn pivot(mut self, index: usize) -> Self {
        self.pivot = Some(index);
        self
    }
}

/// The working buffer a single run owns exclusively.
#[derive(Debug, Clone)]
pub(crate) struct Tape {
    values: Vec<u32>,
    // Input position of the value currently in each slot.
    origins: Vec<usize>,
    finalized: Vec<bool>,
}

impl Tape {
    pub(crate) fn new(input: &[Element]) -> Self {
        Self {
            values: input.iter().map(|e| e.value).collect(),
            origins: (0..input.len()).collect(),
            finalized: vec![false; input.len()],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> u32 {
        self.values[index]
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.origins.swap(a, b);
    }

    /// Moves the element at `to` into `from..=to`'s first slot, shifting the rest right by one.
    pub(crate) fn rotate_into(&mut self, from: usize, to: usize) {
        self.values[from..=to].rotate_right(1);
        self.origins[from..=to].rotate_right(1);
    }

    #[cfg(test)]
    pub(crate) fn origins(&self) -> &[usize] {
        &self.origins
    }

    pub(crate) fn finalize(&mut self, index: usize) {
        self.finalized[index] = true;
    }

    /// Finalizes everything still open and returns the indices that changed.
    pub(crate) fn finalize_rest(&mut self) -> Vec<usize> {
        let mut newly = Vec::new();
        for (i, done) in self.finalized.iter_mut().enumerate() {
            if !*done {
                *done = true;
                newly.push(i);
            }
        }
        newly
    }

    pub(crate) fn snapshot(&self, marks: Marks) -> Snapshot {
        let mut elements: Vec<Element> = self
            .values
            .iter()
            .zip(&self.finalized)
            .map(|(&value, &done)| Element {
                value,
                highlight: if done {
                    Highlight::Sorted
                } else {
                    Highlight::Default
                },
            })
            .collect();

        for &i in &marks.comparing {
            elements[i].highlight = Highlight::Comparing;
        }
        if let Some((a, b)) = marks.swapping {
            elements[a].highlight = Highlight::Swapping;
            elements[b].highlight = Highlight::Swapping;
        }
        if let Some(p) = marks.pivot {
            elements[p].highlight = Highlight::Pivot;
        }

        Snapshot {
            elements,
            comparing: marks.comparing,
            swapping: marks.swapping,
            sorted: marks.sorted,
            pivot: marks.pivot,
        }
    }
}

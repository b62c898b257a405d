use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Insertion Sort](https://en.wikipedia.org/wiki/Insertion_sort)
///
/// # Explanation
///
/// Insertion sort is a simple sorting algorithm that builds the final sorted array (or list) one
/// item at a time
///
/// Sorting is typically done in-place, by iterating up the array, growing the sorted list behind
/// it. At each array-position, it checks the value there against the largest value in the sorted
/// list (which happens to be next to it, in the previous array- position checked). If larger, it
/// leaves the element in place and moves to the next. If smaller, it finds the correct position
/// within the sorted list, shifts all the larger values up to make a space, and inserts into that
/// correct position.
///
/// # Steps
///
/// Picking up a new key is one comparing step. Every backward shift is a comparing step followed
/// by a shift step: the larger neighbour is written one slot up and the key is parked in the
/// vacated slot, so the snapshot is still a permutation of the input. Shifts carry no swap
/// annotation. Once the key stops moving a placement step follows.
///
/// # Usage
///```
/// use orstviz_steps::{Element, InsertionSorter, Sorter};
///
/// let input: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// let last = InsertionSorter.steps(&input).last().unwrap();
/// assert_eq!(last.values(), [1, 2, 3, 4, 5]);
///```
#[derive(Default, Debug, Clone, Copy)]
pub struct InsertionSorter;

impl Sorter for InsertionSorter {
    type Steps = InsertionSteps;

    fn steps(&self, input: &[Element]) -> InsertionSteps {
        InsertionSteps::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PickKey,
    Scan,
    Shift,
    Place,
    Finish,
    Done,
}

/// Resumable state of one insertion sort run.
#[derive(Debug, Clone)]
pub struct InsertionSteps {
    tape: Tape,
    unsorted: usize,
    // Current slot of the key being inserted.
    hole: usize,
    key: u32,
    phase: Phase,
}

impl InsertionSteps {
    fn new(input: &[Element]) -> Self {
        Self {
            tape: Tape::new(input),
            unsorted: 1,
            hole: 0,
            key: 0,
            phase: Phase::PickKey,
        }
    }
}

impl Iterator for InsertionSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.phase {
                Phase::PickKey => {
                    if self.unsorted >= self.tape.len() {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    self.hole = self.unsorted;
                    self.key = self.tape.value(self.hole);
                    self.phase = Phase::Scan;
                    return Some(self.tape.snapshot(Marks::default().comparing(&[self.hole])));
                }
                Phase::Scan => {
                    let hole = self.hole;
                    if hole > 0 && self.tape.value(hole - 1) > self.key {
                        self.phase = Phase::Shift;
                        return Some(
                            self.tape
                                .snapshot(Marks::default().comparing(&[hole - 1, hole])),
                        );
                    }
                    self.phase = Phase::Place;
                }
                Phase::Shift => {
                    self.tape.swap(self.hole - 1, self.hole);
                    self.hole -= 1;
                    self.phase = Phase::Scan;
                    return Some(self.tape.snapshot(Marks::default()));
                }
                Phase::Place => {
                    self.unsorted += 1;
                    self.phase = Phase::PickKey;
                    return Some(self.tape.snapshot(Marks::default()));
                }
                Phase::Finish => {
                    let rest = self.tape.finalize_rest();
                    self.phase = Phase::Done;
                    return Some(self.tape.snapshot(Marks::default().sorted(rest)));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl std::iter::FusedIterator for InsertionSteps {}

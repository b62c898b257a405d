use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Bubble Sort](https://en.wikipedia.org/wiki/Bubble_sort)
///
/// # Usage
///```
/// use orstviz_steps::{BubbleSorter, Element, Sorter};
///
/// let input: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// let last = BubbleSorter.steps(&input).last().unwrap();
/// assert_eq!(last.values(), [1, 2, 3, 4, 5]);
///```
/// # Explanation
///
/// Bubble sort, sometimes referred to as sinking sort,
/// is a simple sorting algorithm that repeatedly steps
/// through the list, compares adjacent elements and swaps
/// them if they are in the wrong order. Every pass pushes
/// the largest remaining element to the end of the list,
/// where it is final.
///
/// # Steps
///
/// Per inner iteration one comparing step and, if the pair is out of order, one swapping step.
/// Per pass one step marking the newly fixed tail element. There is no early exit: a sorted
/// input still gets every pass. The element left at the front is marked at the very end.
#[derive(Default, Debug, Clone, Copy)]
pub struct BubbleSorter;

impl Sorter for BubbleSorter {
    type Steps = BubbleSteps;

    fn steps(&self, input: &[Element]) -> BubbleSteps {
        BubbleSteps::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Swap,
    MarkPass,
    Finish,
    Done,
}

/// Resumable state of one bubble sort run.
#[derive(Debug, Clone)]
pub struct BubbleSteps {
    tape: Tape,
    pass: usize,
    j: usize,
    phase: Phase,
}

impl BubbleSteps {
    fn new(input: &[Element]) -> Self {
        let tape = Tape::new(input);
        let phase = if tape.len() < 2 {
            Phase::Finish
        } else {
            Phase::Compare
        };
        Self {
            tape,
            pass: 0,
            j: 0,
            phase,
        }
    }
}

impl Iterator for BubbleSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let n = self.tape.len();
        loop {
            match self.phase {
                Phase::Compare => {
                    let j = self.j;
                    if j + 1 >= n - self.pass {
                        self.phase = Phase::MarkPass;
                        continue;
                    }
                    let snapshot = self.tape.snapshot(Marks::default().comparing(&[j, j + 1]));
                    if self.tape.value(j) > self.tape.value(j + 1) {
                        self.phase = Phase::Swap;
                    } else {
                        self.j += 1;
                    }
                    return Some(snapshot);
                }
                Phase::Swap => {
                    let j = self.j;
                    self.tape.swap(j, j + 1);
                    self.j += 1;
                    self.phase = Phase::Compare;
                    return Some(self.tape.snapshot(Marks::default().swapping(j, j + 1)));
                }
                Phase::MarkPass => {
                    let fixed = n - self.pass - 1;
                    self.tape.finalize(fixed);
                    self.pass += 1;
                    self.j = 0;
                    self.phase = if self.pass < n - 1 {
                        Phase::Compare
                    } else {
                        Phase::Finish
                    };
                    return Some(self.tape.snapshot(Marks::default().sorted(vec![fixed])));
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

impl std::iter::FusedIterator for BubbleSteps {}

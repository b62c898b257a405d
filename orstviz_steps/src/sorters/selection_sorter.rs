use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Selection Sort](https://en.wikipedia.org/wiki/Selection_sort)
///
/// # Usage
///```
/// use orstviz_steps::{Element, SelectionSorter, Sorter};
///
/// let mut slice: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// SelectionSorter.sort(&mut slice);
/// assert!(slice.windows(2).all(|w| w[0].value <= w[1].value));
///```
/// # Explanation
///
/// Selection sort is an in-place comparison sorting
/// algorithm. It has an O(n2) time complexity, which
/// makes it inefficient on large  lists, and generally
/// performs worse than the similar insertion sort.
///
/// # Algorithm
///
/// The algorithm divides the input list into two parts:
/// a sorted sublist of items which is built
/// up from left to right at the front (
/// left) of the list and a sublist of
/// the remaining unsorted items that occupy the rest of
/// the list. The algorithm proceeds by finding the smallest
/// element in the unsorted sublist, exchanging (swapping
/// ) it with the leftmost unsorted element (putting
/// it in sorted order), and moving the sublist
/// boundaries one element to the right.
#[derive(Default, Debug, Clone, Copy)]
pub struct SelectionSorter;

impl Sorter for SelectionSorter {
    type Steps = SelectionSteps;

    fn steps(&self, input: &[Element]) -> SelectionSteps {
        SelectionSteps::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Swap,
    Mark,
    Finish,
    Done,
}

/// Resumable state of one selection sort run.
#[derive(Debug, Clone)]
pub struct SelectionSteps {
    tape: Tape,
    unsorted: usize,
    smallest_in_rest: usize,
    j: usize,
    phase: Phase,
}

impl SelectionSteps {
    fn new(input: &[Element]) -> Self {
        let tape = Tape::new(input);
        let phase = if tape.len() < 2 {
            Phase::Finish
        } else {
            Phase::Compare
        };
        Self {
            tape,
            unsorted: 0,
            smallest_in_rest: 0,
            j: 1,
            phase,
        }
    }
}

impl Iterator for SelectionSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let n = self.tape.len();
        loop {
            match self.phase {
                Phase::Compare => {
                    if self.j >= n {
                        self.phase = if self.smallest_in_rest != self.unsorted {
                            Phase::Swap
                        } else {
                            Phase::Mark
                        };
                        continue;
                    }
                    let (smallest, j) = (self.smallest_in_rest, self.j);
                    let snapshot = self.tape.snapshot(Marks::default().comparing(&[smallest, j]));
                    if self.tape.value(j) < self.tape.value(smallest) {
                        self.smallest_in_rest = j;
                    }
                    self.j += 1;
                    return Some(snapshot);
                }
                Phase::Swap => {
                    let (i, smallest) = (self.unsorted, self.smallest_in_rest);
                    self.tape.swap(i, smallest);
                    self.phase = Phase::Mark;
                    return Some(self.tape.snapshot(Marks::default().swapping(i, smallest)));
                }
                Phase::Mark => {
                    let i = self.unsorted;
                    self.tape.finalize(i);
                    self.unsorted += 1;
                    self.smallest_in_rest = self.unsorted;
                    self.j = self.unsorted + 1;
                    self.phase = if self.unsorted < n - 1 {
                        Phase::Compare
                    } else {
                        Phase::Finish
                    };
                    return Some(self.tape.snapshot(Marks::default().sorted(vec![i])));
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

impl std::iter::FusedIterator for SelectionSteps {}

#[test]
fn works() {
    let things: Vec<Element> = [4, 2, 3, 5, 1].into_iter().map(Element::new).collect();
    let last = SelectionSorter.steps(&things).last().unwrap();
    assert_eq!(last.values(), &[1, 2, 3, 4, 5])
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{Highlight, StepKind};

    fn elements(values: &[u32]) -> Vec<Element> {
        values.iter().copied().map(Element::new).collect()
    }

    #[test]
    fn reverse_four_step_count() {
        let steps: Vec<_> = SelectionSorter.steps(&elements(&[4, 3, 2, 1])).collect();
        let count = |kind| steps.iter().filter(|s| s.kind() == kind).count();

        // Passes compare 3, 2 and 1 times; the first two passes move a new minimum.
        assert_eq!(steps.len(), 12);
        assert_eq!(count(StepKind::Comparison), 6);
        assert_eq!(count(StepKind::Swap), 2);
        assert_eq!(count(StepKind::Sorted), 4);
    }

    #[test]
    fn compares_against_current_minimum() {
        let steps: Vec<_> = SelectionSorter.steps(&elements(&[3, 1, 2])).collect();
        assert_eq!(steps[0].comparing, vec![0, 1]);
        // 1 became the minimum, so the next comparison is against index 1.
        assert_eq!(steps[1].comparing, vec![1, 2]);
        assert_eq!(steps[2].swapping, Some((0, 1)));
        assert_eq!(steps[2].values(), vec![1, 3, 2]);
        assert_eq!(steps[3].sorted, vec![0]);
    }

    #[test]
    fn sorted_prefix_stays_marked() {
        let steps: Vec<_> = SelectionSorter.steps(&elements(&[5, 4, 3, 2, 1])).collect();
        let after_first_pass = steps.iter().position(|s| s.sorted == vec![0]).unwrap();
        for step in &steps[after_first_pass..] {
            assert_eq!(step.elements[0].highlight, Highlight::Sorted);
        }
    }

    #[test]
    fn very_unsorted() {
        let input = elements(&(1..300).rev().collect::<Vec<_>>());
        let last = SelectionSorter.steps(&input).last().unwrap();
        assert_eq!(last.values(), (1..300).collect::<Vec<_>>());
        assert!(last.is_terminal());
    }

    #[test]
    fn simple_edge_cases() {
        assert_eq!(SelectionSorter.steps(&[]).count(), 1);

        let one: Vec<_> = SelectionSorter.steps(&elements(&[1])).collect();
        assert_eq!(one.len(), 1);
        assert!(one[0].is_terminal());

        let two: Vec<_> = SelectionSorter.steps(&elements(&[2, 1])).collect();
        assert_eq!(two.last().unwrap().values(), vec![1, 2]);
        assert_eq!(two.last().unwrap().sorted, vec![1]);
    }
}

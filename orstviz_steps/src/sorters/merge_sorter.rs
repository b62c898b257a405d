use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Merge Sort](https://en.wikipedia.org/wiki/Merge_sort)
///
/// # Usage
///```
/// use orstviz_steps::{Element, MergeSorter, Sorter};
///
/// let input: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// let last = MergeSorter.steps(&input).last().unwrap();
/// assert_eq!(last.values(), [1, 2, 3, 4, 5]);
///```
///
/// # Explanation
///
/// Top-down merge sort splits the range at its midpoint, sorts both halves and merges them.
/// Splitting produces no snapshots. While merging, each comparison of the two run heads is one
/// step and each element placed is one step, including the leftovers drained after one run
/// runs out. A full-array sweep marks everything sorted at the end.
///
/// Ties take the left run first, so equal values keep their input order. Taking from the right
/// run rotates that element in front of the remaining left run, which keeps the merge in place
/// and every snapshot a permutation of the input.
#[derive(Default, Debug, Clone, Copy)]
pub struct MergeSorter;

impl Sorter for MergeSorter {
    type Steps = MergeSteps;

    fn steps(&self, input: &[Element]) -> MergeSteps {
        MergeSteps::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// Cursor over one in-place merge of `[k, left_end]` with `[right_head, end]`.
#[derive(Debug, Clone, Copy)]
struct Merge {
    k: usize,
    left_end: usize,
    right_head: usize,
    end: usize,
}

impl Merge {
    fn runs_remaining(&self) -> bool {
        self.k <= self.left_end && self.right_head <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Schedule,
    Compare,
    TakeLeft,
    TakeRight,
    Drain,
    Finish,
    Done,
}

/// Resumable state of one merge sort run. The recursion lives in `tasks`.
#[derive(Debug, Clone)]
pub struct MergeSteps {
    tape: Tape,
    tasks: Vec<Task>,
    merge: Merge,
    phase: Phase,
}

impl MergeSteps {
    fn new(input: &[Element]) -> Self {
        let tape = Tape::new(input);
        let mut tasks = Vec::new();
        if tape.len() > 1 {
            tasks.push(Task::Sort {
                left: 0,
                right: tape.len() - 1,
            });
        }
        Self {
            tape,
            tasks,
            merge: Merge {
                k: 0,
                left_end: 0,
                right_head: 0,
                end: 0,
            },
            phase: Phase::Schedule,
        }
    }
}

impl Iterator for MergeSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.phase {
                Phase::Schedule => match self.tasks.pop() {
                    Some(Task::Sort { left, right }) => {
                        if left < right {
                            let mid = left + (right - left) / 2;
                            // Popped in reverse: left half, right half, then the merge.
                            self.tasks.push(Task::Merge { left, mid, right });
                            self.tasks.push(Task::Sort {
                                left: mid + 1,
                                right,
                            });
                            self.tasks.push(Task::Sort { left, right: mid });
                        }
                    }
                    Some(Task::Merge { left, mid, right }) => {
                        self.merge = Merge {
                            k: left,
                            left_end: mid,
                            right_head: mid + 1,
                            end: right,
                        };
                        self.phase = Phase::Compare;
                    }
                    None => self.phase = Phase::Finish,
                },
                Phase::Compare => {
                    let merge = self.merge;
                    if !merge.runs_remaining() {
                        self.phase = Phase::Drain;
                        continue;
                    }
                    self.phase = if self.tape.value(merge.k) <= self.tape.value(merge.right_head)
                    {
                        Phase::TakeLeft
                    } else {
                        Phase::TakeRight
                    };
                    return Some(
                        self.tape
                            .snapshot(Marks::default().comparing(&[merge.k, merge.right_head])),
                    );
                }
                Phase::TakeLeft => {
                    // The left head already sits at `k`.
                    self.merge.k += 1;
                    self.phase = Phase::Compare;
                    return Some(self.tape.snapshot(Marks::default()));
                }
                Phase::TakeRight => {
                    let merge = &mut self.merge;
                    self.tape.rotate_into(merge.k, merge.right_head);
                    merge.k += 1;
                    merge.left_end += 1;
                    merge.right_head += 1;
                    self.phase = Phase::Compare;
                    return Some(self.tape.snapshot(Marks::default()));
                }
                Phase::Drain => {
                    // Whatever is left of either run is already in its final slot.
                    if self.merge.k <= self.merge.end {
                        self.merge.k += 1;
                        return Some(self.tape.snapshot(Marks::default()));
                    }
                    self.phase = Phase::Schedule;
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

impl std::iter::FusedIterator for MergeSteps {}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::StepKind;

    fn elements(values: &[u32]) -> Vec<Element> {
        values.iter().copied().map(Element::new).collect()
    }

    #[test]
    fn arbitrary_array() {
        let last = MergeSorter.steps(&elements(&[1, 5, 4, 2, 3])).last().unwrap();
        assert_eq!(last.values(), [1, 2, 3, 4, 5]);
        assert!(last.is_terminal());
    }

    #[test]
    fn one_placement_per_element_merged() {
        let steps: Vec<_> = MergeSorter.steps(&elements(&[4, 3, 2, 1])).collect();
        let count = |kind| steps.iter().filter(|s| s.kind() == kind).count();

        // Merges of sizes 2, 2 and 4 place 8 elements; with all-right-first input the
        // comparisons are 1, 1 and 2.
        assert_eq!(count(StepKind::Placement), 8);
        assert_eq!(count(StepKind::Comparison), 4);
        assert_eq!(count(StepKind::Sorted), 1);
        assert_eq!(steps.len(), 13);
    }

    #[test]
    fn no_steps_at_split_time() {
        let mut steps = MergeSorter.steps(&elements(&[2, 1, 3]));
        // The first emitted step is already the comparison of the leftmost pair.
        assert_eq!(steps.next().unwrap().comparing, vec![0, 1]);
    }

    #[test]
    fn right_take_rotates_into_place() {
        let steps: Vec<_> = MergeSorter.steps(&elements(&[5, 1])).collect();
        assert_eq!(steps[0].comparing, vec![0, 1]);
        assert_eq!(steps[1].values(), vec![1, 5]);
        // Left leftover drained.
        assert_eq!(steps[2].values(), vec![1, 5]);
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let mut steps = MergeSorter.steps(&elements(&[3, 1, 3, 2, 1, 3, 2, 1]));
        for _ in steps.by_ref() {}

        let values = steps.tape.snapshot(Marks::default()).values();
        let origins = steps.tape.origins();
        for pair in (0..values.len()).collect::<Vec<_>>().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if values[a] == values[b] {
                assert!(origins[a] < origins[b], "unstable at {a}: {origins:?}");
            }
        }
    }

    #[test]
    fn very_unsorted() {
        let input = elements(&(1..1000).rev().collect::<Vec<_>>());
        let last = MergeSorter.steps(&input).last().unwrap();
        assert_eq!(last.values(), (1..1000).collect::<Vec<_>>());
    }

    #[test]
    fn simple_edge_cases() {
        assert_eq!(MergeSorter.steps(&[]).count(), 1);
        assert_eq!(MergeSorter.steps(&elements(&[9])).count(), 1);

        let mut three = elements(&[3, 1, 2]);
        MergeSorter.sort(&mut three);
        assert_eq!(three.iter().map(|e| e.value).collect::<Vec<_>>(), [1, 2, 3]);
    }
}

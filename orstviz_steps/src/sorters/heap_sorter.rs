use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Heap Sort](https://en.wikipedia.org/wiki/Heapsort)
///
/// # Usage
///```
/// use orstviz_steps::{Element, HeapSorter, Sorter};
///
/// let input: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// let last = HeapSorter.steps(&input).last().unwrap();
/// assert_eq!(last.values(), [1, 2, 3, 4, 5]);
///```
///
/// # Explanation
///
/// Heapsort first arranges the array into a binary max-heap, heapifying every non-leaf bottom
/// up. It then repeatedly swaps the root with the last element of the heap, which is now final,
/// and restores the heap property on the shrunken heap.
///
/// Heapify compares the left child and then the right child against the largest index seen so
/// far, one comparing step each, and sifts down with one swapping step per level.
#[derive(Default, Debug, Clone, Copy)]
pub struct HeapSorter;

impl Sorter for HeapSorter {
    type Steps = HeapSteps;

    fn steps(&self, input: &[Element]) -> HeapSteps {
        HeapSteps::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sift {
    Left,
    Right,
    Settle,
}

/// An in-progress heapify of `root` within the first `size` slots.
#[derive(Debug, Clone, Copy)]
struct Heapify {
    size: usize,
    root: usize,
    largest: usize,
    stage: Sift,
}

impl Heapify {
    fn new(size: usize, root: usize) -> Self {
        Self {
            size,
            root,
            largest: root,
            stage: Sift::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Build,
    Extract,
    Heapify,
    Finish,
    Done,
}

/// Resumable state of one heap sort run.
#[derive(Debug, Clone)]
pub struct HeapSteps {
    tape: Tape,
    // Next non-leaf to heapify while building.
    build: Option<usize>,
    // Last slot of the heap while extracting.
    end: usize,
    heapify: Heapify,
    // Where to go once the current heapify settles.
    resume: Phase,
    phase: Phase,
}

impl HeapSteps {
    fn new(input: &[Element]) -> Self {
        let tape = Tape::new(input);
        let n = tape.len();
        Self {
            build: (n / 2).checked_sub(1),
            end: n.saturating_sub(1),
            heapify: Heapify::new(0, 0),
            resume: Phase::Build,
            phase: if n < 2 { Phase::Finish } else { Phase::Build },
            tape,
        }
    }

    /// Advances the current heapify by one step, or returns `None` once it has settled.
    fn sift(&mut self) -> Option<Snapshot> {
        loop {
            let h = self.heapify;
            match h.stage {
                Sift::Left | Sift::Right => {
                    let (child, next) = match h.stage {
                        Sift::Left => (2 * h.root + 1, Sift::Right),
                        _ => (2 * h.root + 2, Sift::Settle),
                    };
                    self.heapify.stage = next;
                    if child >= h.size {
                        continue;
                    }
                    let snapshot = self
                        .tape
                        .snapshot(Marks::default().comparing(&[child, h.largest]));
                    if self.tape.value(child) > self.tape.value(h.largest) {
                        self.heapify.largest = child;
                    }
                    return Some(snapshot);
                }
                Sift::Settle => {
                    if h.largest == h.root {
                        return None;
                    }
                    self.tape.swap(h.root, h.largest);
                    self.heapify = Heapify::new(h.size, h.largest);
                    return Some(
                        self.tape
                            .snapshot(Marks::default().swapping(h.root, h.largest)),
                    );
                }
            }
        }
    }
}

impl Iterator for HeapSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let n = self.tape.len();
        loop {
            match self.phase {
                Phase::Build => match self.build {
                    Some(i) => {
                        self.heapify = Heapify::new(n, i);
                        self.build = i.checked_sub(1);
                        self.resume = Phase::Build;
                        self.phase = Phase::Heapify;
                    }
                    None => self.phase = Phase::Extract,
                },
                Phase::Extract => {
                    let end = self.end;
                    if end == 0 {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    self.tape.swap(0, end);
                    let snapshot = self.tape.snapshot(Marks::default().swapping(0, end));
                    self.tape.finalize(end);
                    self.heapify = Heapify::new(end, 0);
                    self.end -= 1;
                    self.resume = Phase::Extract;
                    self.phase = Phase::Heapify;
                    return Some(snapshot);
                }
                Phase::Heapify => match self.sift() {
                    Some(snapshot) => return Some(snapshot),
                    None => self.phase = self.resume,
                },
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

impl std::iter::FusedIterator for HeapSteps {}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{Highlight, StepKind};

    fn elements(values: &[u32]) -> Vec<Element> {
        values.iter().copied().map(Element::new).collect()
    }

    #[test]
    fn arbitrary_array() {
        let last = HeapSorter.steps(&elements(&[1, 5, 4, 2, 3])).last().unwrap();
        assert_eq!(last.values(), [1, 2, 3, 4, 5]);
        assert!(last.is_terminal());
    }

    #[test]
    fn heapify_compares_left_then_right() {
        let mut steps = HeapSorter.steps(&elements(&[1, 2, 3]));
        // Root 0 is the only non-leaf: left child against 0, then right child against the
        // new largest (index 1, value 2).
        assert_eq!(steps.next().unwrap().comparing, vec![1, 0]);
        assert_eq!(steps.next().unwrap().comparing, vec![2, 1]);
        let swap = steps.next().unwrap();
        assert_eq!(swap.swapping, Some((0, 2)));
        assert_eq!(swap.values(), vec![3, 2, 1]);
    }

    #[test]
    fn extracted_tail_is_marked_sorted() {
        let steps: Vec<_> = HeapSorter.steps(&elements(&[4, 1, 3, 2])).collect();
        let first_extract = steps
            .iter()
            .position(|s| s.swapping == Some((0, 3)))
            .unwrap();
        for step in &steps[first_extract + 1..] {
            assert_eq!(step.elements[3].highlight, Highlight::Sorted);
            assert_eq!(step.elements[3].value, 4);
        }
    }

    #[test]
    fn final_step_marks_the_root() {
        let steps: Vec<_> = HeapSorter.steps(&elements(&[2, 1])).collect();
        // Compare, no swap needed, extract swap, final mark of the root.
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].kind(), StepKind::Comparison);
        assert_eq!(steps[1].swapping, Some((0, 1)));
        assert_eq!(steps[2].sorted, vec![0]);
        assert!(steps[2].is_terminal());
    }

    #[test]
    fn very_unsorted() {
        let input = elements(&(1..500).rev().collect::<Vec<_>>());
        let last = HeapSorter.steps(&input).last().unwrap();
        assert_eq!(last.values(), (1..500).collect::<Vec<_>>());
    }

    #[test]
    fn simple_edge_cases() {
        assert_eq!(HeapSorter.steps(&[]).count(), 1);
        assert_eq!(HeapSorter.steps(&elements(&[3])).count(), 1);

        let mut three = elements(&[3, 1, 2]);
        HeapSorter.sort(&mut three);
        assert_eq!(three.iter().map(|e| e.value).collect::<Vec<_>>(), [1, 2, 3]);
    }
}

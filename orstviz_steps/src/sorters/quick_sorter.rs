use crate::snapshot::{Marks, Tape};
use crate::{Element, Snapshot, Sorter};

/// An implementation of [Quick Sort](https://en.wikipedia.org/wiki/Quicksort)
///
/// # Usage
///```
/// use orstviz_steps::{Element, QuickSorter, Sorter};
///
/// let input: Vec<Element> = [1, 5, 4, 2, 3].into_iter().map(Element::new).collect();
/// let last = QuickSorter.steps(&input).last().unwrap();
/// assert_eq!(last.values(), [1, 2, 3, 4, 5]);
///```
///
/// # Explanation
///
/// Quicksort is a divide-and-conquer algorithm.
/// It works by selecting a 'pivot' element from
/// the array and partitioning the other elements into two sub
/// -arrays, according to whether they are less than
/// or greater than the pivot. For this reason,
/// it is sometimes called partition-exchange sort.
/// The sub-arrays are then sorted recursively.
///
/// # Partitioning
///
/// This is the Lomuto scheme with the last element of the range as pivot. A partition opens with
/// one pivot step, then emits a comparing step for every element scanned and a swapping step for
/// every exchange into the "smaller than pivot" prefix. The pivot does not move until the closing
/// exchange puts it between the two sides. The left side is sorted before the right side, and a
/// full-array sweep marks everything sorted at the end.
#[derive(Default, Debug, Clone, Copy)]
pub struct QuickSorter;

impl Sorter for QuickSorter {
    type Steps = QuickSteps;

    fn steps(&self, input: &[Element]) -> QuickSteps {
        QuickSteps::new(input)
    }
}

/// One Lomuto pass over `[low, high]`.
#[derive(Debug, Clone, Copy)]
struct Partition {
    low: usize,
    high: usize,
    // Next slot of the "smaller than pivot" prefix.
    store: usize,
    j: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NextRange,
    ShowPivot,
    Scan,
    Exchange,
    PlacePivot,
    Finish,
    Done,
}

/// Resumable state of one quick sort run. Pending ranges live in `ranges`.
#[derive(Debug, Clone)]
pub struct QuickSteps {
    tape: Tape,
    ranges: Vec<(usize, usize)>,
    part: Partition,
    phase: Phase,
}

impl QuickSteps {
    fn new(input: &[Element]) -> Self {
        let tape = Tape::new(input);
        let mut ranges = Vec::new();
        if tape.len() > 1 {
            ranges.push((0, tape.len() - 1));
        }
        Self {
            tape,
            ranges,
            part: Partition {
                low: 0,
                high: 0,
                store: 0,
                j: 0,
            },
            phase: Phase::NextRange,
        }
    }
}

impl Iterator for QuickSteps {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.phase {
                Phase::NextRange => match self.ranges.pop() {
                    Some((low, high)) => {
                        self.part = Partition {
                            low,
                            high,
                            store: low,
                            j: low,
                        };
                        self.phase = Phase::ShowPivot;
                    }
                    None => self.phase = Phase::Finish,
                },
                Phase::ShowPivot => {
                    self.phase = Phase::Scan;
                    return Some(self.tape.snapshot(Marks::default().pivot(self.part.high)));
                }
                Phase::Scan => {
                    let Partition { high, j, .. } = self.part;
                    if j >= high {
                        self.phase = Phase::PlacePivot;
                        continue;
                    }
                    if self.tape.value(j) < self.tape.value(high) {
                        self.phase = Phase::Exchange;
                    } else {
                        self.part.j += 1;
                    }
                    return Some(
                        self.tape
                            .snapshot(Marks::default().comparing(&[j]).pivot(high)),
                    );
                }
                Phase::Exchange => {
                    let Partition { high, store, j, .. } = self.part;
                    self.tape.swap(store, j);
                    self.part.store += 1;
                    self.part.j += 1;
                    self.phase = Phase::Scan;
                    return Some(
                        self.tape
                            .snapshot(Marks::default().swapping(store, j).pivot(high)),
                    );
                }
                Phase::PlacePivot => {
                    let Partition {
                        low, high, store, ..
                    } = self.part;
                    self.tape.swap(store, high);

                    // Pushed in reverse so the left side comes off the stack first.
                    if store + 1 < high {
                        self.ranges.push((store + 1, high));
                    }
                    if store > low + 1 {
                        self.ranges.push((low, store - 1));
                    }
                    self.phase = Phase::NextRange;
                    return Some(self.tape.snapshot(Marks::default().swapping(store, high)));
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

impl std::iter::FusedIterator for QuickSteps {}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::{Highlight, StepKind};

    fn elements(values: &[u32]) -> Vec<Element> {
        values.iter().copied().map(Element::new).collect()
    }

    #[test]
    fn arbitrary_array() {
        let last = QuickSorter.steps(&elements(&[1, 5, 4, 2, 3])).last().unwrap();
        assert_eq!(last.values(), [1, 2, 3, 4, 5]);
        assert!(last.is_terminal());
    }

    #[test]
    fn first_partition_places_pivot() {
        let input = elements(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let mut steps = QuickSorter.steps(&input);

        let opening = steps.next().unwrap();
        assert_eq!(opening.pivot, Some(7));
        assert_eq!(opening.elements[7].highlight, Highlight::Pivot);

        let mut partition = Vec::new();
        for step in steps.by_ref() {
            let closing = step.swapping.is_some() && step.pivot.is_none();
            partition.push(step);
            if closing {
                break;
            }
        }

        for step in &partition {
            assert!(step.comparing.iter().all(|&i| i <= 7));
            if let Some((a, b)) = step.swapping {
                assert!(a <= 7 && b <= 7);
            }
        }

        // 7 scans, 6 values smaller than 6 are exchanged, then the pivot lands at 6.
        assert_eq!(partition.len(), 7 + 6 + 1);
        let closing = partition.last().unwrap();
        assert_eq!(closing.swapping, Some((6, 7)));

        let values = closing.values();
        assert_eq!(values[6], 6);
        assert!(values[..6].iter().all(|&v| v < 6));
        assert!(values[7..].iter().all(|&v| v >= 6));
    }

    #[test]
    fn pivot_never_moves_during_scan() {
        let first: Vec<_> = QuickSorter
            .steps(&elements(&[5, 2, 8, 1, 4]))
            .take_while(|s| s.pivot.is_some())
            .collect();
        // Pivot step, 4 scans and the exchanges of 2 and 1.
        assert_eq!(first.len(), 7);
        for step in &first {
            assert_eq!(step.pivot, Some(4));
            assert_eq!(step.values()[4], 4);
        }
    }

    #[test]
    fn lomuto_exchanges_even_in_place() {
        // Every value is below the pivot, so each scan is followed by a self-exchange.
        let steps: Vec<_> = QuickSorter.steps(&elements(&[1, 2, 3])).collect();
        let count = |kind| steps.iter().filter(|s| s.kind() == kind).count();
        assert_eq!(steps[1].comparing, vec![0]);
        assert_eq!(steps[2].swapping, Some((0, 0)));
        // [0, 2]: pivot, 2 scans, 2 exchanges, close. [0, 1]: pivot, 1 scan, 1 exchange, close.
        assert_eq!(count(StepKind::Pivot), 2);
        assert_eq!(count(StepKind::Comparison), 3);
        assert_eq!(count(StepKind::Swap), 5);
        assert_eq!(steps.len(), 11);
    }

    #[test]
    fn very_unsorted() {
        let input = elements(&(1..300).rev().collect::<Vec<_>>());
        let last = QuickSorter.steps(&input).last().unwrap();
        assert_eq!(last.values(), (1..300).collect::<Vec<_>>());
    }

    #[test]
    fn simple_edge_cases() {
        assert_eq!(QuickSorter.steps(&[]).count(), 1);
        assert_eq!(QuickSorter.steps(&elements(&[1])).count(), 1);

        let mut two = elements(&[2, 1]);
        QuickSorter.sort(&mut two);
        assert_eq!(two.iter().map(|e| e.value).collect::<Vec<_>>(), [1, 2]);

        let mut same = elements(&[4, 4, 4, 4]);
        QuickSorter.sort(&mut same);
        assert_eq!(same.iter().map(|e| e.value).collect::<Vec<_>>(), [4, 4, 4, 4]);
    }
}

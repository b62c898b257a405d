use orstviz_steps::{Element, Highlight, InputSource, Snapshot};

pub fn elements(values: &[u32]) -> Vec<Element> {
    values.iter().copied().map(Element::new).collect()
}

/// Seeded random inputs of every size up to and including `max_size`.
pub fn inputs(max_size: usize, seed: u64) -> Vec<Vec<Element>> {
    (0..=max_size)
        .map(|size| InputSource::seeded(size, seed + size as u64).elements().to_vec())
        .collect()
}

fn sorted_values(elements: &[Element]) -> Vec<u32> {
    let mut values: Vec<u32> = elements.iter().map(|e| e.value).collect();
    values.sort_unstable();
    values
}

/// Checks everything a single run over `input` must uphold, and panics with `label` otherwise.
pub fn assert_well_formed(label: &str, input: &[Element], steps: &[Snapshot]) {
    let n = input.len();
    let expected = sorted_values(input);

    assert!(!steps.is_empty(), "{label}: no snapshots");

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.len(), n, "{label}: step {i} changed the length");
        assert_eq!(
            sorted_values(&step.elements),
            expected,
            "{label}: step {i} is not a permutation of the input"
        );
        assert!(
            step.comparing.iter().all(|&c| c < n),
            "{label}: step {i} compares out of bounds"
        );
        if let Some((a, b)) = step.swapping {
            assert!(a < n && b < n, "{label}: step {i} swaps out of bounds");
        }
        if let Some(p) = step.pivot {
            assert!(p < n, "{label}: step {i} pivot out of bounds");
        }
        assert!(
            step.sorted.iter().all(|&s| s < n),
            "{label}: step {i} marks out of bounds"
        );
    }

    let last = steps.last().unwrap();
    assert_eq!(last.values(), expected, "{label}: final step is not sorted");
    assert!(
        last.elements.iter().all(|e| e.highlight == Highlight::Sorted),
        "{label}: final step is not fully marked"
    );
}

use orstviz_steps::{Algorithm, Element, Highlight, InputSource, Snapshot, StepKind};
use utilities::steps::{assert_well_formed, elements, inputs};

fn run(algorithm: Algorithm, input: &[Element]) -> Vec<Snapshot> {
    algorithm.steps(input).collect()
}

#[test]
fn every_run_is_well_formed() {
    for algorithm in Algorithm::ALL {
        for input in inputs(40, 9) {
            let label = format!("{algorithm} n={}", input.len());
            assert_well_formed(&label, &input, &run(algorithm, &input));
        }
    }
}

#[test]
fn awkward_inputs() {
    let cases = [
        elements(&[7, 7, 7, 7, 7]),
        elements(&[1, 2, 3, 4, 5, 6]),
        elements(&[6, 5, 4, 3, 2, 1]),
        elements(&[2, 1, 2, 1, 2, 1, 2]),
        elements(&[509, 10]),
    ];
    for algorithm in Algorithm::ALL {
        for input in &cases {
            assert_well_formed(&format!("{algorithm} {input:?}"), input, &run(algorithm, input));
        }
    }
}

#[test]
fn tiny_inputs_yield_one_terminal_snapshot() {
    for algorithm in Algorithm::ALL {
        let empty = run(algorithm, &[]);
        assert_eq!(empty.len(), 1, "{algorithm}");
        assert!(empty[0].is_empty());
        assert!(empty[0].is_terminal());

        let single = run(algorithm, &elements(&[42]));
        assert_eq!(single.len(), 1, "{algorithm}");
        assert_eq!(single[0].elements[0].highlight, Highlight::Sorted);
    }
}

#[test]
fn runs_are_deterministic_and_independent() {
    let input = InputSource::seeded(30, 77).elements().to_vec();
    for algorithm in Algorithm::ALL {
        let mut a = algorithm.steps(&input);
        let mut b = algorithm.steps(&input);

        // Advancing one run does not move the other.
        let head: Vec<_> = a.by_ref().take(5).collect();
        assert_eq!(head, b.by_ref().take(5).collect::<Vec<_>>(), "{algorithm}");
        assert_eq!(a.collect::<Vec<_>>(), b.collect::<Vec<_>>(), "{algorithm}");
    }
}

#[test]
fn exhausted_runs_stay_exhausted() {
    for algorithm in Algorithm::ALL {
        let mut steps = algorithm.steps(&elements(&[3, 1, 2]));
        for _ in steps.by_ref() {}
        assert!(steps.next().is_none(), "{algorithm}");
        assert!(steps.next().is_none(), "{algorithm}");
    }
}

#[test]
fn input_is_never_modified() {
    let input = elements(&[9, 4, 7, 1]);
    let copy = input.clone();
    for algorithm in Algorithm::ALL {
        let _ = run(algorithm, &input);
    }
    assert_eq!(input, copy);
}

#[test]
fn exactly_one_sorted_sweep_at_the_end() {
    // Only bubble, selection and heap mark elements final before the sweep.
    let input = InputSource::seeded(25, 5).elements().to_vec();
    for algorithm in [Algorithm::Merge, Algorithm::Quick, Algorithm::Insertion] {
        let steps = run(algorithm, &input);
        let sorted_steps = steps
            .iter()
            .filter(|s| s.kind() == StepKind::Sorted)
            .count();
        assert_eq!(sorted_steps, 1, "{algorithm}");
        assert_eq!(steps.last().unwrap().sorted.len(), input.len(), "{algorithm}");
    }
}

#[test]
fn highlights_follow_annotations() {
    let input = InputSource::seeded(20, 13).elements().to_vec();
    for algorithm in Algorithm::ALL {
        for step in run(algorithm, &input) {
            for &i in &step.comparing {
                if Some(i) != step.pivot && !matches!(step.swapping, Some((a, b)) if a == i || b == i)
                {
                    assert_eq!(step.elements[i].highlight, Highlight::Comparing, "{algorithm}");
                }
            }
            if let Some(p) = step.pivot {
                assert_eq!(step.elements[p].highlight, Highlight::Pivot, "{algorithm}");
            }
        }
    }
}

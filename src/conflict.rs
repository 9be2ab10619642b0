use crate::data::Exam;
use itertools::Itertools;
use log::trace;

/// Connects every pair of exams that share a time slot.
///
/// Existing conflict sets are cleared first, so running this twice over the
/// same list gives the same graph. Edges are stored on both endpoints.
pub fn build_conflict_graph(exams: &mut [Exam]) {
    for exam in exams.iter_mut() {
        exam.conflicts.clear();
    }

    let edges: Vec<(usize, usize)> = (0..exams.len())
        .tuple_combinations()
        .filter(|&(i, j)| exams[i].is_conflict(&exams[j]))
        .collect();

    for &(i, j) in &edges {
        let (a, b) = (exams[i].id, exams[j].id);
        exams[i].conflicts.insert(b);
        exams[j].conflicts.insert(a);
    }

    trace!(
        "Built conflict graph over {} exams with {} edges.",
        exams.len(),
        edges.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_slot_exams_conflict() {
        let mut exams = vec![
            Exam::new(0, "Math", "9AM"),
            Exam::new(1, "Physics", "9AM"),
            Exam::new(2, "Art", "2PM"),
        ];
        build_conflict_graph(&mut exams);

        assert_eq!(exams[0].conflicts.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(exams[1].conflicts.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(exams[2].conflicts.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_edges() {
        let mut exams: Vec<Exam> = Vec::new();
        build_conflict_graph(&mut exams);
        assert!(exams.is_empty());
    }

    #[test]
    fn test_rebuild_replaces_stale_edges() {
        let mut exams = vec![Exam::new(0, "Math", "9AM"), Exam::new(1, "Physics", "9AM")];
        build_conflict_graph(&mut exams);
        exams[1].time_slot = "2PM".to_string();
        build_conflict_graph(&mut exams);
        assert!(exams.iter().all(|e| e.conflicts.is_empty()));
    }

    #[test]
    fn test_uses_exam_ids_not_positions() {
        let mut exams = vec![Exam::new(7, "Math", "9AM"), Exam::new(3, "Physics", "9AM")];
        build_conflict_graph(&mut exams);
        assert!(exams[0].conflicts.contains(&3));
        assert!(exams[1].conflicts.contains(&7));
    }

    proptest! {
        #[test]
        fn prop_conflicts_match_slot_equality(slots in prop::collection::vec(0u8..4, 0..12)) {
            let mut exams: Vec<Exam> = slots
                .iter()
                .enumerate()
                .map(|(i, s)| Exam::new(i as u32, format!("exam{i}"), format!("slot{s}")))
                .collect();
            build_conflict_graph(&mut exams);

            for a in &exams {
                prop_assert!(!a.conflicts.contains(&a.id));
                for b in &exams {
                    if a.id == b.id {
                        continue;
                    }
                    let same = a.time_slot == b.time_slot;
                    prop_assert_eq!(a.conflicts.contains(&b.id), same);
                    prop_assert_eq!(a.conflicts.contains(&b.id), b.conflicts.contains(&a.id));
                }
            }
        }
    }
}

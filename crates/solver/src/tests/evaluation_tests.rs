use super::*;
use crate::BreadthFirstSearcher;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn summary_of_unsolved_depth_has_no_lengths() {
    let report = summarize(9, 4, Vec::new());
    assert_eq!(report.solved, 0);
    assert_eq!(report.mean_length, None);
    assert_eq!(report.median_length, None);
    assert_eq!(report.share_solved(), 0.0);
}

#[test]
fn summary_uses_middle_pair_for_even_counts() {
    let report = summarize(3, 5, vec![3, 1, 2, 4]);
    assert_eq!(report.solved, 4);
    assert_eq!(report.mean_length, Some(2.5));
    assert_eq!(report.median_length, Some(2.5));
    assert_eq!(report.share_solved(), 0.8);

    let odd = summarize(3, 3, vec![5, 1, 3]);
    assert_eq!(odd.median_length, Some(3.0));
}

#[test]
fn bfs_solves_every_shallow_game() {
    let evaluator = Evaluator::new(3, Duration::from_secs(10), vec![1, 2]);
    let mut rng = StdRng::seed_from_u64(9);
    let reports = evaluator.evaluate(&mut BreadthFirstSearcher, &mut rng);

    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.games, 3);
        assert_eq!(report.solved, 3, "depth {}", report.depth);
        assert!(report.mean_length.expect("mean") <= report.depth as f64);
    }
    let json = serde_json::to_value(&reports[0]).expect("json");
    assert_eq!(json["depth"], 1);
}

use parzen::bandit::Bandit;
use parzen::bandit::random::RandomBandit;
use parzen::{Configuration, History, ParamValue, TrialStatus};

use crate::{conditional_space, unit_space};

#[test]
fn test_random_bandit_returns_exactly_n_conforming() {
    let space = conditional_space();
    let bandit = RandomBandit::with_seed(space.clone(), 42);

    for n in [1, 7, 64] {
        let configs = bandit.suggest(&History::new(), n).unwrap();
        assert_eq!(configs.len(), n);
        for config in &configs {
            space.conforms(config).unwrap();
        }
    }
}

#[test]
fn test_random_bandit_ignores_history() {
    let space = unit_space();
    let mut history = History::new();
    let config: Configuration = [("x", ParamValue::Float(0.5))].into_iter().collect();
    history
        .record(&space, TrialStatus::Ok, &config, Some(0.0))
        .unwrap();

    let a = RandomBandit::with_seed(space.clone(), 5);
    let b = RandomBandit::with_seed(space, 5);
    assert_eq!(
        a.suggest(&history, 10).unwrap(),
        b.suggest(&History::new(), 10).unwrap()
    );
}

#[test]
fn test_random_bandit_activates_both_branches() {
    let bandit = RandomBandit::with_seed(conditional_space(), 123);
    let configs = bandit.suggest(&History::new(), 1000).unwrap();

    let with_lr = configs.iter().filter(|c| c.get("lr").is_some()).count();
    let with_depth = configs.iter().filter(|c| c.get("depth").is_some()).count();
    assert_eq!(with_lr + with_depth, 1000);
    assert!(
        (400..=600).contains(&with_lr),
        "lr active in {with_lr} of 1000 draws"
    );
}

#[test]
fn test_random_bandit_uniform_quartiles() {
    let bandit = RandomBandit::with_seed(unit_space(), 77);
    let mut xs: Vec<f64> = bandit
        .suggest(&History::new(), 1000)
        .unwrap()
        .iter()
        .filter_map(|c| c.get("x").and_then(ParamValue::as_f64))
        .collect();
    xs.sort_by(f64::total_cmp);

    let q1 = xs[250];
    let q3 = xs[750];
    assert!((q1 - 0.25).abs() < 0.1, "Q1 {q1} should be close to 0.25");
    assert!((q3 - 0.75).abs() < 0.1, "Q3 {q3} should be close to 0.75");
}

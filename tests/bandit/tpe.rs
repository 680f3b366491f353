use std::sync::Arc;

use parking_lot::Mutex;
use parzen::bandit::Bandit;
use parzen::bandit::tpe::{Phase, TpeBandit};
use parzen::estimator::{CompiledSpace, DensityEstimator, Posterior};
use parzen::event::SuggestEvent;
use parzen::{ConfigSet, Configuration, History, ParamValue, Result, SearchSpace, TrialStatus};

use crate::{conditional_space, unit_space};

fn x_of(config: &Configuration) -> f64 {
    config.get("x").and_then(ParamValue::as_f64).unwrap()
}

/// Records `n` prior draws scored by `(x - 0.3)^2`.
fn quadratic_history(space: &SearchSpace, n: usize, seed: u64) -> History {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut history = History::new();
    for _ in 0..n {
        let config = space.sample(&mut rng);
        let y = (x_of(&config) - 0.3).powi(2);
        history
            .record(space, TrialStatus::Ok, &config, Some(y))
            .unwrap();
    }
    history
}

/// Scores conditional-space trials: prefers optimizer 1 with a deep network.
fn conditional_history(space: &SearchSpace, n: usize) -> History {
    let mut rng = fastrand::Rng::with_seed(17);
    let mut history = History::new();
    for _ in 0..n {
        let config = space.sample(&mut rng);
        let y = match config.get("depth") {
            Some(ParamValue::Int(d)) => 8.0 - *d as f64,
            _ => 10.0,
        };
        history
            .record(space, TrialStatus::Ok, &config, Some(y))
            .unwrap();
    }
    history
}

#[test]
fn test_warmup_boundary() {
    let space = unit_space();
    let bandit = TpeBandit::builder(space.clone()).seed(1).build().unwrap();

    let history = quadratic_history(&space, 29, 2);
    assert_eq!(bandit.phase(history.n_ok()), Phase::Warmup);
    let configs = bandit.suggest(&history, 3).unwrap();
    assert_eq!(configs.len(), 3);
    assert!(!bandit.is_compiled());

    let history = quadratic_history(&space, 30, 2);
    assert_eq!(bandit.phase(history.n_ok()), Phase::ModelBased);
    let configs = bandit.suggest(&history, 3).unwrap();
    assert_eq!(configs.len(), 3);
    assert!(bandit.is_compiled());
}

#[test]
fn test_empty_history_warms_up() {
    let bandit = TpeBandit::builder(conditional_space()).build().unwrap();
    let configs = bandit.suggest(&History::new(), 5).unwrap();
    assert_eq!(configs.len(), 5);
}

#[test]
fn test_model_based_returns_exactly_n_conforming() {
    let space = conditional_space();
    let history = conditional_history(&space, 40);
    let bandit = TpeBandit::builder(space.clone())
        .seed(11)
        .n_ei_candidates(64)
        .build()
        .unwrap();

    for n in [1, 5, 100] {
        let configs = bandit.suggest(&history, n).unwrap();
        assert_eq!(configs.len(), n);
        for config in &configs {
            space.conforms(config).unwrap();
        }
    }
}

#[test]
fn test_model_based_favours_good_branch() {
    let space = conditional_space();
    let history = conditional_history(&space, 60);
    let bandit = TpeBandit::builder(space).seed(4).build().unwrap();

    let configs = bandit.suggest(&history, 10).unwrap();
    let deep = configs
        .iter()
        .filter(|c| matches!(c.get("depth"), Some(ParamValue::Int(d)) if *d >= 5))
        .count();
    assert!(deep >= 7, "only {deep} of 10 suggestions use a deep network");
}

#[test]
fn test_suggestions_beat_prior_on_quadratic() {
    let space = unit_space();
    let history = quadratic_history(&space, 40, 3);
    let bandit = TpeBandit::builder(space.clone()).seed(42).build().unwrap();

    let suggested = bandit.suggest(&history, 5).unwrap();
    assert_eq!(suggested.len(), 5);
    let tpe_dist = suggested.iter().map(|c| (x_of(c) - 0.3).abs()).sum::<f64>() / 5.0;

    let mut rng = fastrand::Rng::with_seed(42);
    let prior_dist = (0..5)
        .map(|_| (x_of(&space.sample(&mut rng)) - 0.3).abs())
        .sum::<f64>()
        / 5.0;

    assert!(
        tpe_dist < prior_dist,
        "tpe mean distance {tpe_dist} not below prior mean distance {prior_dist}"
    );
    assert!(tpe_dist < 0.2, "tpe mean distance {tpe_dist}");
}

#[test]
fn test_same_seed_same_suggestions() {
    let space = unit_space();
    let history = quadratic_history(&space, 35, 8);
    let a = TpeBandit::builder(space.clone()).seed(9).build().unwrap();
    let b = TpeBandit::builder(space).seed(9).build().unwrap();
    assert_eq!(
        a.suggest(&history, 4).unwrap(),
        b.suggest(&history, 4).unwrap()
    );
}

#[test]
fn test_suggest_sparse_matches_suggest() {
    let space = unit_space();
    let history = quadratic_history(&space, 30, 5);
    let a = TpeBandit::builder(space.clone()).seed(6).build().unwrap();
    let b = a.clone();

    let sparse = a.suggest_sparse(&history, 3).unwrap();
    assert_eq!(sparse.rows(), vec![0, 1, 2]);
    assert_eq!(
        space.to_configurations(&sparse).unwrap(),
        b.suggest(&history, 3).unwrap()
    );
}

#[test]
fn test_history_from_sparse_sets() {
    let space = unit_space();
    let set = ConfigSet::from_lists(
        vec![vec![0, 1, 2, 3]],
        vec![vec![
            ParamValue::Float(0.1),
            ParamValue::Float(0.3),
            ParamValue::Float(0.5),
            ParamValue::Float(0.9),
        ]],
    )
    .unwrap();
    let mut history = History::new();
    history
        .insert(TrialStatus::Ok, set, vec![0.04, 0.0, 0.04, 0.36])
        .unwrap();
    history
        .insert(TrialStatus::Failed, ConfigSet::empty(1), Vec::new())
        .unwrap();

    let bandit = TpeBandit::builder(space)
        .n_startup_jobs(4)
        .seed(3)
        .build()
        .unwrap();
    let set = bandit.suggest_sparse(&history, 2).unwrap();
    assert_eq!(set.n_rows(), 2);
}

#[test]
fn test_event_sequence_for_model_based_call() {
    let space = unit_space();
    let history = quadratic_history(&space, 30, 1);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let bandit = TpeBandit::builder(space)
        .seed(2)
        .event_sink({
            let seen = Arc::clone(&seen);
            move |e: &SuggestEvent| seen.lock().push(e.clone())
        })
        .build()
        .unwrap();
    bandit.suggest(&history, 2).unwrap();

    let kinds: Vec<&str> = seen
        .lock()
        .iter()
        .map(|e| match e {
            SuggestEvent::WarmingUp { .. } => "warmup",
            SuggestEvent::Threshold { .. } => "threshold",
            SuggestEvent::GoodScores(_) => "good",
            SuggestEvent::PendingIgnored { .. } => "ignored",
            SuggestEvent::PendingImputed { .. } => "imputed",
            SuggestEvent::DrawingCandidates { .. } => "drawing",
            SuggestEvent::BestScores(_) => "best",
        })
        .collect();
    assert_eq!(kinds, vec!["threshold", "good", "drawing", "best"]);
}

/// Draws every candidate at the centre of the unit interval.
struct Centre;

impl DensityEstimator for Centre {
    type Model = ();

    fn posterior(
        &self,
        prior: &CompiledSpace,
        observations: &ConfigSet,
        n_draws: usize,
        _rng: &mut fastrand::Rng,
    ) -> Result<Posterior<()>> {
        prior.check_dims(observations.n_dims(), "observations")?;
        let samples = ConfigSet::from_lists(
            vec![(0..n_draws).collect()],
            vec![vec![ParamValue::Float(0.5); n_draws]],
        )?;
        Ok(Posterior { model: (), samples })
    }

    fn log_likelihood(
        &self,
        _posterior: &Posterior<()>,
        _query: &ConfigSet,
        llik: Vec<f64>,
    ) -> Result<Vec<f64>> {
        Ok(llik)
    }
}

#[test]
fn test_custom_estimators_plug_in() {
    let space = unit_space();
    let history = quadratic_history(&space, 30, 4);
    let bandit = TpeBandit::builder(space)
        .estimators(Centre, Centre)
        .n_ei_candidates(8)
        .seed(1)
        .build()
        .unwrap();
    let configs = bandit.suggest(&history, 3).unwrap();
    assert_eq!(configs.len(), 3);
    for config in &configs {
        assert!((x_of(config) - 0.5).abs() < f64::EPSILON);
    }
}

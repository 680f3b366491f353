#![allow(clippy::cast_precision_loss)]

mod random;
mod tpe;

use parzen::{Distribution, SearchSpace};

/// An optimizer choice with a conditional learning rate and a conditional depth.
pub(crate) fn conditional_space() -> SearchSpace {
    let mut space = SearchSpace::new();
    space.add("optimizer", Distribution::categorical(2).unwrap()).unwrap();
    space
        .add_conditional(
            "lr",
            Distribution::float(1e-5, 1e-1, true).unwrap(),
            "optimizer",
            &[0],
        )
        .unwrap();
    space
        .add_conditional("depth", Distribution::int(1, 8, false).unwrap(), "optimizer", &[1])
        .unwrap();
    space
        .add("dropout", Distribution::float_stepped(0.0, 0.5, 0.1).unwrap())
        .unwrap();
    space
}

/// A single float dimension on [0, 1].
pub(crate) fn unit_space() -> SearchSpace {
    let mut space = SearchSpace::new();
    space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
    space
}

//! Scene documents: emitters, bursts and an effect schedule loaded from JSON.

pub mod model;

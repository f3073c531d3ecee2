//! Query catalogue for the bibliographic graph.

pub mod algorithms;
pub mod analytics;
pub mod evolve;
pub mod recommender;

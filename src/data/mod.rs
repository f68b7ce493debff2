pub mod franchise;
pub mod games;
pub mod matchup;

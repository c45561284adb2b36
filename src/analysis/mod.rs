//! Post-generation analysis of carved mazes

/// Passage, connectivity, and wall symmetry checks
pub mod topology;

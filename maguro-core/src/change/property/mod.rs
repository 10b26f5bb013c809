//! Property-based tests for the change-statistic engine.
//!
//! Verifies the incremental deltas against the evaluate-twice oracle across
//! randomly generated graphs, dyads, and the full term battery, and checks
//! that every measurement leaves the graph bit-identical.

mod oracle;
mod strategies;

//! End-to-end runs over real directory trees.

mod aggregated_mode;
mod failure_isolation;
mod scenario;
mod separate_mode;
mod support;

//! Step definitions for task board synchronisation scenarios.

mod when;
mod then;

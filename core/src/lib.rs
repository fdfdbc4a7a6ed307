//! ubisim-core: distributional microsimulation of UBI and child-allowance
//! policies over CPS ASEC SPM microdata.
//!
//! PIPELINE (fixed, documented, never reordered):
//!   1. Loader     — fetch the survey extract, normalize weights, derive age flags.
//!   2. Context    — aggregate persons into SPM units, fix population constants.
//!   3. Simulator  — pure scenario evaluation (funding level × demographic split).
//!   4. Sweep      — Cartesian grid of scenarios plus optimal-allocation tables.
//!   5. Legacy     — three-program comparison over a coarser spending range.
//!   6. Report     — gzipped CSV exports and the poverty-by-program chart.
//!
//! RULES:
//!   - The context is immutable after construction. Every scenario evaluation
//!     derives its own working vectors; nothing is shared between calls.
//!   - Population totals and the tax base are computed exactly once, at load.
//!   - All fallible paths return SimResult; the run is all-or-nothing.

pub mod config;
pub mod context;
pub mod error;
pub mod legacy;
pub mod loader;
pub mod metrics;
pub mod records;
pub mod report;
pub mod simulator;
pub mod sweep;

//! On-disk artifacts: pricing history, capability config, balance
//! snapshots. All IO here is best-effort; loads degrade to empty and
//! saves report failure without aborting the command.

pub(crate) mod history;
pub(crate) mod paths;

mod capabilities;
mod snapshot;

pub(crate) use capabilities::load_capability_index;
pub(crate) use snapshot::{BalanceSnapshot, build_snapshot, save_snapshot};

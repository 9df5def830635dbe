// ── Per-fabric category stores ──
//
// One map from fabric to bucket counts per category. Each store is
// consistent on its own; the aggregator coordinates them.

mod fixed;
mod open;
mod rows;
mod state;
mod state_file;

pub use fixed::FixedCategoryStore;
pub use open::{OpenCategoryStore, SENTINEL_BUCKET};
pub use rows::BucketRow;
pub use state::OverviewState;
pub use state_file::{StateFile, StateLock};

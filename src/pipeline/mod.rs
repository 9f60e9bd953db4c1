// Analysis pipelines.
//
// A single analysis runs date filter -> extraction -> aggregation for one
// condition. The concurrent runner fans comparison conditions out to
// blocking workers and joins them back in condition order.

pub mod analysis;
pub mod cancel;
pub mod concurrent;

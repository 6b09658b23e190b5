//! Collection build and reconciliation.

pub mod builder;
pub mod reconciler;

pub use builder::CollectionBuilder;
pub use reconciler::{MembershipDiff, Reconciler, diff_membership};

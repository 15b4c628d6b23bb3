// Path: crates/types/src/app/upgrade.rs
//! The pending software-upgrade plan record.

/// A software upgrade plan scheduled for a specific block height.
///
/// Tags follow the upgrade module's schema; tag 2 (a deprecated wall-clock
/// trigger) and tag 5 are never written by this workspace.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Plan {
    /// The name of the upgrade handler that will apply this plan.
    #[prost(string, tag = "1")]
    pub name: String,
    /// The block height at which the upgrade must be applied.
    #[prost(int64, tag = "3")]
    pub height: i64,
    /// Free-form metadata about the upgrade, such as release artifacts.
    #[prost(string, tag = "4")]
    pub info: String,
}

impl Plan {
    /// Creates a plan with empty `info`.
    pub fn new(name: impl Into<String>, height: i64) -> Self {
        Self {
            name: name.into(),
            height,
            info: String::new(),
        }
    }
}

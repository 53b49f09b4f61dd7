//! Profile definitions, inheritance resolution, and persisted state.
pub mod graph;
pub mod merge;
pub mod profiles;
pub mod state;
pub mod store;

pub use merge::MergedProfile;
pub use profiles::{CreateSpec, LinkSpec, Profile, TemplateSpec, Variable};
pub use state::StateFile;
pub use store::ProfileStore;

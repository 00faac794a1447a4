//! Function definitions and the collaborators that supply them

mod function;
mod loader;
mod remote;

pub use function::{FunctionDefinition, RemoteSnapshot, VpcSettings};
pub use loader::{load_project, Project, ProjectError, DEFAULT_NAME_TEMPLATE};
pub use remote::{NoRemoteState, RemoteStateSource, StateFile};

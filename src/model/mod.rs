mod blueprint;
mod connection;
mod module;
mod request;

pub use blueprint::{BLUEPRINT_VERSION, BlueprintMetadata, BlueprintModel};
pub use connection::ConnectionModel;
pub use module::{ModuleModel, ModuleRole};
pub use request::IdeaRequest;

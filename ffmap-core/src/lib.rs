pub mod artifacts;
pub mod error;
pub mod graph;
pub mod maintenance;
pub mod model;
pub mod nodedb;
pub mod nodelist;
pub mod report;
pub mod settings;
pub mod store;

pub use error::{ArtifactError, MaintenanceError, SettingsError, StoreError, UnknownRole};
pub use maintenance::{Maintainer, ModifyRequest};
pub use model::Role;
pub use report::{ModifyReport, RemoveReport};
pub use settings::{Overrides, Settings};

//! Share-or-save delivery of rendered images.

mod coordinator;
pub mod desktop;
mod host;
pub mod memory;
mod status;

pub use coordinator::{Delivery, ExportArtifact, ExportCoordinator};
pub use host::{
    ClipboardTarget, ExportHost, HostCapabilities, SaveTarget, ShareRequest, ShareTarget,
};
pub use status::{ExportStatus, InProgress, StatusBoard};

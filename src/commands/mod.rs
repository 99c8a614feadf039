//! Command implementations.

mod common;
mod publish_page;
mod show_version;
mod update_version;

pub use common::{
    Project,
    ProjectArgs,
    Snapshot,
    compute_snapshot,
    load_project,
};
pub use publish_page::{
    PublishPageArgs,
    TOKEN_ENV,
    publish_page,
    publish_page_with,
};
pub use show_version::{
    ShowVersionArgs,
    show_version,
};
pub use update_version::{
    UpdateVersionArgs,
    update_version,
};

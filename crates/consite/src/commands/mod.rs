//! CLI command implementations.

pub(crate) mod delete;
pub(crate) mod deploy;
pub(crate) mod download;
pub(crate) mod info;
pub(crate) mod init;

pub(crate) use delete::DeleteArgs;
pub(crate) use deploy::DeployArgs;
pub(crate) use download::DownloadArgs;
pub(crate) use info::InfoArgs;
pub(crate) use init::InitArgs;

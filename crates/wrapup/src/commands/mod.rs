//! CLI command implementations.

pub(crate) mod init;
pub(crate) mod show;

pub(crate) use init::InitArgs;
pub(crate) use show::ShowArgs;

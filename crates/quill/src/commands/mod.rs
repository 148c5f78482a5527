//! CLI command implementations.

pub(crate) mod gateway;
pub(crate) mod serve;

pub(crate) use gateway::GatewayCommand;
pub(crate) use serve::ServeArgs;

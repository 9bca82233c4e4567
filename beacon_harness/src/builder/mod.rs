/// Assembles the immutable per-run client configuration
pub mod client_config;
/// Wires collaborators and an example kernel into one awaitable run
pub mod runner_builder;

/// Prefabricated kernels for the common single-run cases. Implement
/// [`ExampleKernel`](crate::kernel::ExampleKernel) directly when a greater
/// degree of control is required.
pub mod client_task;

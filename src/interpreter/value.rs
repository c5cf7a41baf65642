/// Runtime values.
///
/// Defines the `Value` enum, its numeric view `Number`, truthiness, equality
/// and the display forms used by `print`.
pub mod core;
/// Variable environments.
///
/// Defines the flat `Environment` map that is snapshot-copied on every
/// function call.
pub mod environment;

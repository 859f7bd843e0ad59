/// Rendered certificate output.
pub mod certificate;
/// CPU renderer.
pub mod cpu;

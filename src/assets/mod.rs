/// Certificate background decoding.
pub mod template;
/// Font resolution and text shaping.
pub mod text;

pub mod job;
pub mod preset;
pub mod presetmap;

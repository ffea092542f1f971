pub mod group;
pub mod metadata;
pub mod rule;

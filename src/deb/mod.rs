pub mod archive;
pub mod control;
pub mod stage;

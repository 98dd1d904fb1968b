pub mod canvas;
pub mod fixtures;
pub mod visual_assertions;

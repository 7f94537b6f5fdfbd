pub use crate::artifact::*;
pub use crate::config::*;
pub use crate::floorplan::*;
pub use crate::template::*;

pub mod artifact;
pub mod config;
pub mod emit;
pub mod floorplan;
pub mod logger;
pub mod template;

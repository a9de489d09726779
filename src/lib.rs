// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod data;
pub mod fingerprint;
pub mod graph;
#[cfg(feature = "graph")]
pub mod graphviz;
pub mod level;
pub mod map;
pub mod parser;
pub mod search;
pub mod state;
pub mod vec2d;

mod fs;

use std::error::Error;
use std::path::Path;

use crate::level::Level;
use crate::search::{SearchErr, SearchOk};

pub use crate::search::INITIAL_PULL_DEPTH;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl<T: AsRef<Path>> LoadLevel for T {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        Ok(text.parse()?)
    }
}

pub trait Search {
    fn goal_states(&self, initial_depth: i32) -> Result<SearchOk, SearchErr>;
}

pub use actions::*;
pub use board::*;
pub use errors::*;
pub use game::*;
pub use pieces::*;
pub use scoring::*;
pub use territory::*;
pub use turn::*;
pub use types::*;
pub use visualization::*;

mod actions;
#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod errors;
mod game;
mod pieces;
mod scoring;
mod territory;
mod turn;
mod types;
mod visualization;

//! # Outline Assembly
//!
//! Turns tokenized page lines into a tree of bullet blocks.
//!
//! - **`markers`**: `Bullet` owns the `- ` / `  ` / `-` line markers
//! - **`types`**: `Outline` arena and its `OutlineNode`s
//! - **`builder`**: `OutlineBuilder` state machine that groups lines into blocks
//!   and places each block under the nearest shallower open block
//!
//! Indentation is strict: every line of a block must carry the same tab
//! indent as the bullet that opened it, otherwise assembly fails.

pub mod builder;
pub mod markers;
pub mod types;

pub use builder::{OutlineBuilder, assemble};
pub use markers::{Bullet, LineRole};
pub use types::{Outline, OutlineNode};

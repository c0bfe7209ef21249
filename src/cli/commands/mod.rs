//! Handlers for the one-shot CLI commands.

mod actors;
mod movies;
mod seed;

pub use actors::cmd_list_actors;
pub use movies::cmd_list_movies;
pub use seed::cmd_seed;

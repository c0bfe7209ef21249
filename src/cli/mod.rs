//! Command-line interface for Filmoteka.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filmoteka - movie catalog with reviews and star ratings
#[derive(Parser)]
#[command(name = "filmoteka")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Load categories, genres, people, movies, ratings and reviews from a TOML file
    Seed {
        /// Path to the fixture file
        path: PathBuf,
    },

    /// List published movies with their average star
    #[command(alias = "ls")]
    Movies,

    /// List all actors and directors
    Actors,
}

pub use commands::*;

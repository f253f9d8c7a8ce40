// The normal style for documenting modules is to place the doc-comments inside the module
// files at the top with `//!`, known as internal doc comments.
//
// However, this style better facilitates a guided exploration of the code, so it's the one
// we'll be using in this project.

/// Defines the optional arguments of the binary using [`clap`].
///
/// [`clap`]: https://github.com/clap-rs/clap/
pub mod config;

/// Loads the env file and snapshots the process environment into an explicit map,
/// so the checks never touch global state.
pub mod environment;

/// The database client seam: a trait for opening a connection and reading
/// `information_schema`, plus the Postgres implementation built on SQLx.
pub mod catalog;

/// The checks themselves: the encryption key and the `api_keys` table.
pub mod checks;

/// Runs the checks in order, prints the report and works out the exit code.
pub mod report;

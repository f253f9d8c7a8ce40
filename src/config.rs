use std::path::PathBuf;

/// The configuration parameters for the preflight run.
///
/// Nothing here is required; running the binary with no arguments checks `.env.local`
/// in the current directory and the `api_keys` table.
#[derive(clap::Parser, Debug)]
#[clap(name = "api-key-preflight", about = "Checks the prerequisites for saving API keys")]
pub struct Config {
    /// The env file to load before running the checks.
    ///
    /// A missing file is not an error, the checks just see the process environment.
    #[clap(long, env = "PREFLIGHT_ENV_FILE", default_value = ".env.local")]
    pub env_file: PathBuf,

    /// The table the database check expects to find.
    #[clap(long, env = "PREFLIGHT_TABLE", default_value = "api_keys")]
    pub table: String,
}

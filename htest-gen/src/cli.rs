//! Command-line interface definitions for `htest-gen`.

use camino::Utf8PathBuf;
use clap::Parser;
use htest_gen::config::CliOverrides;
use htest_gen::vocabulary::Profile;

/// Parsed CLI arguments for `htest-gen`.
#[derive(Debug, Parser)]
#[command(name = "htest-gen")]
#[command(about = "Generates unit test registration sources for C++ test files")]
#[command(
    after_help = "Example: htest-gen hltypes ../../unittest",
    version
)]
pub struct Args {
    /// Name of the library. When omitted, each source's namespace marker is used.
    #[arg(value_name = "LIB_NAME")]
    pub lib_name: Option<String>,
    /// Directory holding the unit test sources [default: ../../unittest].
    #[arg(value_name = "SOURCE_PATH")]
    pub source_dir: Option<Utf8PathBuf>,
    /// Marker vocabulary to scan for and emit.
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,
    /// Configuration file to load instead of `htest-gen.toml`.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
}

impl Args {
    /// Returns the values supplied on the command line as the top
    /// configuration layer.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            profile: self.profile,
            source_dir: self.source_dir.clone(),
            lib_name: self.lib_name.clone(),
        }
    }
}

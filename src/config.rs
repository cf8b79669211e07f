//! Command-line options.
//!
//! The sweep itself is fixed at compile time; options only choose how the
//! results are presented. Arguments that are not options are skipped with a
//! warning, so any invocation still runs the sweep and exits 0.

use crate::utils::Layout;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub layout: Layout,
    /// Skip the stderr banner
    pub quiet: bool,
    pub show_help: bool,
    /// Arguments that were not recognised and had no effect
    pub ignored: Vec<String>,
}

impl Options {
    /// Parse arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();

        for arg in args {
            match arg.as_ref() {
                "--accumulate" | "-a" => options.layout = Layout::Accumulated,
                "--quiet" | "-q" => options.quiet = true,
                "--help" | "-h" => options.show_help = true,
                other => {
                    log::warn!("ignoring unknown argument '{}'", other);
                    options.ignored.push(other.to_string());
                }
            }
        }

        options
    }
}

//! Version information

use crate::cli::Output;

/// Execute the version command
pub fn execute(output: &Output) {
    output.header(&format!("{} v{}", crate::PKG_NAME, crate::VERSION));
    output.info(crate::PKG_DESCRIPTION);
}

//! The conversion command: `_headers` in, `firebase.json` updated in place

use std::path::Path;

use tracing::debug;

use fireheaders_content::{HostingConfig, parse_rules};

use crate::error::Result;

/// Read the `_headers` file, rebuild the managed region of the firebase
/// configuration, and write the document back. Returns the number of
/// rules inserted.
pub fn run_convert(headers_path: &Path, firebase_path: &Path) -> Result<usize> {
    let headers_text = fireheaders_fs::read_text(headers_path)?;
    let rules = parse_rules(&headers_text)?;
    debug!(count = rules.len(), "parsed header rules");

    let firebase_text = fireheaders_fs::read_text(firebase_path)?;
    let mut config = HostingConfig::parse(&firebase_text, firebase_path)?;
    let inserted = config.apply_rules(&rules)?;
    debug!(inserted, indent = ?config.indent_unit(), "replaced managed region");

    fireheaders_fs::write_text(firebase_path, &config.render())?;
    Ok(inserted)
}

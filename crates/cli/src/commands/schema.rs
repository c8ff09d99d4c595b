use std::io::{self, Write};

use quark_core::table::PLUGIN;

pub fn print_schema() -> Result<(), Box<dyn std::error::Error>> {
    let schema = serde_json::to_string_pretty(&PLUGIN.schema())?;
    match writeln!(io::stdout().lock(), "{schema}") {
        Err(error) if error.kind() != io::ErrorKind::BrokenPipe => Err(error.into()),
        _ => Ok(()),
    }
}

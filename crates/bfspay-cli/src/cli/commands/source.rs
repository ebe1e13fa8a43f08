//! `bfspay source` – print the source string a checksum is computed over.

use anyhow::Result;
use bfspay_core::checksum::{self, FieldLayout};

use super::input::read_fields;

pub fn run_source(layout: FieldLayout, input: &str) -> Result<()> {
    let fields = read_fields(input)?;
    println!("{}", checksum::source_string(&layout, &fields)?);
    Ok(())
}

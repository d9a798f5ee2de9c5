use anyhow::Result;

use primer_math::stats::{describe, Summary};

use crate::util::parse_values;

pub fn run_describe<S: AsRef<str>>(raw: &[S]) -> Result<Summary> {
    let values = parse_values(raw)?;
    log::debug!("Describing {} values", values.len());
    Ok(describe(&values)?)
}

//! `footfall count`: the server's answer, computed locally.

use chrono::NaiveDate;

use footfall_core::CountResponse;
use footfall_core::log::DATE_FORMAT;

use crate::cli::{CountArgs, GlobalOpts};
use crate::error::CliError;
use crate::server::Today;

fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| CliError::Validation {
        field: "date".into(),
        reason: format!("{e}: expected YYYY-MM-DD, got '{s}'"),
    })
}

pub fn handle(args: &CountArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let source = super::log_source(&args.log, &cfg.server.log)?;

    let today = match &args.date {
        Some(s) => Today::Fixed(parse_date(s)?),
        None => Today::Local,
    };
    let date = today.date();

    let count = source.count_for(date)?;
    println!(
        "{}",
        serde_json::to_string(&CountResponse { value: count.get() })?
    );
    Ok(())
}

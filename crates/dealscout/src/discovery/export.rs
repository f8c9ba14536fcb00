use super::buyers::scoring::ScoredBuyer;

/// Rows beyond this cap are dropped from advisor-facing exports.
pub const EXPORT_ROW_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize export row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("export buffer was not valid UTF-8: {0}")]
    Buffer(#[from] std::string::FromUtf8Error),
}

/// Serialize the first 50 entries of an ordered result list as the
/// advisor-facing CSV download.
pub fn ranked_results_csv(results: &[ScoredBuyer]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "name",
        "kind",
        "location",
        "sector",
        "revenue",
        "match_score",
    ])?;

    for scored in results.iter().take(EXPORT_ROW_LIMIT) {
        let buyer = &scored.buyer;
        writer.write_record([
            buyer.name.as_str(),
            buyer.kind().label(),
            buyer.headquarters_country.as_str(),
            buyer.sector_text.as_str(),
            format_revenue(buyer.annual_revenue_usd).as_str(),
            scored.composite_score.to_string().as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|failure| ExportError::Io(failure.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// `$X.XXM` with two decimals; a missing figure renders as an empty cell so
/// absent data is not mistaken for a zero-revenue buyer.
fn format_revenue(revenue_usd: Option<u64>) -> String {
    match revenue_usd {
        Some(value) => format!("${:.2}M", value as f64 / 1_000_000.0),
        None => String::new(),
    }
}

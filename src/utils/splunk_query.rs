/// Returned instead of a query when nothing was extracted.
pub const NO_INDICATORS_MESSAGE: &str = "No indicators found.";

/// Builds a Splunk search that matches any of the given indicators.
/// Values are quoted as-is; callers pass hex strings only.
pub fn generate_splunk_query(indicators: &[String]) -> String {
    if indicators.is_empty() {
        return NO_INDICATORS_MESSAGE.to_string();
    }

    let quoted: Vec<String> = indicators
        .iter()
        .map(|ioc| format!("\"{}\"", ioc))
        .collect();

    format!("index=* sourcetype=* ({})", quoted.join(" OR "))
}

pub mod indicators;
pub mod pdf;
pub mod splunk_query;

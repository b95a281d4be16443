use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct InventoryRecord {
    pub(crate) line: usize,
    pub(crate) source: String,
    pub(crate) available: String,
    pub(crate) retention_days: Option<String>,
    pub(crate) timestamp_sync: Option<String>,
    pub(crate) volume: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<InventoryRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut records = Vec::new();

    while csv_reader.read_record(&mut record)? {
        // Quoted cells may span lines, so the record's own start line is used.
        let line = record
            .position()
            .map_or(records.len() + 2, |position| position.line() as usize);
        let row: InventoryRow = record.deserialize(Some(&headers))?;
        records.push(InventoryRecord {
            line,
            source: row.source,
            available: row.available,
            retention_days: row.retention_days,
            timestamp_sync: row.timestamp_sync,
            volume: row.volume,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct InventoryRow {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Available")]
    available: String,
    #[serde(
        rename = "Retention Days",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    retention_days: Option<String>,
    #[serde(
        rename = "Timestamp Sync",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    timestamp_sync: Option<String>,
    #[serde(rename = "Volume", default, deserialize_with = "empty_string_as_none")]
    volume: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_columns_may_be_blank_or_absent() {
        let data = "Source,Available,Retention Days\n Syslog , yes ,\nEDR,no,30\n";

        let records = parse_records(data.as_bytes()).expect("parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Syslog");
        assert_eq!(records[0].available, "yes");
        assert_eq!(records[0].retention_days, None);
        assert_eq!(records[0].timestamp_sync, None);
        assert_eq!(records[1].line, 3);
        assert_eq!(records[1].retention_days.as_deref(), Some("30"));
    }

    #[test]
    fn lines_account_for_multiline_cells() {
        let data = "Source,Available\n\"Windows\nEvent Logs\",yes\nEDR,no\n";

        let records = parse_records(data.as_bytes()).expect("parses");

        assert_eq!(records[0].source, "Windows\nEvent Logs");
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 4);
    }
}

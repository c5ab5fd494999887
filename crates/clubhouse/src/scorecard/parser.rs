use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct CardRow {
    pub(crate) hole: u8,
    pub(crate) par: u8,
    pub(crate) strokes: u8,
    pub(crate) putts: u8,
    pub(crate) fairway_hit: bool,
    pub(crate) green_in_regulation: bool,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CardRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawRow>() {
        let raw = record?;
        rows.push(CardRow {
            hole: raw.hole,
            par: raw.par,
            strokes: raw.strokes,
            putts: raw.putts.unwrap_or(0),
            fairway_hit: raw.fairway.as_deref().map(parse_flag).unwrap_or(false),
            green_in_regulation: raw.gir.as_deref().map(parse_flag).unwrap_or(false),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Hole")]
    hole: u8,
    #[serde(rename = "Par")]
    par: u8,
    #[serde(rename = "Strokes")]
    strokes: u8,
    #[serde(rename = "Putts", default, deserialize_with = "empty_as_none")]
    putts: Option<u8>,
    #[serde(rename = "Fairway", default)]
    fairway: Option<String>,
    #[serde(rename = "GIR", default)]
    gir: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub(super) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "true" | "1" | "x"
    )
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct AnswerRecord {
    pub(crate) submission_id: String,
    pub(crate) profile_id: String,
    pub(crate) department: String,
    pub(crate) question_code: String,
    pub(crate) value: String,
    pub(crate) started_at: Option<NaiveDateTime>,
    pub(crate) completed_at: Option<NaiveDateTime>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<AnswerRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<AnswerRow>() {
        let row = record?;
        let started_at = row.started_at.as_deref().and_then(parse_datetime);
        let completed_at = row.completed_at.as_deref().and_then(parse_datetime);

        records.push(AnswerRecord {
            submission_id: row.submission_id,
            profile_id: row.profile_id,
            department: row.department,
            question_code: row.question_code,
            value: row.value.unwrap_or_default(),
            started_at,
            completed_at,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Submission ID")]
    submission_id: String,
    #[serde(rename = "Profile ID")]
    profile_id: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Question Code")]
    question_code: String,
    #[serde(rename = "Value", default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
    #[serde(
        rename = "Started At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    started_at: Option<String>,
    #[serde(
        rename = "Completed At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}

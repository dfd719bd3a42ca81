use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

/// `d/m/yyyy @ h:m:s`, unpadded.
pub fn display_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{}/{}/{} @ {}:{}:{}",
        at.day(),
        at.month(),
        at.year(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

pub fn local_time(at: DateTime<Utc>) -> String {
    display_time(&at.with_timezone(&Local))
}

pub fn now() -> String {
    display_time(&Local::now())
}

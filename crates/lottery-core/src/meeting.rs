use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};

/// Next `weekday` at `hour:00` strictly after today.
///
/// When today already is `weekday` the meeting lands a full week out, so a
/// lottery run on the meeting day never schedules a lunch that same day.
pub fn next_meeting(now: DateTime<Utc>, weekday: Weekday, hour: u32) -> DateTime<Utc> {
    let today = now.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut days_ahead = (target - today).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }
    let date = now.date_naive() + Duration::days(days_ahead);
    let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(time))
}

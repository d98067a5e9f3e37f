use chrono::{Duration, NaiveDateTime, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// Clock supplies the current time to the workflows
pub(crate) trait Clock: Sync + Send {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

// whole days between due date and now, rounded up; zero when not late
pub(crate) fn days_late(due_date: NaiveDateTime, now: NaiveDateTime) -> i64 {
    if now <= due_date {
        return 0;
    }
    let late = now - due_date;
    let whole = late.num_days();
    if late > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn parse_date(str_time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match chrono::DateTime::parse_from_rfc3339(str_time) {
        Ok(date) => Ok(date.naive_utc()),
        Err(_) => NaiveDateTime::parse_from_str(str_time, DATE_FMT),
    }
}

fn time_to_json(t: NaiveDateTime) -> String {
    chrono::DateTime::<Utc>::from_naive_utc_and_offset(t, Utc).to_rfc3339()
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{parse_date, time_to_json};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{parse_date, time_to_json};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(time_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(str_time) => parse_date(&str_time).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use chrono::{Duration, NaiveDateTime, Utc};
    use crate::utils::date::Clock;

    // FixedClock only moves when the test advances it
    #[derive(Debug)]
    pub(crate) struct FixedClock {
        now: Mutex<NaiveDateTime>,
    }

    impl FixedClock {
        pub(crate) fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now().naive_utc()),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            if let Ok(mut now) = self.now.lock() {
                *now += by;
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.now.lock().map(|now| *now).unwrap_or_else(|_| Utc::now().naive_utc())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDateTime, Utc};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{days_late, opt_serializer, round_cents, serializer};

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
        #[serde(with = "opt_serializer")]
        maybe: Option<NaiveDateTime>,
    }

    #[tokio::test]
    async fn test_should_count_days_late() {
        let due = Utc::now().naive_utc();
        assert_eq!(0, days_late(due, due));
        assert_eq!(0, days_late(due, due - Duration::days(2)));
        assert_eq!(1, days_late(due, due + Duration::seconds(1)));
        assert_eq!(1, days_late(due, due + Duration::days(1)));
        assert_eq!(2, days_late(due, due + Duration::days(1) + Duration::minutes(1)));
        assert_eq!(20, days_late(due, due + Duration::days(20)));
    }

    #[tokio::test]
    async fn test_should_round_cents() {
        assert_eq!(10.0, round_cents(20.0 * 0.5));
        assert_eq!(0.33, round_cents(0.333333));
        assert_eq!(1.5, round_cents(3.0 * 0.5));
    }

    #[tokio::test]
    async fn test_should_serialize_dates() {
        let stamp = Stamp { at: Utc::now().naive_utc(), maybe: None };
        let json = serde_json::to_string(&stamp).expect("should serialize");
        assert!(json.contains("\"maybe\":null"));
        let parsed: Stamp = serde_json::from_str(&json).expect("should parse");
        assert_eq!(stamp.at, parsed.at);
        assert_eq!(None, parsed.maybe);

        let legacy: Stamp = serde_json::from_str(
            "{\"at\":\"2022-09-24T04:40:35.726029\",\"maybe\":\"2022-09-24T04:40:35+00:00\"}").expect("should parse legacy");
        assert!(legacy.maybe.is_some());
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::cache::token::{Token, TokenWire, WireTimeFormat};
    use crate::error::TokenError;

    #[test]
    fn zero_lifetime_collapses_the_window() {
        let now = Utc::now();
        let token = Token::new(Duration::zero(), now, Duration::minutes(3));
        assert_eq!(token.not_before, token.not_after);
        assert_eq!(token.not_before, now - Duration::minutes(3));
    }

    #[test]
    fn lifetime_beyond_skew_ends_in_the_future() {
        let now = Utc::now();
        let token = Token::new(Duration::minutes(100), now, Duration::minutes(3));
        assert!(token.not_after > now);
        assert_eq!(token.not_after - token.not_before, Duration::minutes(100));
    }

    #[test]
    fn skew_shifts_both_ends() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 10, 4, 59).unwrap();
        let token = Token::new(Duration::minutes(60), now, Duration::minutes(3));
        assert_eq!(token.not_before, now - Duration::minutes(3));
        assert_eq!(token.not_after, now + Duration::minutes(57));
    }

    #[test]
    fn wire_round_trip_at_second_precision() {
        let format = WireTimeFormat::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 10, 4, 59).unwrap();
        let token = Token::new(Duration::minutes(60), now, Duration::minutes(3));

        let wire = token.to_wire(&format);
        assert_eq!(wire.not_before, "20240517T100159Z");
        assert_eq!(wire.not_after, "20240517T110159Z");

        let parsed = wire.parse(&format).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn subsecond_precision_is_dropped_on_the_wire() {
        let format = WireTimeFormat::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 10, 4, 59).unwrap()
            + Duration::milliseconds(750);
        let token = Token::new(Duration::minutes(60), now, Duration::zero());

        let parsed = token.to_wire(&format).parse(&format).unwrap();
        assert_eq!(parsed.not_before, now - Duration::milliseconds(750));
    }

    #[test]
    fn foreign_format_fails_to_parse() {
        let format = WireTimeFormat::default();
        // RFC3339 timestamps, not the canonical compact form
        let wire = TokenWire {
            not_before: "2024-05-17T10:01:59Z".to_string(),
            not_after: "2024-05-17T11:01:59Z".to_string(),
        };
        assert!(matches!(
            wire.parse(&format),
            Err(TokenError::WireTime { .. })
        ));
    }

    #[test]
    fn custom_format_round_trips() {
        let format = WireTimeFormat::new("%Y-%m-%dT%H:%M:%SZ");
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 10, 4, 59).unwrap();
        let token = Token::new(Duration::minutes(10), now, Duration::zero());

        let wire = token.to_wire(&format);
        assert_eq!(wire.not_before, "2024-05-17T10:04:59Z");
        assert_eq!(wire.parse(&format).unwrap(), token);
    }
}

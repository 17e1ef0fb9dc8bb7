use proptest::prelude::*;
use theme::calendar::{is_winter_season_at, is_year_transition_at};
use theme::color::{Rgb, shade};
use theme::validation::{AccentValidator, Validator};

fn hex_color() -> impl Strategy<Value = String> {
    "#[0-9a-fA-F]{6}"
}

#[cfg(test)]
mod shade_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_zero_percent_is_identity(color in hex_color()) {
            let shaded = shade(&color, 0).unwrap();
            prop_assert_eq!(shaded, color.to_lowercase());
        }

        #[test]
        fn test_minus_hundred_is_black(color in hex_color()) {
            prop_assert_eq!(shade(&color, -100).unwrap(), "#000000");
        }

        #[test]
        fn test_output_is_well_formed(color in hex_color(), percent in -300i32..300) {
            let shaded = shade(&color, percent).unwrap();

            prop_assert_eq!(shaded.len(), 7);
            prop_assert!(shaded.starts_with('#'));
            prop_assert!(shaded[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        #[test]
        fn test_darkening_never_brightens(color in hex_color(), percent in -100i32..=0) {
            let original = Rgb::parse(&color).unwrap();
            let shaded = original.shade(percent);

            prop_assert!(shaded.r <= original.r);
            prop_assert!(shaded.g <= original.g);
            prop_assert!(shaded.b <= original.b);
        }

        #[test]
        fn test_surrounding_whitespace_is_ignored(
            color in hex_color(),
            pad in "[ \t]{0,3}",
            percent in -50i32..50
        ) {
            let padded = format!("{pad}{color}{pad}");
            prop_assert_eq!(shade(&padded, percent).unwrap(), shade(&color, percent).unwrap());
        }

        #[test]
        fn test_wrong_length_is_rejected(digits in "[0-9a-f]{0,12}") {
            prop_assume!(digits.len() != 6);
            let input = format!("#{digits}");
            prop_assert!(shade(&input, 10).is_err());
        }
    }
}

#[cfg(test)]
mod calendar_property_tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveDateTime};

    // Every date of 2025, addressed by day of year.
    fn moment(ordinal: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_yo_opt(2025, ordinal)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    proptest! {
        #[test]
        fn test_winter_only_in_late_december(ordinal in 1u32..=365, hour in 0u32..24) {
            let now = moment(ordinal, hour, 0);
            let expected = now.month() == 12 && (24..=27).contains(&now.day());
            prop_assert_eq!(is_winter_season_at(now), expected);
        }

        #[test]
        fn test_year_transition_spans_two_hours(
            ordinal in 1u32..=365,
            hour in 0u32..24,
            minute in 0u32..60
        ) {
            let now = moment(ordinal, hour, minute);
            let expected = (now.month() == 12 && now.day() == 31 && hour == 23)
                || (now.month() == 1 && now.day() == 1 && hour == 0);
            prop_assert_eq!(is_year_transition_at(now), expected);
        }

        #[test]
        fn test_new_years_eve_only_last_hour(hour in 0u32..24, minute in 0u32..60) {
            let now = moment(365, hour, minute);
            prop_assert_eq!(is_year_transition_at(now), hour == 23);
        }
    }
}

#[cfg(test)]
mod accent_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_identifier_like_accents_are_accepted(accent in "[a-zA-Z_][a-zA-Z0-9_-]{0,30}") {
            prop_assume!(accent != "dark");
            prop_assert!(AccentValidator.validate(accent.as_str()).is_ok());
        }

        #[test]
        fn test_whitespace_is_rejected(head in "[a-z]{1,5}", tail in "[a-z]{1,5}") {
            let accent = format!("{head} {tail}");
            prop_assert!(AccentValidator.validate(accent.as_str()).is_err());
        }
    }
}

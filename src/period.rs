/// Spells out a number of months as years and months, e.g. "2 years and 1 month".
/// Zero months gives an empty phrase.
pub fn format_period(months: u32) -> String {
    let years = months / 12;
    let months = months % 12;

    let mut parts = Vec::with_capacity(2);
    match years {
        0 => {}
        1 => parts.push("1 year".to_string()),
        n => parts.push(format!("{} years", n)),
    }
    match months {
        0 => {}
        1 => parts.push("1 month".to_string()),
        n => parts.push(format!("{} months", n)),
    }
    parts.join(" and ")
}

#[cfg(test)]
mod tests {
    use super::format_period;
    use test_log::test;

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(0), "");
        assert_eq!(format_period(1), "1 month");
        assert_eq!(format_period(5), "5 months");
        assert_eq!(format_period(12), "1 year");
        assert_eq!(format_period(13), "1 year and 1 month");
        assert_eq!(format_period(24), "2 years");
        assert_eq!(format_period(25), "2 years and 1 month");
        assert_eq!(format_period(139), "11 years and 7 months");
    }
}

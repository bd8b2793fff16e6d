//! Display formatting in the shop's locale (pt-BR).

use chrono::NaiveDate;

/// `30.0` -> `R$ 30,00`, `1234.5` -> `R$ 1.234,50`.
pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}R$ {},{:02}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

/// Format 10 or 11 digit phone numbers as `(dd) dddd-dddd` / `(dd) ddddd-dddd`.
/// Anything else is returned unchanged.
pub fn phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 | 11 => {
            let (area, rest) = digits.split_at(2);
            let (first, last) = rest.split_at(rest.len() - 4);
            format!("({}) {}-{}", area, first, last)
        }
        _ => raw.to_string(),
    }
}

/// `dd/MM/yyyy`
pub fn date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Date with weekday, used in headers: `Tue, 20/10/2026`.
pub fn date_long(date: NaiveDate) -> String {
    date.format("%a, %d/%m/%Y").to_string()
}

/// Leading `HH:MM` of a time string such as `09:00:00`.
pub fn hour(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// `12.5` -> `12,5%`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(30.0), "R$ 30,00");
        assert_eq!(money(25.5), "R$ 25,50");
        assert_eq!(money(1234.5), "R$ 1.234,50");
        assert_eq!(money(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(money(0.0), "R$ 0,00");
        assert_eq!(money(-5.0), "-R$ 5,00");
    }

    #[test]
    fn test_phone() {
        assert_eq!(phone("18999990000"), "(18) 99999-0000");
        assert_eq!(phone("(18)99999-0000"), "(18) 99999-0000");
        assert_eq!(phone("1833334444"), "(18) 3333-4444");
        assert_eq!(phone("12345"), "12345");
    }

    #[test]
    fn test_date_and_hour() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(date(d), "20/10/2026");
        assert_eq!(hour("09:00:00"), "09:00");
        assert_eq!(hour("9h"), "9h");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.5), "12,5%");
        assert_eq!(percent(0.0), "0,0%");
    }
}

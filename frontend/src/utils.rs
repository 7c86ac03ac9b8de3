use crate::models::Trend;

// Formats each x1000 step
pub fn format_number(number: u64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn format_trend(trend: &Trend) -> String {
    match trend {
        Trend::Up(delta) => format!(" 📈(+{})", format_number(*delta)),
        Trend::Down(delta) => format!(" 📉(-{})", format_number(*delta)),
        Trend::Unchanged => String::new(),
    }
}

pub fn format_count_line(label: &str, count: u64, trend: &Trend) -> String {
    format!("{label}: {}{}", format_number(count), format_trend(trend))
}

pub fn format_time_since(iso_date: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    let Ok(date) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() else {
        return String::from("never");
    };

    let seconds = now.signed_duration_since(date).num_seconds().max(0);
    if seconds < 60 {
        return format!("{}s ago", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m {}s ago", minutes, seconds % 60);
    }

    format!("{}h {}m ago", minutes / 60, minutes % 60)
}

pub fn progress_bar_style(progress: f64, color: [u8; 3]) -> String {
    let percent = (progress.clamp(0.0, 1.0) * 100.0).round();
    format!(
        "width: {}%; background-color: rgb({},{},{});",
        percent, color[0], color[1], color[2]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn renders_trend_arrows() {
        assert_eq!(format_trend(&Trend::Up(50)), " 📈(+50)");
        assert_eq!(format_trend(&Trend::Down(20)), " 📉(-20)");
        assert_eq!(format_trend(&Trend::Unchanged), "");
        assert_eq!(
            format_count_line("👀 Views", 1_500, &Trend::Up(1_200)),
            "👀 Views: 1,500 📈(+1,200)"
        );
    }

    #[test]
    fn relative_time() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time_since("2024-01-01T11:59:30+00:00", now), "30s ago");
        assert_eq!(format_time_since("2024-01-01T11:58:55+00:00", now), "1m 5s ago");
        assert_eq!(format_time_since("2024-01-01T09:30:00+00:00", now), "2h 30m ago");
        assert_eq!(format_time_since("garbage", now), "never");
    }

    #[test]
    fn progress_style_clamps() {
        assert_eq!(
            progress_bar_style(0.5, [0, 145, 235]),
            "width: 50%; background-color: rgb(0,145,235);"
        );
        assert_eq!(
            progress_bar_style(2.0, [0, 170, 255]),
            "width: 100%; background-color: rgb(0,170,255);"
        );
    }
}

//! Configuration entries and type-aware value formatting

/// Placeholder shown when an option has no resolvable value.
pub const NONE_PLACEHOLDER: &str = "<none>";

const SIZE_UNITS: [(u64, &str); 5] = [
    (1 << 40, " TB"),
    (1 << 30, " GB"),
    (1 << 20, " MB"),
    (1 << 10, " KB"),
    (1, " B"),
];

const TIME_UNITS: [(u64, &str); 4] = [
    (86400, "day"),
    (3600, "hour"),
    (60, "minute"),
    (1, "second"),
];

/// Declared types that get display formatting. Unrecognized tags fall
/// into `Other` and pass values through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Boolean,
    DataSize,
    TimeInterval,
    Other,
}

impl OptionType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Boolean" => Self::Boolean,
            "DataSize" => Self::DataSize,
            "TimeInterval" => Self::TimeInterval,
            _ => Self::Other,
        }
    }
}

/// One row of the panel. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub option: String,
    pub value: String,
    pub type_tag: String,
    /// Reserved; currently always empty.
    pub description: String,
}

impl ConfigEntry {
    pub fn new(option: String, value: String, type_tag: String) -> Self {
        Self {
            option,
            value,
            type_tag,
            description: String::new(),
        }
    }
}

/// Map a resolved raw value to its display form. `None` means the
/// option had no resolvable value.
pub fn display_value(raw: Option<&str>, ty: OptionType) -> String {
    match raw {
        None => NONE_PLACEHOLDER.to_string(),
        Some(value) => format_value(value, ty),
    }
}

/// Format a raw value by declared type. A value that fails its type's
/// conversion falls back to the raw string.
pub fn format_value(raw: &str, ty: OptionType) -> String {
    match ty {
        OptionType::Boolean => match raw {
            "1" => "True".to_string(),
            "0" => "False".to_string(),
            _ => raw.to_string(),
        },
        OptionType::DataSize => raw
            .parse()
            .map(size_label)
            .unwrap_or_else(|_| raw.to_string()),
        OptionType::TimeInterval => raw
            .parse()
            .map(time_label)
            .unwrap_or_else(|_| raw.to_string()),
        OptionType::Other => raw.to_string(),
    }
}

/// Byte count as a base-1024 label, largest fitting unit, truncated to
/// a whole number: 4194304 -> "4 MB".
pub fn size_label(bytes: u64) -> String {
    for (size, unit) in SIZE_UNITS {
        if bytes >= size {
            return format!("{}{}", bytes / size, unit);
        }
    }
    "0 B".to_string()
}

/// Seconds as a long-form duration, non-zero components only:
/// 3661 -> "1 hour, 1 minute, 1 second".
pub fn time_label(seconds: u64) -> String {
    if seconds == 0 {
        return "0 seconds".to_string();
    }
    let mut remaining = seconds;
    let mut parts = Vec::new();
    for (unit_seconds, unit) in TIME_UNITS {
        let count = remaining / unit_seconds;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {unit}{plural}"));
            remaining %= unit_seconds;
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_formatting() {
        assert_eq!(format_value("1", OptionType::Boolean), "True");
        assert_eq!(format_value("0", OptionType::Boolean), "False");
    }

    #[test]
    fn test_boolean_passthrough_for_other_raws() {
        assert_eq!(format_value("2", OptionType::Boolean), "2");
        assert_eq!(format_value("auto", OptionType::Boolean), "auto");
    }

    #[test]
    fn test_data_size_labels() {
        assert_eq!(format_value("4194304", OptionType::DataSize), "4 MB");
        assert_eq!(format_value("1073741824", OptionType::DataSize), "1 GB");
        assert_eq!(size_label(0), "0 B");
        assert_eq!(size_label(512), "512 B");
        assert_eq!(size_label(2048), "2 KB");
        assert_eq!(size_label(1 << 40), "1 TB");
    }

    #[test]
    fn test_data_size_truncates_to_whole_units() {
        assert_eq!(size_label(1536), "1 KB");
        assert_eq!(size_label((1 << 30) + (1 << 29)), "1 GB");
    }

    #[test]
    fn test_non_numeric_data_size_falls_back_to_raw() {
        assert_eq!(format_value("10 MB", OptionType::DataSize), "10 MB");
        assert_eq!(format_value("-5", OptionType::DataSize), "-5");
    }

    #[test]
    fn test_time_interval_labels() {
        let label = format_value("3661", OptionType::TimeInterval);
        assert_eq!(label, "1 hour, 1 minute, 1 second");
        assert!(label.contains("hour"));
        assert!(label.contains("minute"));
    }

    #[test]
    fn test_time_label_components() {
        assert_eq!(time_label(0), "0 seconds");
        assert_eq!(time_label(45), "45 seconds");
        assert_eq!(time_label(90), "1 minute, 30 seconds");
        assert_eq!(time_label(90061), "1 day, 1 hour, 1 minute, 1 second");
        assert_eq!(time_label(7200), "2 hours");
    }

    #[test]
    fn test_non_numeric_time_interval_falls_back_to_raw() {
        assert_eq!(format_value("1 hour", OptionType::TimeInterval), "1 hour");
    }

    #[test]
    fn test_other_type_passes_through() {
        assert_eq!(format_value("9050", OptionType::Other), "9050");
        assert_eq!(format_value("", OptionType::Other), "");
    }

    #[test]
    fn test_missing_value_degrades_to_none_placeholder() {
        assert_eq!(display_value(None, OptionType::Boolean), "<none>");
        assert_eq!(display_value(None, OptionType::Other), "<none>");
        assert_eq!(display_value(Some("1"), OptionType::Boolean), "True");
    }

    #[test]
    fn test_type_tags_map_to_closed_enum() {
        assert_eq!(OptionType::from_tag("Boolean"), OptionType::Boolean);
        assert_eq!(OptionType::from_tag("DataSize"), OptionType::DataSize);
        assert_eq!(OptionType::from_tag("TimeInterval"), OptionType::TimeInterval);
        assert_eq!(OptionType::from_tag("RouterList"), OptionType::Other);
        assert_eq!(OptionType::from_tag(""), OptionType::Other);
    }

    #[test]
    fn test_entry_description_reserved_empty() {
        let entry = ConfigEntry::new(
            "UseEntryGuards".to_string(),
            "True".to_string(),
            "Boolean".to_string(),
        );
        assert!(entry.description.is_empty());
    }
}

use crate::config::FilterConfig;
use crate::constants;
use crate::types::StreamItem;

/// Named filter criterion understood by every stream kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    HighPriority,
}

impl Criterion {
    /// Unrecognized names yield `None`, which callers treat as "keep everything".
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            constants::HIGH_PRIORITY => Some(Criterion::HighPriority),
            _ => None,
        }
    }
}

/// Case-insensitive check for the error marker
pub fn mentions_error(text: &str) -> bool {
    text.to_lowercase().contains(constants::ERROR_MARKER)
}

pub fn is_sensor_outlier(item: &StreamItem, bounds: &FilterConfig) -> bool {
    item.as_number()
        .is_some_and(|x| x > bounds.sensor_high || x < bounds.sensor_low)
}

pub fn is_large_transaction(item: &StreamItem, bounds: &FilterConfig) -> bool {
    item.as_number()
        .is_some_and(|x| x.abs() >= bounds.transaction_threshold)
}

pub fn is_error_event(item: &StreamItem) -> bool {
    item.as_text().is_some_and(mentions_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criterion() {
        assert_eq!(Criterion::parse("High-priority"), Some(Criterion::HighPriority));
        assert_eq!(Criterion::parse("high-priority"), None);
        assert_eq!(Criterion::parse("Low-priority"), None);
    }

    #[test]
    fn test_sensor_bounds_are_inclusive() {
        let bounds = FilterConfig::default();
        assert!(!is_sensor_outlier(&StreamItem::Number(0.0), &bounds));
        assert!(!is_sensor_outlier(&StreamItem::Number(50.0), &bounds));
        assert!(is_sensor_outlier(&StreamItem::Number(50.5), &bounds));
        assert!(is_sensor_outlier(&StreamItem::Number(-0.1), &bounds));
        assert!(!is_sensor_outlier(&StreamItem::from("100"), &bounds));
    }

    #[test]
    fn test_transaction_threshold_uses_magnitude() {
        let bounds = FilterConfig::default();
        assert!(is_large_transaction(&StreamItem::Number(100.0), &bounds));
        assert!(is_large_transaction(&StreamItem::Number(-150.0), &bounds));
        assert!(!is_large_transaction(&StreamItem::Number(99.9), &bounds));
    }

    #[test]
    fn test_error_marker_ignores_case() {
        assert!(is_error_event(&StreamItem::from("ERROR: disk full")));
        assert!(is_error_event(&StreamItem::from("minor Error")));
        assert!(!is_error_event(&StreamItem::from("logout")));
        assert!(!is_error_event(&StreamItem::Number(1.0)));
    }
}

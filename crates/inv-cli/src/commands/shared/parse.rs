use inv_core::enums::Grade;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
///
/// Hyphens are accepted in place of underscores, so `qc-required` and
/// `qc_required` both work on the command line.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

/// Grades are stored upper-case; accept either case.
pub fn parse_grade(raw: &str) -> anyhow::Result<Grade> {
    parse_enum(&raw.to_ascii_uppercase(), "grade")
}

#[cfg(test)]
mod tests {
    use inv_core::enums::{DeviceStatus, Grade, PartMovement, QcResult};

    use super::{parse_enum, parse_grade, parse_optional_enum};

    #[test]
    fn parses_snake_case_enum() {
        let status: DeviceStatus = parse_enum("in_stock", "status").expect("status should parse");
        assert_eq!(status, DeviceStatus::InStock);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let status: DeviceStatus =
            parse_enum("qc-required", "status").expect("status should parse");
        assert_eq!(status, DeviceStatus::QcRequired);
        let kind: PartMovement = parse_enum("return-in", "kind").expect("kind should parse");
        assert_eq!(kind, PartMovement::ReturnIn);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<QcResult>("maybe", "qc result").expect_err("should fail");
        assert!(err.to_string().contains("invalid qc result 'maybe'"));
    }

    #[test]
    fn optional_passes_none_through() {
        let parsed: Option<QcResult> = parse_optional_enum(None, "qc_status").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn grade_is_case_insensitive() {
        assert_eq!(parse_grade("b").unwrap(), Grade::B);
        assert_eq!(parse_grade("F").unwrap(), Grade::F);
        assert!(parse_grade("z").is_err());
    }
}

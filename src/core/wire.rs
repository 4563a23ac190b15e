use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Accepts a JSON string, number or null and keeps it as text.
///
/// The provider is inconsistent about identifier-like fields such as
/// `calendarYear` and `cik`, which arrive as either `"2023"` or `2023`.
/// Any other shape (bool, object, array) reads as missing.
pub(crate) fn de_opt_string_lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Int(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    Ok(match Option::<StrOrNum>::deserialize(deserializer)? {
        Some(StrOrNum::Str(s)) if s.is_empty() => None,
        Some(StrOrNum::Str(s)) => Some(s),
        Some(StrOrNum::Int(i)) => Some(i.to_string()),
        Some(StrOrNum::Float(f)) => Some(f.to_string()),
        Some(StrOrNum::Other(_)) | None => None,
    })
}

/// Accepts a JSON number, a numeric string or null.
///
/// Non-numeric strings (e.g. `"N/A"`) and other shapes are treated as missing
/// rather than failing the whole statement list.
pub(crate) fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(NumOrStr::Num(n)) => Some(n),
        Some(NumOrStr::Str(s)) => s.trim().parse::<f64>().ok(),
        Some(NumOrStr::Other(_)) | None => None,
    })
}

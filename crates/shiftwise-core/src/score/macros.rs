//! Declarative macros for field-based score types.

/// Generates `FromStr` for the `"Xhard/Ymedium/Zsoft"` format.
///
/// The constructor must accept fields in the order they are listed.
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl std::str::FromStr for $type {
            type Err = $crate::score::ScoreParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let parts: Vec<&str> = s.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];

                if parts.len() != suffixes.len() {
                    return Err($crate::score::ScoreParseError {
                        message: format!(
                            "invalid {} '{}': expected {} parts separated by '/'",
                            stringify!($type), s, suffixes.len()
                        ),
                    });
                }

                let mut parts = parts.into_iter();
                $(
                    let $field = {
                        let part = parts.next().unwrap_or_default().trim();
                        let digits = part.strip_suffix($suffix).ok_or_else(|| {
                            $crate::score::ScoreParseError {
                                message: format!("'{}' must end with '{}'", part, $suffix),
                            }
                        })?;
                        digits.parse::<i64>().map_err(|e| {
                            $crate::score::ScoreParseError {
                                message: format!("invalid {} level '{}': {}", $suffix, digits, e),
                            }
                        })?
                    };
                )+

                Ok($type::$ctor( $($field),+ ))
            }
        }
    };
}

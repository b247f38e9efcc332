//! Identifier casing conventions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How identifiers are renamed on the way out.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Keep identifiers exactly as written.
    AsIs,
    /// `camelCase` → `camel_case`
    #[default]
    SnakeCase,
}

impl NamingConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingConvention::AsIs => "as_is",
            NamingConvention::SnakeCase => "snake_case",
        }
    }

    /// Apply this convention to one identifier.
    pub fn apply(&self, ident: &str) -> String {
        match self {
            NamingConvention::AsIs => ident.to_string(),
            NamingConvention::SnakeCase => to_snake_case(ident),
        }
    }
}

impl std::fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NamingConvention {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "as_is" | "as-is" | "camelCase" => Ok(Self::AsIs),
            "snake_case" | "snake-case" => Ok(Self::SnakeCase),
            _ => Err(format!("unknown naming convention: {s}")),
        }
    }
}

/// Lower-case `ident`, inserting `_` before every uppercase letter after the
/// first character.
///
/// The first character is lower-cased without a separator, so `FooBar` and
/// `fooBar` both give `foo_bar`. Output contains no uppercase letters, which
/// makes the function idempotent.
pub fn to_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut chars = ident.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
    }
    for c in chars {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `SCREAMING_CASE` constant names, which keep their casing.
pub fn is_constant_name(ident: &str) -> bool {
    ident.chars().any(|c| c.is_ascii_uppercase())
        && ident
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("camelCase"), "camel_case");
        assert_eq!(to_snake_case("PascalCase"), "pascal_case");
        assert_eq!(to_snake_case("getHTTPCode"), "get_h_t_t_p_code");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("x"), "x");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_idempotent() {
        for ident in ["camelCase", "PascalCase", "_Leading", "a1B2", "ÄpfelBaum", ""] {
            let once = to_snake_case(ident);
            assert_eq!(to_snake_case(&once), once, "not idempotent for {ident}");
        }
    }

    #[test]
    fn test_as_is_identity() {
        assert_eq!(NamingConvention::AsIs.apply("myValue"), "myValue");
        assert_eq!(NamingConvention::SnakeCase.apply("myValue"), "my_value");
    }

    #[test]
    fn test_constant_names() {
        assert!(is_constant_name("MAX_SIZE"));
        assert!(is_constant_name("V2"));
        assert!(!is_constant_name("maxSize"));
        assert!(!is_constant_name("_"));
    }

    #[test]
    fn test_parse_convention() {
        assert_eq!(
            "as-is".parse::<NamingConvention>(),
            Ok(NamingConvention::AsIs)
        );
        assert_eq!(
            "snake_case".parse::<NamingConvention>(),
            Ok(NamingConvention::SnakeCase)
        );
        assert!("kebab".parse::<NamingConvention>().is_err());
    }
}

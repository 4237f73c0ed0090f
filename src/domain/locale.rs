//! Locale used to partition screenshot directories

use std::fmt;

/// Language and region of the device under test
///
/// Both parts are kept verbatim. An empty region still produces the `<lang>-`
/// directory segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    pub language: String,
    pub region: String,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
        }
    }

    /// Parse `en-US`, `en_US`, `en_US.UTF-8` or `de_DE@euro` style identifiers
    ///
    /// Returns `None` when no language part is present.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.split(['.', '@']).next().unwrap_or_default();
        let mut parts = value.split(['-', '_']);
        let language = parts.next().filter(|lang| !lang.is_empty())?;
        let region = parts.next().unwrap_or_default();
        Some(Self::new(language, region))
    }

    /// Read the process locale from `LC_ALL`, `LC_MESSAGES` or `LANG`
    ///
    /// The capture path never calls this; callers opt in and pass the result.
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|value| !value.is_empty() && value != "C" && value != "POSIX")
            .find_map(|value| Self::parse(&value))
    }

    /// Directory segment for this locale
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.language, self.region)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Locale::parse("en-US"), Some(Locale::new("en", "US")));
        assert_eq!(Locale::parse("en_US.UTF-8"), Some(Locale::new("en", "US")));
        assert_eq!(Locale::parse("de_DE@euro"), Some(Locale::new("de", "DE")));
        assert_eq!(Locale::parse("fr"), Some(Locale::new("fr", "")));
        assert_eq!(Locale::parse(""), None);
        assert_eq!(Locale::parse("_US"), None);
    }

    #[test]
    fn test_dir_name_is_verbatim() {
        assert_eq!(Locale::new("en", "US").dir_name(), "en-US");
        assert_eq!(Locale::new("pt", "br").dir_name(), "pt-br");
        // empty region keeps the trailing separator
        assert_eq!(Locale::new("fr", "").dir_name(), "fr-");
    }
}

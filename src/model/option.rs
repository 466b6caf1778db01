//! Option (flag) definition

/// A named flag addressable as `-short` or `--long`
///
/// Bound values are always stored under `long`, whichever spelling was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    pub short: String,
    pub long: String,
    pub description: String,
    pub default: String,
    /// `false` marks a boolean switch
    pub takes_value: bool,
}

impl CliOption {
    /// An option that consumes the following token as its value
    pub fn value(
        short: impl Into<String>,
        long: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
            description: description.into(),
            default: String::new(),
            takes_value: true,
        }
    }

    /// A boolean switch
    pub fn flag(
        short: impl Into<String>,
        long: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            takes_value: false,
            ..Self::value(short, long, description)
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// `-s, --long` as shown in help and completion output
    pub fn spelling(&self) -> String {
        if self.short.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("-{}, --{}", self.short, self.long)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_does_not_take_value() {
        let opt = CliOption::flag("f", "force", "Overwrite if exists");
        assert!(!opt.takes_value);
        assert_eq!(opt.spelling(), "-f, --force");
    }

    #[test]
    fn test_value_with_default() {
        let opt = CliOption::value("c", "content", "File content").with_default("empty");
        assert!(opt.takes_value);
        assert_eq!(opt.default, "empty");
    }

    #[test]
    fn test_spelling_without_short() {
        let opt = CliOption::flag("", "dry-run", "");
        assert_eq!(opt.spelling(), "--dry-run");
    }
}

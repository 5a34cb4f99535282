//! Alert severity levels and their priority ordering.

define_token_enum! {
    /// Severity of an alert or escalation step.
    ///
    /// Ordered by [`priority`](AlertSeverity::priority):
    /// panic > error > warning > resolved = info.
    AlertSeverity {
        Panic = "panic",
        Error = "error",
        Warning = "warning",
        Resolved = "resolved",
        Info = "info",
    }
}

/// Legacy token accepted as an alias for [`AlertSeverity::Error`].
const CRITICAL_ALIAS: &str = "critical";

impl AlertSeverity {
    /// Priority used to compare severities. Unrecognised values return `-1`.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Panic => 3,
            Self::Error => 2,
            Self::Warning => 1,
            Self::Resolved | Self::Info => 0,
            Self::Other(_) => -1,
        }
    }

    /// Normalize a raw severity token.
    ///
    /// Trims and lowercases the input, maps `critical` to `error` and an
    /// empty value to `error`. Any other unknown token is preserved so that
    /// validation can reject it.
    pub fn normalize(raw: &str) -> Self {
        let token = raw.trim().to_lowercase();
        if token.is_empty() || token == CRITICAL_ALIAS {
            return Self::Error;
        }
        Self::parse(&token)
    }

    /// Whether an escalation step may raise an alert to this severity.
    pub fn is_escalatable(&self) -> bool {
        matches!(self, Self::Panic | Self::Error)
    }
}

impl Default for AlertSeverity {
    /// An unset severity. [`Alert::clean`](crate::alert::Alert::clean)
    /// replaces it with [`AlertSeverity::Error`].
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Whether `value` is a recognised severity token.
pub fn severity_is_valid(value: &str) -> bool {
    AlertSeverity::parse(value).is_valid()
}

/// Priority of a severity token, `-1` when unrecognised.
pub fn severity_priority(value: &str) -> i32 {
    AlertSeverity::parse(value).priority()
}

/// All recognised severity tokens.
pub fn valid_severities() -> &'static [&'static str] {
    AlertSeverity::valid_values()
}

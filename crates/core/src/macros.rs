//! Declarative helpers shared by the closed string enumerations.

/// Define a closed string enumeration with a catch-all `Other` variant.
///
/// Each variant is bound to its wire token. Unrecognised tokens are kept
/// verbatim in `Other` so that parsing never fails and validation can
/// report the offending value later.
macro_rules! define_token_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A token outside the recognised set.
            Other(String),
        }

        impl $name {
            /// Recognised tokens, in declaration order.
            pub const VALID_VALUES: &'static [&'static str] = &[$($token),+];

            /// Parse a wire token. Never fails: unknown tokens become `Other`.
            pub fn parse(token: &str) -> Self {
                match token {
                    $( $token => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }

            /// Return the wire token for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $token, )+
                    Self::Other(token) => token,
                }
            }

            /// Whether this value is one of the recognised tokens.
            pub fn is_valid(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            /// Recognised tokens, in declaration order.
            pub fn valid_values() -> &'static [&'static str] {
                Self::VALID_VALUES
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse(&value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(token) => token,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

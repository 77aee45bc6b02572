/// Generate `as_str`, `Display`, `From<T> for String`, and `TryFrom<&str>` /
/// `TryFrom<String>` for a closed enum.
///
/// Each variant has one canonical spelling (used for output) and any number
/// of `| "alias"` spellings that are accepted on input. Unknown strings
/// return an error. Add `#[serde(into = "String", try_from = "String")]` to
/// the enum to get Serialize/Deserialize via these impls.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_string()
            }
        }

        impl TryFrom<&str> for $name {
            type Error = String;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                match s.to_ascii_lowercase().as_str() {
                    $($str $(| $alias)* => Ok($name::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($name))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                $name::try_from(s.as_str())
            }
        }
    };
}

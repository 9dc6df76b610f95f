// ---------------------------------------------------------------------------
// Macro for enumerations whose textual form is a fixed wire-name.
// Generates: enum (serde-renamed), ALL, as_str(), Display, FromStr.
// ---------------------------------------------------------------------------
macro_rules! wire_enum {
    (
        $(#[$attr:meta])*
        $name:ident {
            $(
                $(#[$vattr:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vattr])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire-name of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| $crate::ModelError::UnknownValue {
                        kind: stringify!($name),
                        value: s.to_owned(),
                    })
            }
        }
    };
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed string-tagged enums.

/// Declare a closed enum whose values parse from fixed kebab-case tags.
///
/// Generates `ALL`, `as_str`, `Display`, and a `FromStr` that rejects
/// anything outside the set with [`ConfigError::Unknown`](crate::ConfigError::Unknown).
macro_rules! closed_tags {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $field:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $tag:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The tag this value parses from.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = crate::error::ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)+
                    other => Err(crate::error::ConfigError::Unknown {
                        field: $field,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use closed_tags;

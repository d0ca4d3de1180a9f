//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Enums that travel over the wire as fixed strings (webhook event names,
//! for instance) get both conversions from a single mapping table.
//!
//! # Example
//!
//! ```rust
//! use hotjar_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeletionStatus {
//!     Pending,
//!     Completed,
//! }
//!
//! impl_wire_name_conversions!(DeletionStatus {
//!     Pending => "pending",
//!     Completed => "completed",
//! });
//!
//! assert_eq!(DeletionStatus::Pending.to_string(), "pending");
//! assert_eq!("COMPLETED".parse::<DeletionStatus>(), Ok(DeletionStatus::Completed));
//! ```

/// Implements Display and FromStr for enums with a fixed wire name per variant
///
/// - `Display` writes the wire name verbatim
/// - `FromStr` matches case-insensitively and reports the enum name on failure
///
/// Wire names must be written in lowercase.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire name of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

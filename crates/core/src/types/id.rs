//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create ID wrappers that cannot be mixed up
//! across entity types. IDs are serialized as bare integers, which is how the
//! catalog API and the persisted cart both spell them.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>`, `Into<i32>`, `Display` and `FromStr`
///
/// # Example
///
/// ```rust
/// # use sweet_shop_core::define_id;
/// define_id!(JarId);
/// define_id!(ShelfId);
///
/// let jar = JarId::new(1);
/// let shelf: ShelfId = "1".parse().expect("numeric id");
///
/// assert_eq!(jar.as_i32(), shelf.as_i32());
/// // These are different types, so this won't compile:
/// // let _: JarId = shelf;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(SweetId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweet_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&SweetId::new(42)).expect("serialize");
        assert_eq!(json, "42");

        let id: SweetId = serde_json::from_str("7").expect("deserialize");
        assert_eq!(id, SweetId::new(7));
    }

    #[test]
    fn test_sweet_id_from_str() {
        assert_eq!(" 12 ".parse::<SweetId>().ok(), Some(SweetId::new(12)));
        assert!("twelve".parse::<SweetId>().is_err());
    }
}

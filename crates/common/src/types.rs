use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw numeric identifier.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying value.
            pub fn value(&self) -> i64 {
                self.0
            }

            /// Returns true if the identifier can refer to a stored record.
            pub fn is_valid(&self) -> bool {
                self.0 > 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a persisted order.
    ///
    /// Only a repository hands these out; an order without one has not been
    /// stored yet.
    OrderId
);

numeric_id!(
    /// Identifier of the user placing an order.
    BuyerId
);

numeric_id!(
    /// Identifier of a goods listing.
    GoodsId
);

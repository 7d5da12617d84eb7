use std::fmt;

macro_rules! define_entity_id {
    ($typ:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $typ(pub(crate) String);

        impl $typ {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $typ {
            fn from(s: String) -> Self {
                $typ(s)
            }
        }

        impl From<&str> for $typ {
            fn from(s: &str) -> Self {
                $typ(s.to_string())
            }
        }

        impl fmt::Display for $typ {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_entity_id!(TransactionId);
define_entity_id!(GoalId);
define_entity_id!(CustomQuoteId);

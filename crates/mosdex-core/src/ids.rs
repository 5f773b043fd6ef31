//! Stable identifiers for dictionary entities.

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            /// The ID as a vector position.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(SymbolId);
define_id_type!(DomainId);
define_id_type!(LabelId);

impl SymbolId {
    /// Synthetic symbol slot reserved for the objective. Dictionary symbols start at 1.
    pub const OBJECTIVE: SymbolId = SymbolId(0);

    pub fn is_objective(self) -> bool {
        self == Self::OBJECTIVE
    }
}

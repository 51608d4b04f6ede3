/// Generates newtypes around [U256](alloy::primitives::U256) for the integer
/// arguments of the oracle lookup.
///
/// Each newtype gets `new`, `get`, `parse`, `From<u64>` and a decimal `Display`.
/// The string given with each type names the value in [KeyError](crate::KeyError)s.
macro_rules! u256_newtypes {
    ($($target:ident => $field:literal),+ $(,)?) => {
        $(
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $target(alloy::primitives::U256);

            impl $target {
                pub const ZERO: Self = Self(alloy::primitives::U256::ZERO);

                pub const fn new(value: alloy::primitives::U256) -> Self {
                    Self(value)
                }

                pub const fn get(&self) -> alloy::primitives::U256 {
                    self.0
                }

                /// Parses a base-10 integer, ignoring surrounding whitespace.
                pub fn parse(raw: &str) -> Result<Self, $crate::KeyError> {
                    $crate::key::parse_decimal($field, raw).map(Self)
                }
            }

            impl From<u64> for $target {
                fn from(value: u64) -> Self {
                    Self(alloy::primitives::U256::from(value))
                }
            }

            impl std::fmt::Display for $target {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(&self.0, f)
                }
            }
        )+
    };
}

pub(crate) use u256_newtypes;

/// A fixed, order-significant list of symbolic values referenced by position.
///
/// Documents store these as the zero-based index of the value in `VALUES`;
/// reordering `VALUES` changes the meaning of every persisted document.
pub trait Ordinal: Copy + Sized + 'static {
    const NAME: &'static str;
    const VALUES: &'static [Self];

    fn ordinal(self) -> usize;

    fn as_str(&self) -> &'static str;

    fn from_ordinal(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::VALUES.get(i).copied())
    }

    fn cardinality() -> usize {
        Self::VALUES.len()
    }
}

/// Declares a fieldless enum together with its [`Ordinal`] table.
/// Variant order is the persisted order.
#[macro_export]
macro_rules! ordinal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($variant),+
        }

        impl $crate::ordinal::Ordinal for $name {
            const NAME: &'static str = $label;
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn ordinal(self) -> usize {
                self as usize
            }

            fn as_str(&self) -> &'static str {
                match *self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::ordinal::Ordinal::as_str(self))
            }
        }
    };
}

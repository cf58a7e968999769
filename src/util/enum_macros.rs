/// Generates a BACnet enumeration whose wire value space is wider than its named
/// variants.
///
/// Values without a name land in `Proprietary` when they fall inside the vendor range
/// and in `Reserved` otherwise, so every raw value converts and converts back
/// unchanged.
///
/// # Arguments
///
/// * `$name:ident` - The name of the enum to be generated.
/// * `$variant:ident = $value:literal` - The named variants and their wire values.
/// * `$unit:ident` - The underlying integer type (`u8`, `u16`, `u32`).
/// * `$proprietary_range:expr` - The vendor range, e.g. `128..=1023`. Pass an empty
///   range such as `0..0` when the enumeration has none.
///
/// # Example
///
/// ```rust
/// use bacnet_codec::generate_custom_enum;
///
/// generate_custom_enum! {
///     Mode {
///         Off = 0,
///         On = 1,
///     },
///     u16,
///     256..=65535
/// }
///
/// assert_eq!(u16::from(Mode::On), 1);
/// assert_eq!(Mode::On.to_string(), "On");
/// assert!(Mode::from(300u16).is_proprietary());
/// assert!(matches!(Mode::from(7u16), Mode::Reserved(raw) if raw.value() == 7));
/// assert_eq!(Mode::from(300u16).to_string(), "Proprietary(300)");
/// ```
///
/// # Generated Code Structure
///
/// * the enum, with `Proprietary([<$name Value>])` and `Reserved([<$name Value>])`
///   catch-alls, deriving `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` and,
///   with the `serde` feature, `Serialize`
/// * `core::fmt::Display`: the variant name, or `Proprietary(n)` / `Reserved(n)`
/// * `From<$name> for $unit` and `From<$unit> for $name`
#[macro_export]
macro_rules! generate_custom_enum {
    (
        $(#[$doc:meta])*
        $name:ident { $($variant:ident = $value:literal,)+ },
        $unit:ident,
        $proprietary_range:expr
    ) => {
        pastey::paste! {
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            pub enum $name {
                $($variant,)*
                Proprietary([<$name Value>]),
                Reserved([<$name Value>]),
            }

            #[doc = concat!(
                "Raw wire value of a [`",
                stringify!($name),
                "`] without a named variant"
            )]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            pub struct [<$name Value>] {
                value: $unit,
            }

            impl [<$name Value>] {
                pub fn value(&self) -> $unit {
                    self.value
                }
            }

            impl $name {
                pub fn is_proprietary(&self) -> bool {
                    matches!(self, $name::Proprietary(_))
                }
            }

            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    match self {
                        $($name::$variant => f.write_str(stringify!($variant)),)*
                        $name::Proprietary(raw) => write!(f, "Proprietary({})", raw.value),
                        $name::Reserved(raw) => write!(f, "Reserved({})", raw.value),
                    }
                }
            }

            impl From<$name> for $unit {
                fn from(value: $name) -> Self {
                    match value {
                        $($name::$variant => $value,)*
                        $name::Proprietary(raw) | $name::Reserved(raw) => raw.value,
                    }
                }
            }

            impl From<$unit> for $name {
                fn from(value: $unit) -> Self {
                    match value {
                        $($value => $name::$variant,)*
                        value if ($proprietary_range).contains(&value) => {
                            $name::Proprietary([<$name Value>] { value })
                        }
                        value => $name::Reserved([<$name Value>] { value }),
                    }
                }
            }
        }
    };
}

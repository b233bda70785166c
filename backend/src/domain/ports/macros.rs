//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( {
                    $(
                        #[doc = concat!("Adapter-supplied `", stringify!($field), "`.")]
                        $field : $ty
                    ),*
                } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SnapshotPortError {
            Unreadable { message: String } => "snapshot unreadable: {message}",
            Truncated { rows: u32 } => "snapshot truncated after {rows} rows",
            Mismatch { album: String, rows: u32 } => "album {album} has {rows} stray rows",
            Empty => "snapshot is empty",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SnapshotPortError::unreadable("permission denied");
        assert_eq!(err.to_string(), "snapshot unreadable: permission denied");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = SnapshotPortError::truncated(42_u32);
        assert_eq!(err.to_string(), "snapshot truncated after 42 rows");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SnapshotPortError::mismatch("7", 3_u32);
        assert_eq!(err.to_string(), "album 7 has 3 stray rows");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SnapshotPortError::empty(), SnapshotPortError::Empty);
    }
}

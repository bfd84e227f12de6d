//! `define_port_error!`: declares a port error enum with snake_case
//! constructors whose parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor $variant
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
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $(#[allow(missing_docs, reason = "described by the variant message")] $field: $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty,)*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    define_port_error! {
        pub enum SamplePortError {
            Missing { key: String } => "missing {key}",
            Unreadable { path: PathBuf, message: String } => "cannot read {path:?}: {message}",
        }
    }

    #[test]
    fn constructors_convert_into_field_types() {
        let err = SamplePortError::missing("AS");
        assert_eq!(err.to_string(), "missing AS");
    }

    #[test]
    fn constructors_accept_mixed_field_types() {
        let err = SamplePortError::unreadable("/tmp/AS", "denied");
        assert_eq!(
            err,
            SamplePortError::Unreadable {
                path: PathBuf::from("/tmp/AS"),
                message: "denied".to_owned(),
            }
        );
    }
}

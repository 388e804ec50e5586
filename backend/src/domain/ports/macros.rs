//! Helper macro for declaring driven-port error enums.
//!
//! `define_port_error!` expands to a `thiserror` enum, one snake_case
//! constructor per variant (string-ish fields accept `impl Into<_>`), and a
//! conversion into the domain [`Error`](crate::domain::Error). Driven ports
//! only fail for infrastructure reasons, so the conversion logs the cause and
//! yields a redacted `internal_error`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
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
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }

        impl From<$name> for $crate::domain::Error {
            fn from(err: $name) -> Self {
                ::tracing::error!(error = %err, port = stringify!($name), "driven port failed");
                $crate::domain::Error::internal("internal server error")
            }
        }
    };
}

pub(crate) use define_port_error;

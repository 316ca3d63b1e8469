//! Helper macros for generating port error enums.
//!
//! `define_port_error!` builds the error type reported by driven adapters.
//! `define_use_case_error!` builds the closed error enum of a feature: every
//! variant names its [`ErrorCode`](crate::domain::ErrorCode) category and an
//! `Internal` variant is appended so repository failures always have a home.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $crate::domain::ports::define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        $crate::domain::ports::define_port_error!(
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
        #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                $crate::domain::ports::define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

macro_rules! define_use_case_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal as $code:ident
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
            /// Unexpected failure collapsed from a lower layer.
            #[error("internal error: {message}")]
            Internal { message: String },
        }

        impl $name {
            $(
                $crate::domain::ports::define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
            $crate::domain::ports::define_port_error!(@ctor Internal { message: String });

            /// Failure category reported to adapters.
            pub fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $( Self::$variant { .. } => $crate::domain::ErrorCode::$code, )*
                    Self::Internal { .. } => $crate::domain::ErrorCode::InternalError,
                }
            }
        }

        impl From<$crate::domain::ports::RepositoryError> for $name {
            fn from(error: $crate::domain::ports::RepositoryError) -> Self {
                ::tracing::error!(%error, feature = stringify!($name), "repository failure");
                Self::internal(error.to_string())
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                $crate::domain::Error::new(error.code(), error.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;
pub(crate) use define_use_case_error;

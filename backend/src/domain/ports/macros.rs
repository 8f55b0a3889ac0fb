//! `define_port_error!`: declares a `thiserror` enum for a driven port
//! together with snake_case constructors taking `impl Into<_>` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
                $variant $( { $($field : $ty),* } )?,
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
    //! Constructor generation for port error enums.
    define_port_error! {
        pub enum ExampleStoreError {
            Query { message: String } => "query failed: {message}",
            Duplicate { field: String } => "duplicate value for {field}",
            Retry { attempts: u32 } => "gave up after {attempts} attempts",
            Missing { kind: String, attempts: u32 } => "{kind} missing after {attempts}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(ExampleStoreError::query("boom").to_string(), "query failed: boom");
        assert_eq!(
            ExampleStoreError::duplicate("email").to_string(),
            "duplicate value for email"
        );
    }

    #[test]
    fn constructors_keep_numeric_fields() {
        let err = ExampleStoreError::retry(3_u32);
        assert_eq!(err, ExampleStoreError::Retry { attempts: 3 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExampleStoreError::missing("pet", 2_u32);
        assert_eq!(err.to_string(), "pet missing after 2");
    }
}

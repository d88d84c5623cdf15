//! Defines helper macros for generating domain port error enums.

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
    use rstest::rstest;

    define_port_error! {
        pub enum UploadPortError {
            Unavailable => "upload store unavailable",
            Rejected { message: String } => "upload rejected: {message}",
            TooLarge { limit: u64 } => "upload exceeds {limit} bytes",
            Partial { field_name: String, imported: u32 } =>
                "field {field_name} stopped after {imported} rows",
        }
    }

    #[rstest]
    #[case(UploadPortError::unavailable(), "upload store unavailable")]
    #[case(UploadPortError::rejected("not a csv"), "upload rejected: not a csv")]
    #[case(UploadPortError::too_large(1024_u64), "upload exceeds 1024 bytes")]
    #[case(
        UploadPortError::partial(String::from("north"), 12_u32),
        "field north stopped after 12 rows"
    )]
    fn constructors_render_their_messages(#[case] error: UploadPortError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn string_fields_accept_borrowed_text() {
        assert_eq!(
            UploadPortError::rejected("bad header"),
            UploadPortError::Rejected {
                message: "bad header".to_owned(),
            }
        );
    }
}

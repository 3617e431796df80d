//! Macros for ergonomic action definitions.

/// Generate an action enum with its `Action` implementation.
///
/// Each variant's label is its own name. Unit, tuple, and struct variants
/// are all supported.
///
/// # Example
///
/// ```
/// use tidepool::action_enum;
/// use tidepool::core::Action;
///
/// action_enum! {
///     pub enum TabAction {
///         Refresh,
///         Select { index: usize },
///         Rename(String),
///     }
/// }
///
/// assert_eq!(TabAction::Refresh.kind(), "Refresh");
/// assert_eq!(TabAction::Select { index: 3 }.kind(), "Select");
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
                $( { $($field:ident : $field_ty:ty),* $(,)? } )?
                $( ( $($tuple_ty:ty),* $(,)? ) )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
                $( { $($field : $field_ty),* } )?
                $( ( $($tuple_ty),* ) )?
            ),*
        }

        impl $crate::core::Action for $name {
            fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }
        }
    };
}

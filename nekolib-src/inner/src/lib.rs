/// Re-exports each listed crate, both as a module and glob-wise, so that
/// its items show up inline in the umbrella crate's documentation.
#[macro_export]
macro_rules! doc_inline_reexport {
    ( $($lib:ident),* $(,)? ) => { $(
        #[doc(inline)]
        pub use $lib::{self, *};
    )* };
}

// Emits a `trace`-level event naming the repair step taken. Expands to
// nothing unless the `trace` feature is on.
macro_rules! trace_case {
    ($($arg:tt)*) => {{
        #[cfg(feature = "trace")]
        {
            tracing::trace!(target: "rb_tree", $($arg)*);
        }
    }};
}

pub(crate) use trace_case;

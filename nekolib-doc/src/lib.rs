//! Data structures and their naive counterparts.

use inner::doc_inline_reexport;

doc_inline_reexport! {
    ds,
    naive,
}

//! Straightforward implementations used as references in tests.

use inner::doc_inline_reexport;

doc_inline_reexport! {
    sorted_list,
}

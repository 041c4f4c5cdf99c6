pub use hana_matrix::config::{is_multithread_enabled, set_multithread_enabled};

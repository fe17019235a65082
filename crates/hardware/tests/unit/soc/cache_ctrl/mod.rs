//! Cache controller tests.


/// Register masking and the device interface.
pub mod registers;

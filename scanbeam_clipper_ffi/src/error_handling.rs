//! Thread local storage of the last error raised by an FFI call, read back through
//! `sbc_last_error_msg` and `sbc_last_error_report`.
use std::{cell::RefCell, ffi::CString};

/// Holds last error information data.
pub struct LastErrorData {
    /// Human readable error message.
    pub error_msg: CString,
    /// Data associated with the last error that occurred, names the function called and the
    /// detailed error value.
    pub error_report_data: CString,
}

impl LastErrorData {
    pub fn new(error_msg: CString, error_report_data: CString) -> Self {
        LastErrorData {
            error_msg,
            error_report_data,
        }
    }
}

// Storage for last error set
thread_local!(pub static LAST_ERROR: RefCell<Option<LastErrorData>> = const { RefCell::new(None) });

/// Set last error information.
///
/// `error_msg` and `error_report` are turned into CStrings from bytes, interior nulls are
/// replaced so the message is never lost.
pub fn set_last_error<T: Into<Vec<u8>>>(error_msg: T, error_report: T) {
    let msg = to_c_string(error_msg.into());
    let report = to_c_string(error_report.into());

    LAST_ERROR.with(|last_result| {
        *last_result.borrow_mut() = Some(LastErrorData::new(msg, report));
    });
}

/// Clear last error information.
pub fn clear_last_error() {
    LAST_ERROR.with(|last_result| {
        *last_result.borrow_mut() = None;
    });
}

fn to_c_string(mut bytes: Vec<u8>) -> CString {
    for b in bytes.iter_mut().filter(|b| **b == 0) {
        *b = b'?';
    }
    CString::new(bytes).unwrap_or_default()
}

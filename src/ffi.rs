use libc::{c_double, c_void, size_t};
use std::ptr;
use std::slice;

use crate::jenks;

/// Wrapper for a void pointer to a sequence of floats, and the sequence length. Used for FFI.
///
/// Returned by [`jenks_ffi`]: `data` is a `Vec<c_double>` holding the breaks, and a
/// `len` of 0 means the breaks are not computable.
#[repr(C)]
pub struct InternalArray {
    pub data: *const c_void,
    pub len: size_t,
}

/// Wrapper for a void pointer to a sequence of floats representing data to be classified,
/// and the sequence length. Used for FFI.
///
/// `data` is a `Vec<c_double>`.
#[repr(C)]
pub struct ExternalArray {
    pub data: *const c_void,
    pub len: size_t,
}

/// We don't need to take ownership of incoming data to be classified: `jenks` copies it
impl<'a> From<&'a ExternalArray> for &'a [c_double] {
    fn from(arr: &'a ExternalArray) -> Self {
        if arr.data.is_null() || arr.len == 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(arr.data as *const c_double, arr.len) }
    }
}

// Convert breaks into something that can be leaked across the FFI boundary
impl From<Vec<c_double>> for InternalArray {
    fn from(v: Vec<c_double>) -> Self {
        let boxed = v.into_boxed_slice();
        let blen = boxed.len();
        let rawp = Box::into_raw(boxed);
        InternalArray {
            data: rawp as *const c_void,
            len: blen as size_t,
        }
    }
}

impl From<Vec<c_double>> for ExternalArray {
    fn from(v: Vec<c_double>) -> Self {
        let boxed = v.into_boxed_slice();
        let blen = boxed.len();
        let rawp = Box::into_raw(boxed);
        ExternalArray {
            data: rawp as *const c_void,
            len: blen as size_t,
        }
    }
}

// Reconstitute breaks that have been returned across the FFI boundary so they can be dropped
impl From<InternalArray> for Vec<c_double> {
    fn from(arr: InternalArray) -> Self {
        // we originated this data, so pointer-to-slice -> box -> vec
        unsafe {
            let p = ptr::slice_from_raw_parts_mut(arr.data as *mut c_double, arr.len);
            Box::from_raw(p).into_vec()
        }
    }
}

/// Natural breaks over `data`. The result must be released with [`drop_jenks_result`].
#[unsafe(no_mangle)]
pub extern "C" fn jenks_ffi(data: &ExternalArray, classes: size_t) -> InternalArray {
    let values: &[c_double] = data.into();
    jenks(values, classes).unwrap_or_default().into()
}

#[unsafe(no_mangle)]
pub extern "C" fn drop_jenks_result(result: InternalArray) {
    let _: Vec<c_double> = result.into();
}

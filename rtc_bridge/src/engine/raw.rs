// rtc_bridge/src/engine/raw.rs
use std::ffi::CStr;
use std::ffi::c_char;
use std::marker::PhantomData;

/// Borrowed view of a contiguous engine-owned array, valid only for the
/// duration of the engine call that handed it out.
///
/// A null pointer reads as an empty array whatever the declared count.
#[derive(Clone, Copy)]
pub struct RawSlice<'a, T> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl<'a, T> RawSlice<'a, T> {
    /// Wraps a pointer and count received from the engine.
    ///
    /// # Safety
    /// When `ptr` is non-null it must point to `len` initialized values of
    /// `T` that stay valid and unmodified for `'a`.
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self { ptr, len, _marker: PhantomData }
    }

    pub fn empty() -> Self {
        Self { ptr: std::ptr::null(), len: 0, _marker: PhantomData }
    }

    /// Count the engine declared, even when the pointer is null.
    pub fn declared_len(&self) -> usize {
        self.len
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn as_slice(&self) -> &'a [T] {
        if self.ptr.is_null() || self.len == 0 {
            return &[];
        }
        // SAFETY: non-null pointer and count come from `from_raw_parts` or
        // from a borrowed slice, both valid for `'a`.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<'a, T> From<&'a [T]> for RawSlice<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self { ptr: slice.as_ptr(), len: slice.len(), _marker: PhantomData }
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for RawSlice<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Self::from(&array[..])
    }
}

impl<T> std::fmt::Debug for RawSlice<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSlice")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

/// Reads a fixed-size, nominally NUL-terminated field. The read stops at the
/// first NUL or at the end of the field, never past it.
pub fn fixed_str(field: &[c_char]) -> String {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Builds a fixed-size field from `s`, truncating so a terminator always fits.
pub fn to_fixed<const N: usize>(s: &str) -> [c_char; N] {
    let mut out = [0 as c_char; N];
    for (slot, b) in out.iter_mut().zip(s.bytes().take(N.saturating_sub(1))) {
        *slot = b as c_char;
    }
    out
}

/// Copies an optional C string, treating null as empty.
pub fn c_string(s: Option<&CStr>) -> String {
    s.map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Element count in the engine's 32-bit count fields, saturating.
pub fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_reads_empty_whatever_the_count() {
        let raw: RawSlice<'_, u32> = unsafe { RawSlice::from_raw_parts(std::ptr::null(), 5) };
        assert!(raw.is_null());
        assert_eq!(raw.declared_len(), 5);
        assert!(raw.as_slice().is_empty());
    }

    #[test]
    fn unterminated_field_is_bounded() {
        let field = [b'a' as c_char; 8];
        assert_eq!(fixed_str(&field), "aaaaaaaa");
    }

    #[test]
    fn fixed_field_stops_at_nul() {
        let field: [c_char; 16] = to_fixed("mic-01");
        assert_eq!(fixed_str(&field), "mic-01");
    }

    #[test]
    fn to_fixed_keeps_room_for_terminator() {
        let field: [c_char; 4] = to_fixed("abcdef");
        assert_eq!(field[3], 0);
        assert_eq!(fixed_str(&field), "abc");
    }

    #[test]
    fn counts_saturate_at_u32_max() {
        assert_eq!(count_u32(3), 3);
        assert_eq!(count_u32(usize::MAX), u32::MAX);
    }
}

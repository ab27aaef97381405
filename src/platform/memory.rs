//! Platform memory counters.
//!
//! Generic used/total counters come from the shared system-information
//! library; this module only adds what that library cannot report.

/// Kernel memory-pressure ratio in 0..1.
///
/// macOS exposes `kern.memorystatus_level`, the percentage of memory the
/// kernel still considers free; pressure is its complement. Other
/// platforms have no equivalent counter.
#[cfg(target_os = "macos")]
pub fn memory_pressure() -> Option<f64> {
    let mut level: libc::c_uint = 0;
    let mut size = std::mem::size_of::<libc::c_uint>();
    let name = b"kern.memorystatus_level\0";

    let rc = unsafe {
        libc::sysctlbyname(
            name.as_ptr() as *const libc::c_char,
            &mut level as *mut libc::c_uint as *mut libc::c_void,
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return None;
    }

    let level = level.min(100) as f64;
    Some((100.0 - level) / 100.0)
}

#[cfg(not(target_os = "macos"))]
pub fn memory_pressure() -> Option<f64> {
    None
}

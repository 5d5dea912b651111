use serde::Serialize;

/// Effective user the process runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub uid: u32,
    pub name: Option<String>,
}

impl Identity {
    /// User name, or `?` when the uid has no passwd entry.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

/// Source of the effective identity.
///
/// `None` means the platform has no notion of a numeric effective uid.
pub trait IdentitySource: Send + Sync {
    fn effective_identity(&self) -> Option<Identity>;
}

/// Reads the identity from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformIdentity;

#[cfg(unix)]
impl IdentitySource for PlatformIdentity {
    fn effective_identity(&self) -> Option<Identity> {
        // SAFETY: geteuid has no preconditions and cannot fail.
        let uid = unsafe { libc::geteuid() };
        Some(Identity { uid, name: user_name(uid) })
    }
}

#[cfg(not(unix))]
impl IdentitySource for PlatformIdentity {
    fn effective_identity(&self) -> Option<Identity> {
        None
    }
}

/// Identity source for platforms (or tests) without uid support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIdentity;

impl IdentitySource for NoIdentity {
    fn effective_identity(&self) -> Option<Identity> {
        None
    }
}

/// Fixed identity, mainly for tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub Identity);

impl IdentitySource for StaticIdentity {
    fn effective_identity(&self) -> Option<Identity> {
        Some(self.0.clone())
    }
}

#[cfg(unix)]
const MAX_PWD_BUF: usize = 1 << 20;

/// Resolve `uid` to a user name via `getpwuid_r`, growing the buffer on ERANGE.
#[cfg(unix)]
fn user_name(uid: libc::uid_t) -> Option<String> {
    use std::ffi::CStr;

    // SAFETY: sysconf is always safe to call.
    let hint = unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) };
    let mut buf_len = if hint > 0 { hint as usize } else { 1024 };

    loop {
        let mut buf: Vec<libc::c_char> = vec![0; buf_len];
        // SAFETY: passwd is plain old data; getpwuid_r fills it in.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        // SAFETY: all pointers are valid for the duration of the call and
        // `buf.len()` is the real capacity of `buf`.
        let rc = unsafe { libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result) };

        if rc == libc::ERANGE && buf_len < MAX_PWD_BUF {
            buf_len *= 2;
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }
        // SAFETY: pw_name points into `buf`, which is still alive, and is NUL-terminated.
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

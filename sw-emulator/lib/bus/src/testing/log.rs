/*++

Licensed under the Apache-2.0 license.

File Name:

    log.rs

Abstract:

    File contains a shared text log used by fake buses and peripheral
    models to record register traffic in unit tests.

--*/
use std::{
    cell::{Ref, RefCell},
    fmt::Write,
    ops::Deref,
    rc::Rc,
};

/// A line-oriented log that can be appended to without `&mut self`.
///
/// Clones share the same buffer, so a test can keep a handle to the log of a
/// peripheral after the peripheral has been moved into a bus.
///
/// ```
/// use harvos_emu_bus::testing::Log;
/// use std::fmt::Write;
///
/// let log = Log::new();
/// writeln!(log.w(), "write(0x4, 0x10000)").unwrap();
/// writeln!(log.clone().w(), "write(0x0, 0x1)").unwrap();
/// assert_eq!(log.lines(), ["write(0x4, 0x10000)", "write(0x0, 0x1)"]);
/// assert_eq!("write(0x4, 0x10000)\nwrite(0x0, 0x1)\n", log.take());
/// assert!(log.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Log {
    buf: Rc<RefCell<String>>,
}
impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the contents of the log without clearing it.
    pub fn as_str(&self) -> impl Deref<Target = str> + '_ {
        Ref::map(self.buf.borrow(), String::as_str)
    }

    /// Returns the recorded lines without clearing the log.
    pub fn lines(&self) -> Vec<String> {
        self.buf.borrow().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    /// Clears the log and returns what it held.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buf.borrow_mut())
    }

    /// A writer for use with write!() or writeln!().
    pub fn w(&self) -> impl Write + '_ {
        LogWriter { buf: &self.buf }
    }
}

struct LogWriter<'a> {
    buf: &'a RefCell<String>,
}
impl Write for LogWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.buf.borrow_mut().write_str(s)
    }
}

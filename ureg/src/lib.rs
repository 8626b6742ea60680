// Licensed under the Apache-2.0 license

//! Typed, volatile access to memory-mapped registers.
//!
//! Register blocks are generic over an [`Mmio`] implementation so that the
//! same driver code can talk to real hardware ([`RealMmioMut`]) or to an
//! emulated bus in unit tests.
#![no_std]

#[cfg(test)]
extern crate std;

use core::marker::PhantomData;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// An unsigned integer that can be stored in a register.
pub trait Uint: Clone + Copy + Default + TryInto<u32> + private::Sealed {
    /// Truncates `val` to the width of `Self`.
    fn from_u32(val: u32) -> Self;
}
impl Uint for u8 {
    fn from_u32(val: u32) -> Self {
        val as u8
    }
}
impl Uint for u16 {
    fn from_u32(val: u32) -> Self {
        val as u16
    }
}
impl Uint for u32 {
    fn from_u32(val: u32) -> Self {
        val
    }
}

/// Read access to memory-mapped I/O.
pub trait Mmio: Sized {
    /// Loads a value from `src`.
    ///
    /// # Safety
    ///
    /// Same as [`core::ptr::read_volatile`]; implementations that don't
    /// dereference `src` may relax this.
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T;
}

/// Write access to memory-mapped I/O.
///
/// Every call must result in exactly one store, issued in program order
/// relative to every other call on the same implementation.
pub trait MmioMut: Mmio {
    /// Stores `src` to `dst`.
    ///
    /// # Safety
    ///
    /// Same as [`core::ptr::write_volatile`]; implementations that don't
    /// dereference `dst` may relax this.
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T);
}

impl<TMmio: Mmio> Mmio for &TMmio {
    #[inline(always)]
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T {
        (*self).read_volatile(src)
    }
}
impl<TMmio: MmioMut> MmioMut for &TMmio {
    #[inline(always)]
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T) {
        (*self).write_volatile(dst, src)
    }
}

/// Read-write access to real hardware.
#[derive(Clone, Copy, Default)]
pub struct RealMmioMut<'a>(PhantomData<&'a mut ()>);
impl Mmio for RealMmioMut<'_> {
    #[inline(always)]
    unsafe fn read_volatile<T: Uint>(&self, src: *const T) -> T {
        core::ptr::read_volatile(src)
    }
}
impl MmioMut for RealMmioMut<'_> {
    #[inline(always)]
    unsafe fn write_volatile<T: Uint>(&self, dst: *mut T, src: T) {
        core::ptr::write_volatile(dst, src)
    }
}

pub trait RegType {
    type Raw: Uint;
}

pub trait ReadableReg: RegType {
    type ReadVal: Copy + From<Self::Raw>;
}

pub trait WritableReg: RegType {
    type WriteVal: Copy + From<Self::Raw> + Into<Self::Raw>;
}

pub trait ResettableReg: RegType {
    /// The value a write closure starts from.
    const RESET_VAL: Self::Raw;
}

pub struct WriteOnlyReg32<const RESET_VAL: u32, TWriteVal: Copy + From<u32> + Into<u32>> {
    phantom: PhantomData<TWriteVal>,
}
impl<const RESET_VAL: u32, TWriteVal: Copy + From<u32> + Into<u32>> RegType
    for WriteOnlyReg32<RESET_VAL, TWriteVal>
{
    type Raw = u32;
}
impl<const RESET_VAL: u32, TWriteVal: Copy + From<u32> + Into<u32>> WritableReg
    for WriteOnlyReg32<RESET_VAL, TWriteVal>
{
    type WriteVal = TWriteVal;
}
impl<const RESET_VAL: u32, TWriteVal: Copy + From<u32> + Into<u32>> ResettableReg
    for WriteOnlyReg32<RESET_VAL, TWriteVal>
{
    const RESET_VAL: u32 = RESET_VAL;
}

pub struct ReadWriteReg32<
    const RESET_VAL: u32,
    TReadVal: Copy + From<u32>,
    TWriteVal: Copy + From<u32> + Into<u32>,
> {
    phantom: PhantomData<(TReadVal, TWriteVal)>,
}
impl<const RESET_VAL: u32, TReadVal: Copy + From<u32>, TWriteVal: Copy + From<u32> + Into<u32>>
    RegType for ReadWriteReg32<RESET_VAL, TReadVal, TWriteVal>
{
    type Raw = u32;
}
impl<const RESET_VAL: u32, TReadVal: Copy + From<u32>, TWriteVal: Copy + From<u32> + Into<u32>>
    ReadableReg for ReadWriteReg32<RESET_VAL, TReadVal, TWriteVal>
{
    type ReadVal = TReadVal;
}
impl<const RESET_VAL: u32, TReadVal: Copy + From<u32>, TWriteVal: Copy + From<u32> + Into<u32>>
    WritableReg for ReadWriteReg32<RESET_VAL, TReadVal, TWriteVal>
{
    type WriteVal = TWriteVal;
}
impl<const RESET_VAL: u32, TReadVal: Copy + From<u32>, TWriteVal: Copy + From<u32> + Into<u32>>
    ResettableReg for ReadWriteReg32<RESET_VAL, TReadVal, TWriteVal>
{
    const RESET_VAL: u32 = RESET_VAL;
}

/// A reference to a single register at a fixed address.
pub struct RegRef<TReg: RegType, TMmio: Mmio> {
    mmio: TMmio,
    ptr: *mut TReg::Raw,
}
impl<TReg: RegType, TMmio: Mmio> RegRef<TReg, TMmio> {
    /// # Safety
    ///
    /// The caller is responsible for ensuring that ptr is valid for
    /// volatile reads and writes through `mmio`.
    #[inline(always)]
    pub unsafe fn new_with_mmio(ptr: *mut TReg::Raw, mmio: TMmio) -> Self {
        Self { mmio, ptr }
    }

    #[inline(always)]
    pub fn ptr(&self) -> *mut TReg::Raw {
        self.ptr
    }
}
impl<TReg: ReadableReg, TMmio: Mmio> RegRef<TReg, TMmio> {
    #[inline(always)]
    pub fn read(&self) -> TReg::ReadVal {
        let raw = unsafe { self.mmio.read_volatile(self.ptr) };
        TReg::ReadVal::from(raw)
    }
}
impl<TReg: ResettableReg + WritableReg, TMmio: MmioMut> RegRef<TReg, TMmio> {
    /// Stores `f(reset_value)` to the register with a single volatile write.
    #[inline(always)]
    pub fn write(&self, f: impl FnOnce(TReg::WriteVal) -> TReg::WriteVal) {
        let val = f(TReg::WriteVal::from(TReg::RESET_VAL));
        unsafe { self.mmio.write_volatile(self.ptr, val.into()) }
    }
}

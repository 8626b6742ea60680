// Licensed under the Apache-2.0 license
//
// Register block of the HarvOS DMA firewall configuration unit (fwcfg).
//
#![allow(clippy::erasing_op)]
#![allow(clippy::identity_op)]

/// A zero-sized type that represents ownership of this
/// peripheral, used to get access to a Register lock. Most
/// programs create one of these in unsafe code near the top of
/// main(), and pass it to the driver responsible for managing
/// all access to the hardware.
pub struct FwCfgReg {
    // Ensure the only way to create this is via Self::new()
    _priv: (),
}
impl FwCfgReg {
    pub const ADDR: u32 = 0x1000_f000;
    pub const PTR: *mut u32 = Self::ADDR as *mut u32;

    /// # Safety
    ///
    /// Caller must ensure that all concurrent use of this
    /// peripheral in the firmware is done so in a compatible
    /// way. The simplest way to enforce this is to only call
    /// this function once.
    #[inline(always)]
    pub unsafe fn new() -> Self {
        Self { _priv: () }
    }

    /// Trades the ownership token for a register block that can read
    /// and write this peripheral's registers for the rest of the program.
    #[inline(always)]
    pub fn into_regs_mut(self) -> RegisterBlock<ureg::RealMmioMut<'static>> {
        RegisterBlock {
            ptr: Self::PTR,
            mmio: core::default::Default::default(),
        }
    }
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
pub struct RegisterBlock<TMmio: ureg::Mmio> {
    ptr: *mut u32,
    mmio: TMmio,
}
impl<TMmio: ureg::Mmio> RegisterBlock<TMmio> {
    /// # Safety
    ///
    /// The caller is responsible for ensuring that ptr is valid for
    /// volatile reads and writes at any of the offsets in this register
    /// block.
    #[inline(always)]
    pub unsafe fn new_with_mmio(ptr: *mut u32, mmio: TMmio) -> Self {
        Self { ptr, mmio }
    }

    #[inline(always)]
    pub fn ptr(&self) -> *mut u32 {
        self.ptr
    }

    /// Lock control. Writing 1 to LOCK blocks every further write to
    /// ROM_BYTES, PBASE0, PMASK0 and PCTRL0 until reset.
    ///
    /// Read value: implementation-defined
    /// Write value: [`regs::ControlWriteVal`]
    #[inline(always)]
    pub fn control(&self) -> ureg::RegRef<crate::fwcfg::meta::Control, &TMmio> {
        unsafe {
            ureg::RegRef::new_with_mmio(
                self.ptr.wrapping_add(0x0 / core::mem::size_of::<u32>()),
                &self.mmio,
            )
        }
    }

    /// Instruction-space threshold in bytes.
    ///
    /// Read value: [`u32`]; Write value: [`u32`]
    #[inline(always)]
    pub fn rom_bytes(&self) -> ureg::RegRef<crate::fwcfg::meta::RomBytes, &TMmio> {
        unsafe {
            ureg::RegRef::new_with_mmio(
                self.ptr.wrapping_add(0x4 / core::mem::size_of::<u32>()),
                &self.mmio,
            )
        }
    }

    /// Region 0 base address.
    ///
    /// Read value: [`u32`]; Write value: [`u32`]
    #[inline(always)]
    pub fn pbase0(&self) -> ureg::RegRef<crate::fwcfg::meta::Pbase0, &TMmio> {
        unsafe {
            ureg::RegRef::new_with_mmio(
                self.ptr.wrapping_add(0x8 / core::mem::size_of::<u32>()),
                &self.mmio,
            )
        }
    }

    /// Region 0 address mask.
    ///
    /// Read value: [`u32`]; Write value: [`u32`]
    #[inline(always)]
    pub fn pmask0(&self) -> ureg::RegRef<crate::fwcfg::meta::Pmask0, &TMmio> {
        unsafe {
            ureg::RegRef::new_with_mmio(
                self.ptr.wrapping_add(0xc / core::mem::size_of::<u32>()),
                &self.mmio,
            )
        }
    }

    /// Region 0 access control.
    ///
    /// Read value: [`regs::Pctrl0ReadVal`]; Write value: [`regs::Pctrl0WriteVal`]
    #[inline(always)]
    pub fn pctrl0(&self) -> ureg::RegRef<crate::fwcfg::meta::Pctrl0, &TMmio> {
        unsafe {
            ureg::RegRef::new_with_mmio(
                self.ptr.wrapping_add(0x10 / core::mem::size_of::<u32>()),
                &self.mmio,
            )
        }
    }
}

pub mod offsets {
    //! Byte offsets of each register from the block base.
    pub const CONTROL: u32 = 0x0;
    pub const ROM_BYTES: u32 = 0x4;
    pub const PBASE0: u32 = 0x8;
    pub const PMASK0: u32 = 0xc;
    pub const PCTRL0: u32 = 0x10;

    /// Size of the register block in bytes.
    pub const BLOCK_SIZE: u32 = 0x14;
}

pub mod regs {
    //! Types that represent the values held by registers.

    #[derive(Clone, Copy)]
    pub struct ControlWriteVal(u32);
    impl ControlWriteVal {
        /// Latch the configuration. Sticky until reset; writing 0 has no effect.
        #[inline(always)]
        pub fn lock(self, val: bool) -> Self {
            Self((self.0 & !(1 << 0)) | (u32::from(val) << 0))
        }
    }
    impl From<u32> for ControlWriteVal {
        #[inline(always)]
        fn from(val: u32) -> Self {
            Self(val)
        }
    }
    impl From<ControlWriteVal> for u32 {
        #[inline(always)]
        fn from(val: ControlWriteVal) -> u32 {
            val.0
        }
    }

    #[derive(Clone, Copy)]
    pub struct Pctrl0ReadVal(u32);
    impl Pctrl0ReadVal {
        /// When set, DMA agents may write to the region but not read it.
        #[inline(always)]
        pub fn write_only(&self) -> bool {
            ((self.0 >> 0) & 1) != 0
        }
        /// Construct a WriteVal that can be used to modify the contents of this register value.
        #[inline(always)]
        pub fn modify(self) -> Pctrl0WriteVal {
            Pctrl0WriteVal(self.0)
        }
    }
    impl From<u32> for Pctrl0ReadVal {
        #[inline(always)]
        fn from(val: u32) -> Self {
            Self(val)
        }
    }
    impl From<Pctrl0ReadVal> for u32 {
        #[inline(always)]
        fn from(val: Pctrl0ReadVal) -> u32 {
            val.0
        }
    }

    #[derive(Clone, Copy)]
    pub struct Pctrl0WriteVal(u32);
    impl Pctrl0WriteVal {
        /// When set, DMA agents may write to the region but not read it.
        #[inline(always)]
        pub fn write_only(self, val: bool) -> Self {
            Self((self.0 & !(1 << 0)) | (u32::from(val) << 0))
        }
    }
    impl From<u32> for Pctrl0WriteVal {
        #[inline(always)]
        fn from(val: u32) -> Self {
            Self(val)
        }
    }
    impl From<Pctrl0WriteVal> for u32 {
        #[inline(always)]
        fn from(val: Pctrl0WriteVal) -> u32 {
            val.0
        }
    }
}

pub mod meta {
    //! Additional metadata needed by ureg.
    pub type Control = ureg::WriteOnlyReg32<0, crate::fwcfg::regs::ControlWriteVal>;
    pub type RomBytes = ureg::ReadWriteReg32<0, u32, u32>;
    pub type Pbase0 = ureg::ReadWriteReg32<0, u32, u32>;
    pub type Pmask0 = ureg::ReadWriteReg32<0, u32, u32>;
    pub type Pctrl0 = ureg::ReadWriteReg32<
        0,
        crate::fwcfg::regs::Pctrl0ReadVal,
        crate::fwcfg::regs::Pctrl0WriteVal,
    >;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_addresses() {
        let block = unsafe { FwCfgReg::new() }.into_regs_mut();
        assert_eq!(block.ptr() as usize, 0x1000_f000);
        assert_eq!(block.control().ptr() as usize, 0x1000_f000);
        assert_eq!(block.rom_bytes().ptr() as usize, 0x1000_f004);
        assert_eq!(block.pbase0().ptr() as usize, 0x1000_f008);
        assert_eq!(block.pmask0().ptr() as usize, 0x1000_f00c);
        assert_eq!(block.pctrl0().ptr() as usize, 0x1000_f010);
    }

    #[test]
    fn test_field_encoding() {
        assert_eq!(u32::from(regs::ControlWriteVal::from(0).lock(true)), 1);
        assert_eq!(u32::from(regs::ControlWriteVal::from(1).lock(false)), 0);
        assert_eq!(
            u32::from(regs::Pctrl0WriteVal::from(0).write_only(true)),
            1
        );
        assert!(regs::Pctrl0ReadVal::from(0xffff_ffff).write_only());
        assert!(!regs::Pctrl0ReadVal::from(0xffff_fffe).write_only());
        assert_eq!(
            u32::from(regs::Pctrl0ReadVal::from(1).modify().write_only(false)),
            0
        );
    }
}

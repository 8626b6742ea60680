/*++

Licensed under the Apache-2.0 license.

File Name:

    fwcfg.rs

Abstract:

    File contains the driver for the DMA firewall configuration block.

--*/

use harvos_registers::fwcfg::{FwCfgReg, RegisterBlock};
use ureg::{MmioMut, RealMmioMut};

/// Register interface of one fwcfg block.
///
/// Every setter is a single 32-bit store, issued in call order, with no
/// read-back and no validation. Stores to ROM_BYTES, PBASE0, PMASK0 and
/// PCTRL0 are ignored by the hardware once [`FwCfg::lock`] has been called.
pub struct FwCfg<TMmio: MmioMut = RealMmioMut<'static>> {
    regs: RegisterBlock<TMmio>,
}

impl FwCfg {
    pub fn new(fwcfg: FwCfgReg) -> Self {
        Self {
            regs: fwcfg.into_regs_mut(),
        }
    }
}

impl<TMmio: MmioMut> FwCfg<TMmio> {
    /// Creates a handle for a block at `base` reached through `mmio`.
    ///
    /// # Safety
    ///
    /// `base` must address a fwcfg block through `mmio`, and no other
    /// handle may drive the same block.
    pub unsafe fn new_with_mmio(base: u32, mmio: TMmio) -> Self {
        Self {
            regs: RegisterBlock::new_with_mmio(base as usize as *mut u32, mmio),
        }
    }

    /// Base address of the block this handle drives.
    pub fn base(&self) -> u32 {
        self.regs.ptr() as usize as u32
    }

    /// Sets the instruction-space threshold in bytes.
    pub fn set_rom_bytes(&mut self, rom_bytes: u32) {
        self.regs.rom_bytes().write(|_| rom_bytes);
    }

    /// Sets the region 0 base address.
    pub fn set_region_base(&mut self, base: u32) {
        self.regs.pbase0().write(|_| base);
    }

    /// Sets the region 0 address mask.
    pub fn set_region_mask(&mut self, mask: u32) {
        self.regs.pmask0().write(|_| mask);
    }

    /// Sets the region 0 control word. Only bit 0 (WRITE_ONLY) is stored;
    /// the other bits of `ctrl` are dropped.
    pub fn set_region_ctrl(&mut self, ctrl: u32) {
        self.regs.pctrl0().write(|w| w.write_only(ctrl & 1 != 0));
    }

    /// Latches the configuration until the next reset.
    pub fn lock(&mut self) {
        // Programming stores must land before the lock does.
        harvos_cpu::csr::fence();
        self.regs.control().write(|w| w.lock(true));
    }
}

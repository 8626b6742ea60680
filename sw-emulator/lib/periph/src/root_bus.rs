/*++

Licensed under the Apache-2.0 license.

File Name:

    root_bus.rs

Abstract:

    File contains the root Bus implementation for a full HarvOS system.

--*/

use crate::FwCfgPeriph;
use harvos_emu_bus::{Bus, BusError, RvAddr, RvData, RvSize};
use harvos_registers::fwcfg::FwCfgReg;

/// Routes physical addresses to the peripheral mapped there.
pub struct HarvosRootBus {
    pub fwcfg: FwCfgPeriph,
}

impl HarvosRootBus {
    pub const FWCFG_OFFSET: RvAddr = FwCfgReg::ADDR;

    pub fn new() -> Self {
        Self {
            fwcfg: FwCfgPeriph::new(),
        }
    }

    fn fwcfg_offset(&self, addr: RvAddr) -> Option<RvAddr> {
        addr.checked_sub(Self::FWCFG_OFFSET)
            .filter(|offset| *offset < self.fwcfg.mmap_size())
    }
}

impl Default for HarvosRootBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for HarvosRootBus {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match self.fwcfg_offset(addr) {
            Some(offset) => self.fwcfg.read(size, offset),
            None => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        match self.fwcfg_offset(addr) {
            Some(offset) => self.fwcfg.write(size, offset, val),
            None => Err(BusError::StoreAccessFault),
        }
    }

    fn warm_reset(&mut self) {
        self.fwcfg.warm_reset();
    }
}

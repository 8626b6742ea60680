/*++

Licensed under the Apache-2.0 license.

File Name:

    fwcfg.rs

Abstract:

    File contains the DMA firewall configuration (fwcfg) peripheral model.

--*/

use harvos_emu_bus::testing::Log;
use harvos_emu_bus::{Bus, BusError, RvAddr, RvData, RvSize};
use harvos_registers::fwcfg::offsets;
use std::fmt::Write;
use tock_registers::register_bitfields;
use tock_registers::LocalRegisterCopy;

register_bitfields! [
    u32,

    Control [
        LOCK OFFSET(0) NUMBITS(1) [],
    ],

    RegionCtrl [
        WRITE_ONLY OFFSET(0) NUMBITS(1) [],
    ],
];

/// DMA firewall configuration block.
///
/// Models the sticky lock: once LOCK has been written as 1, every write to
/// ROM_BYTES, PBASE0, PMASK0 and PCTRL0 is silently discarded until
/// [`Bus::warm_reset`]. Enforcement of the programmed window is live from the
/// moment the registers are written, independent of the lock.
///
/// Every store that reaches the block is recorded in [`FwCfgPeriph::log`] as
/// `write(NAME, value)`, with ` discarded` appended when the lock dropped it.
pub struct FwCfgPeriph {
    /// Control register
    control: LocalRegisterCopy<u32, Control::Register>,

    /// Instruction-space threshold
    rom_bytes: u32,

    /// Region 0 base
    pbase0: u32,

    /// Region 0 mask
    pmask0: u32,

    /// Region 0 control, reserved bits kept as written
    pctrl0: LocalRegisterCopy<u32, RegionCtrl::Register>,

    log: Log,
}

impl FwCfgPeriph {
    pub fn new() -> Self {
        Self {
            control: LocalRegisterCopy::new(0),
            rom_bytes: 0,
            pbase0: 0,
            pmask0: 0,
            pctrl0: LocalRegisterCopy::new(0),
            log: Log::new(),
        }
    }

    /// Memory map size.
    pub fn mmap_size(&self) -> RvAddr {
        offsets::BLOCK_SIZE
    }

    /// Handle to the write log. Clones share the same buffer.
    pub fn log(&self) -> Log {
        self.log.clone()
    }

    pub fn locked(&self) -> bool {
        self.control.is_set(Control::LOCK)
    }

    pub fn rom_bytes(&self) -> u32 {
        self.rom_bytes
    }

    pub fn pbase0(&self) -> u32 {
        self.pbase0
    }

    pub fn pmask0(&self) -> u32 {
        self.pmask0
    }

    pub fn pctrl0(&self) -> u32 {
        self.pctrl0.get()
    }

    pub fn control(&self) -> u32 {
        self.control.get()
    }

    /// True if `addr` falls inside the region 0 window.
    pub fn region_matches(&self, addr: RvAddr) -> bool {
        (addr & self.pmask0) == (self.pbase0 & self.pmask0)
    }

    /// True if `addr` lies below the instruction-space threshold.
    pub fn is_instruction_space(&self, addr: RvAddr) -> bool {
        addr < self.rom_bytes
    }

    /// True if a DMA agent may read `addr`. Matched addresses are never
    /// readable, whatever WRITE_ONLY says.
    pub fn dma_read_allowed(&self, addr: RvAddr) -> bool {
        !self.region_matches(addr)
    }

    /// True if a DMA agent may write `addr`. Matched addresses are writable
    /// only in WRITE_ONLY mode.
    pub fn dma_write_allowed(&self, addr: RvAddr) -> bool {
        !self.region_matches(addr) || self.pctrl0.is_set(RegionCtrl::WRITE_ONLY)
    }

    fn write_config(&mut self, name: &str, addr: RvAddr, val: RvData) {
        if self.locked() {
            writeln!(self.log.w(), "write({name}, {val:#x}) discarded").unwrap();
            return;
        }
        writeln!(self.log.w(), "write({name}, {val:#x})").unwrap();
        match addr {
            offsets::ROM_BYTES => self.rom_bytes = val,
            offsets::PBASE0 => self.pbase0 = val,
            offsets::PMASK0 => self.pmask0 = val,
            offsets::PCTRL0 => self.pctrl0.set(val),
            _ => unreachable!(),
        }
    }
}

impl Default for FwCfgPeriph {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FwCfgPeriph {
    /// Read data of specified size from given address
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the read
    /// * `addr` - Address to read from
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::LoadAccessFault`
    ///                or `BusError::LoadAddrMisaligned`
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word {
            Err(BusError::LoadAccessFault)?
        }
        if addr & 0x3 != 0 {
            Err(BusError::LoadAddrMisaligned)?
        }
        match addr {
            // Reads of CONTROL are implementation-defined; this model
            // returns the lock state.
            offsets::CONTROL => Ok(self.control.get()),
            offsets::ROM_BYTES => Ok(self.rom_bytes),
            offsets::PBASE0 => Ok(self.pbase0),
            offsets::PMASK0 => Ok(self.pmask0),
            offsets::PCTRL0 => Ok(self.pctrl0.get()),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    /// Write data of specified size to given address
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the write
    /// * `addr` - Address to write
    /// * `val` - Data to write
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::StoreAccessFault`
    ///                or `BusError::StoreAddrMisaligned`
    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        // Writes have to be word-aligned
        if size != RvSize::Word {
            Err(BusError::StoreAccessFault)?
        }
        if addr & 0x3 != 0 {
            Err(BusError::StoreAddrMisaligned)?
        }
        match addr {
            offsets::CONTROL => {
                writeln!(self.log.w(), "write(CONTROL, {val:#x})").unwrap();
                // Write-1-to-set; a 0 never clears the lock.
                if LocalRegisterCopy::<u32, Control::Register>::new(val).is_set(Control::LOCK) {
                    self.control.modify(Control::LOCK::SET);
                }
            }
            offsets::ROM_BYTES => self.write_config("ROM_BYTES", addr, val),
            offsets::PBASE0 => self.write_config("PBASE0", addr, val),
            offsets::PMASK0 => self.write_config("PMASK0", addr, val),
            offsets::PCTRL0 => self.write_config("PCTRL0", addr, val),
            _ => Err(BusError::StoreAccessFault)?,
        }
        Ok(())
    }

    fn warm_reset(&mut self) {
        let log = self.log.clone();
        *self = Self { log, ..Self::new() };
        writeln!(self.log.w(), "reset").unwrap();
    }
}

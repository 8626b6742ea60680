/*++

Licensed under the Apache-2.0 license.

File Name:

    firewall.rs

Abstract:

    File contains the DMA firewall policy type and the routines that
    program and lock it into a fwcfg block.

--*/

use crate::FwCfg;
use harvos_error::{HarvosError, HarvosResult};
use ureg::MmioMut;

/// One firewall policy: an instruction-space threshold plus a single
/// base/mask region with its DMA access mode.
///
/// An address `a` is in the region when `(a & region_mask) == (region_base & region_mask)`.
/// DMA agents may never read a matched address. With `write_only` set they
/// may still write it; otherwise writes are blocked too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirewallConfig {
    /// Byte offset below which memory is instruction space (ROM_BYTES).
    pub threshold_bytes: u32,

    /// Region 0 base address (PBASE0).
    pub region_base: u32,

    /// Region 0 address mask (PMASK0).
    pub region_mask: u32,

    /// Region 0 access mode (PCTRL0.WRITE_ONLY).
    pub write_only: bool,
}

impl FirewallConfig {
    pub const fn new(threshold_bytes: u32, region_base: u32, region_mask: u32, write_only: bool) -> Self {
        Self {
            threshold_bytes,
            region_base,
            region_mask,
            write_only,
        }
    }

    pub const fn region_matches(&self, addr: u32) -> bool {
        (addr & self.region_mask) == (self.region_base & self.region_mask)
    }

    pub const fn is_instruction_space(&self, addr: u32) -> bool {
        addr < self.threshold_bytes
    }

    /// Size of the region in bytes, or `None` if the mask is not a
    /// contiguous run of high bits.
    pub const fn region_size(&self) -> Option<u64> {
        let low = !self.region_mask;
        if low & low.wrapping_add(1) == 0 {
            Some(low as u64 + 1)
        } else {
            None
        }
    }

    pub const fn dma_read_blocked(&self, addr: u32) -> bool {
        self.region_matches(addr)
    }

    pub const fn dma_write_blocked(&self, addr: u32) -> bool {
        self.region_matches(addr) && !self.write_only
    }

    /// Checks the policy against a platform with `memory_size` bytes of
    /// physical memory.
    ///
    /// A zero mask would match every address and cut DMA off from all of
    /// memory, so it is rejected.
    pub fn validate(&self, memory_size: u32) -> HarvosResult<()> {
        if self.region_mask == 0 {
            return Err(HarvosError::DRIVER_FWCFG_ZERO_REGION_MASK);
        }
        if self.threshold_bytes > memory_size {
            return Err(HarvosError::DRIVER_FWCFG_THRESHOLD_EXCEEDS_MEMORY);
        }
        Ok(())
    }
}

/// Firewall configurator.
pub struct Firewall {}

impl Firewall {
    /// Programs `config` without locking it.
    ///
    /// Stores are issued as ROM_BYTES, PBASE0, PMASK0, PCTRL0. Each one is
    /// enforced as soon as it lands, so calling this again before
    /// [`Firewall::lock`] replaces the earlier policy.
    pub fn program<TMmio: MmioMut>(fwcfg: &mut FwCfg<TMmio>, config: &FirewallConfig) {
        Self::program_raw(
            fwcfg,
            config.threshold_bytes,
            config.region_base,
            config.region_mask,
            u32::from(config.write_only),
        );
    }

    /// Same as [`Firewall::program`] with a raw PCTRL0 word. Only bit 0 of
    /// `write_only` reaches the hardware.
    pub fn program_raw<TMmio: MmioMut>(
        fwcfg: &mut FwCfg<TMmio>,
        rom_bytes: u32,
        pbase0: u32,
        pmask0: u32,
        write_only: u32,
    ) {
        fwcfg.set_rom_bytes(rom_bytes);
        fwcfg.set_region_base(pbase0);
        fwcfg.set_region_mask(pmask0);
        fwcfg.set_region_ctrl(write_only);
    }

    /// Seals whatever has been programmed. Irreversible until reset.
    pub fn lock<TMmio: MmioMut>(fwcfg: &mut FwCfg<TMmio>) {
        fwcfg.lock();
    }

    /// Validates `config`, programs it and locks it.
    ///
    /// Nothing is written when validation fails. On a block that is
    /// already locked the stores are issued but have no effect.
    pub fn apply<TMmio: MmioMut>(
        fwcfg: &mut FwCfg<TMmio>,
        config: &FirewallConfig,
        memory_size: u32,
    ) -> HarvosResult<()> {
        config.validate(memory_size)?;
        Self::program(fwcfg, config);
        Self::lock(fwcfg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvos_emu_bus::BusMmio;
    use harvos_emu_periph::{FwCfgPeriph, HarvosRootBus};

    const MBOX_WINDOW: FirewallConfig =
        FirewallConfig::new(0x0001_0000, 0x3000_0000, 0xffff_0000, false);

    #[test]
    fn test_region_matches() {
        assert!(MBOX_WINDOW.region_matches(0x3000_0000));
        assert!(MBOX_WINDOW.region_matches(0x3000_1234));
        assert!(MBOX_WINDOW.region_matches(0x3000_ffff));
        assert!(!MBOX_WINDOW.region_matches(0x3001_0000));
        assert!(!MBOX_WINDOW.region_matches(0x3100_0000));
        assert!(!MBOX_WINDOW.region_matches(0x2fff_ffff));
    }

    #[test]
    fn test_region_base_bits_outside_mask_are_ignored() {
        let config = FirewallConfig::new(0, 0x3000_abcd, 0xffff_0000, false);
        assert!(config.region_matches(0x3000_0000));
        assert!(!config.region_matches(0x3001_abcd));
    }

    #[test]
    fn test_is_instruction_space() {
        assert!(MBOX_WINDOW.is_instruction_space(0));
        assert!(MBOX_WINDOW.is_instruction_space(0xffff));
        assert!(!MBOX_WINDOW.is_instruction_space(0x1_0000));
        assert!(!FirewallConfig::default().is_instruction_space(0));
    }

    #[test]
    fn test_region_size() {
        assert_eq!(MBOX_WINDOW.region_size(), Some(0x1_0000));
        assert_eq!(
            FirewallConfig::new(0, 0, 0xffff_ffff, false).region_size(),
            Some(1)
        );
        assert_eq!(FirewallConfig::new(0, 0, 0, false).region_size(), Some(1 << 32));
        assert_eq!(
            FirewallConfig::new(0, 0, 0xff00_ff00, false).region_size(),
            None
        );
        assert_eq!(
            FirewallConfig::new(0, 0, 0x0000_ffff, false).region_size(),
            None
        );
    }

    #[test]
    fn test_access_modes() {
        assert!(MBOX_WINDOW.dma_read_blocked(0x3000_0010));
        assert!(MBOX_WINDOW.dma_write_blocked(0x3000_0010));
        assert!(!MBOX_WINDOW.dma_read_blocked(0x4000_0000));
        assert!(!MBOX_WINDOW.dma_write_blocked(0x4000_0000));

        let write_only = FirewallConfig {
            write_only: true,
            ..MBOX_WINDOW
        };
        assert!(write_only.dma_read_blocked(0x3000_0010));
        assert!(!write_only.dma_write_blocked(0x3000_0010));
    }

    #[test]
    fn test_validate() {
        assert_eq!(MBOX_WINDOW.validate(0x1_0000), Ok(()));
        assert_eq!(
            MBOX_WINDOW.validate(0xffff),
            Err(HarvosError::DRIVER_FWCFG_THRESHOLD_EXCEEDS_MEMORY)
        );
        let zero_mask = FirewallConfig {
            region_mask: 0,
            ..MBOX_WINDOW
        };
        assert_eq!(
            zero_mask.validate(u32::MAX),
            Err(HarvosError::DRIVER_FWCFG_ZERO_REGION_MASK)
        );
    }

    #[test]
    fn test_apply_write_order() {
        let mmio = BusMmio::new(HarvosRootBus::new());
        let mut fwcfg = unsafe { FwCfg::new_with_mmio(0x1000_f000, &mmio) };
        Firewall::apply(&mut fwcfg, &MBOX_WINDOW, 0x4_0000).unwrap();
        assert_eq!(
            mmio.bus().fwcfg.log().lines(),
            [
                "write(ROM_BYTES, 0x10000)",
                "write(PBASE0, 0x30000000)",
                "write(PMASK0, 0xffff0000)",
                "write(PCTRL0, 0x0)",
                "write(CONTROL, 0x1)",
            ]
        );
    }

    #[test]
    fn test_apply_rejects_before_any_store() {
        let mmio = BusMmio::new(HarvosRootBus::new());
        let mut fwcfg = unsafe { FwCfg::new_with_mmio(0x1000_f000, &mmio) };
        let config = FirewallConfig {
            region_mask: 0,
            ..MBOX_WINDOW
        };
        assert_eq!(
            Firewall::apply(&mut fwcfg, &config, u32::MAX),
            Err(HarvosError::DRIVER_FWCFG_ZERO_REGION_MASK)
        );
        assert_eq!(
            Firewall::apply(&mut fwcfg, &MBOX_WINDOW, 0x8000),
            Err(HarvosError::DRIVER_FWCFG_THRESHOLD_EXCEEDS_MEMORY)
        );
        assert!(mmio.bus().fwcfg.log().is_empty());
    }

    #[test]
    fn test_program_does_not_lock() {
        let mmio = BusMmio::new(FwCfgPeriph::new());
        let mut fwcfg = unsafe { FwCfg::new_with_mmio(0, &mmio) };
        Firewall::program_raw(&mut fwcfg, 0, 0, 0, 7);
        assert!(!mmio.bus().locked());
        assert_eq!(mmio.bus().pctrl0(), 1);
        assert_eq!(
            mmio.bus().log().lines(),
            [
                "write(ROM_BYTES, 0x0)",
                "write(PBASE0, 0x0)",
                "write(PMASK0, 0x0)",
                "write(PCTRL0, 0x1)",
            ]
        );
    }
}

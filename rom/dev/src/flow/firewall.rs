/*++

Licensed under the Apache-2.0 license.

File Name:

    firewall.rs

Abstract:

    File contains the boot-time DMA firewall setup flow.

--*/

use crate::rom_env::RomEnv;
use harvos_drivers::memory_layout::{DMA_MBOX_ORG, DMA_MBOX_SIZE, MEMORY_SIZE, ROM_SIZE};
use harvos_drivers::{cprintln, Firewall, FirewallConfig, HexWord, ScapsRead};
use harvos_error::{HarvosError, HarvosResult};
use ureg::MmioMut;

/// Policy sealed at boot: ROM is instruction space and the DMA mailbox is
/// closed to DMA agents in both directions.
pub const BOOT_FIREWALL_CONFIG: FirewallConfig =
    FirewallConfig::new(ROM_SIZE, DMA_MBOX_ORG, !(DMA_MBOX_SIZE - 1), false);

/// DMA Firewall Flow
pub struct FirewallFlow {}

impl FirewallFlow {
    /// Programs and locks the boot firewall policy.
    ///
    /// # Arguments
    ///
    /// * `env` - ROM Environment
    ///
    /// Fails without touching fwcfg when SCAPS does not report DMA_FW.
    #[inline(never)]
    pub fn run<TMmio: MmioMut, TRead: ScapsRead>(
        env: &mut RomEnv<TMmio, TRead>,
    ) -> HarvosResult<()> {
        cprintln!("[fwcfg] ++");
        cprintln!("[scaps] {}", env.scaps.capabilities());

        if !env.scaps.dma_firewall_present() {
            cprintln!("[fwcfg] DMA firewall not present");
            return Err(HarvosError::ROM_FWCFG_DMA_FW_NOT_PRESENT);
        }

        let config = &BOOT_FIREWALL_CONFIG;
        cprintln!(
            "[fwcfg] base {} I-space {} region {}/{} wo {}",
            HexWord(env.fwcfg.base()),
            HexWord(config.threshold_bytes),
            HexWord(config.region_base),
            HexWord(config.region_mask),
            u8::from(config.write_only)
        );
        Firewall::apply(&mut env.fwcfg, config, MEMORY_SIZE)?;
        cprintln!("[fwcfg] Locked");

        cprintln!("[fwcfg] --");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_config() {
        assert_eq!(BOOT_FIREWALL_CONFIG.threshold_bytes, 0x0001_0000);
        assert_eq!(BOOT_FIREWALL_CONFIG.region_base, 0x3000_0000);
        assert_eq!(BOOT_FIREWALL_CONFIG.region_mask, 0xffff_0000);
        assert!(!BOOT_FIREWALL_CONFIG.write_only);
        assert_eq!(
            BOOT_FIREWALL_CONFIG.region_size(),
            Some(u64::from(DMA_MBOX_SIZE))
        );
        assert_eq!(BOOT_FIREWALL_CONFIG.validate(MEMORY_SIZE), Ok(()));
    }

    #[test]
    fn test_boot_config_covers_mailbox() {
        assert!(BOOT_FIREWALL_CONFIG.dma_read_blocked(DMA_MBOX_ORG));
        assert!(BOOT_FIREWALL_CONFIG.dma_write_blocked(DMA_MBOX_ORG + DMA_MBOX_SIZE - 4));
        assert!(!BOOT_FIREWALL_CONFIG.dma_read_blocked(DMA_MBOX_ORG + DMA_MBOX_SIZE));
        assert!(BOOT_FIREWALL_CONFIG.is_instruction_space(ROM_SIZE - 1));
        assert!(!BOOT_FIREWALL_CONFIG.is_instruction_space(ROM_SIZE));
    }
}

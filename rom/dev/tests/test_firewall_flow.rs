// Licensed under the Apache-2.0 license

use harvos_drivers::{FixedScaps, FwCfg, HarvosError, Scaps, SCAPS_DMA_FW};
use harvos_emu_bus::BusMmio;
use harvos_emu_periph::HarvosRootBus;
use harvos_registers::fwcfg::FwCfgReg;
use harvos_rom::flow::{flow_run, FirewallFlow, BOOT_FIREWALL_CONFIG};
use harvos_rom::{rom_main, RomEnv};

fn rom_env(
    mmio: &BusMmio<HarvosRootBus>,
    scaps: u32,
) -> RomEnv<&BusMmio<HarvosRootBus>, FixedScaps> {
    let fwcfg = unsafe { FwCfg::new_with_mmio(FwCfgReg::ADDR, mmio) };
    RomEnv::new(fwcfg, Scaps::new(FixedScaps(scaps)))
}

#[test]
fn test_firewall_locked_at_boot() {
    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, 0x2f);

    assert_eq!(FirewallFlow::run(&mut env), Ok(()));

    let bus = mmio.bus();
    assert!(bus.fwcfg.locked());
    assert_eq!(bus.fwcfg.rom_bytes(), BOOT_FIREWALL_CONFIG.threshold_bytes);
    assert_eq!(bus.fwcfg.pbase0(), 0x3000_0000);
    assert_eq!(bus.fwcfg.pmask0(), 0xffff_0000);
    assert_eq!(bus.fwcfg.pctrl0(), 0);
    assert!(!bus.fwcfg.dma_read_allowed(0x3000_0100));
    assert!(!bus.fwcfg.dma_write_allowed(0x3000_0100));
    assert!(bus.fwcfg.dma_write_allowed(0x0001_0000));
}

#[test]
fn test_missing_dma_fw_leaves_fwcfg_untouched() {
    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, 0x7f & !SCAPS_DMA_FW);

    assert_eq!(
        flow_run(&mut env),
        Err(HarvosError::ROM_FWCFG_DMA_FW_NOT_PRESENT)
    );

    let bus = mmio.bus();
    assert!(bus.fwcfg.log().is_empty());
    assert!(!bus.fwcfg.locked());
}

#[test]
fn test_reserved_scaps_bits_do_not_count() {
    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, 0xffff_ff80);

    assert_eq!(
        flow_run(&mut env),
        Err(HarvosError::ROM_FWCFG_DMA_FW_NOT_PRESENT)
    );
}

#[test]
fn test_rom_main_reports_code() {
    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, 0);
    assert_eq!(
        rom_main(&mut env),
        u32::from(HarvosError::ROM_FWCFG_DMA_FW_NOT_PRESENT)
    );

    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, SCAPS_DMA_FW);
    assert_eq!(rom_main(&mut env), 0);
    assert!(mmio.bus().fwcfg.locked());
}

#[test]
fn test_rerun_after_lock_changes_nothing() {
    let mmio = BusMmio::new(HarvosRootBus::new());
    let mut env = rom_env(&mmio, SCAPS_DMA_FW);

    assert_eq!(flow_run(&mut env), Ok(()));
    let log = mmio.bus().fwcfg.log();
    log.take();

    assert_eq!(flow_run(&mut env), Ok(()));
    assert_eq!(
        log.lines(),
        [
            "write(ROM_BYTES, 0x10000) discarded",
            "write(PBASE0, 0x30000000) discarded",
            "write(PMASK0, 0xffff0000) discarded",
            "write(PCTRL0, 0x0) discarded",
            "write(CONTROL, 0x1)",
        ]
    );
}

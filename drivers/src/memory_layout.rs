/*++
Licensed under the Apache-2.0 license.

File Name:

    memory_layout.rs

Abstract:

    The file contains the layout of memory. The constants defined
    in this file define the memory layout.

--*/

//
// Memory Addresses
//
pub const ROM_ORG: u32 = 0x00000000;
pub const RAM_ORG: u32 = 0x00010000;
pub const FWCFG_ORG: u32 = 0x1000F000;
pub const DMA_MBOX_ORG: u32 = 0x30000000;

//
// Memory Sizes In Bytes
//
pub const ROM_SIZE: u32 = 64 * 1024;
pub const RAM_SIZE: u32 = 192 * 1024;
pub const DMA_MBOX_SIZE: u32 = 64 * 1024;

/// Physical memory backing ROM and RAM; instruction space ends below this.
pub const MEMORY_SIZE: u32 = ROM_SIZE + RAM_SIZE;

#[test]
fn test_rom_ends_where_ram_starts() {
    assert_eq!(ROM_ORG + ROM_SIZE, RAM_ORG);
    assert_eq!(RAM_ORG + RAM_SIZE, MEMORY_SIZE);
}

#[test]
fn test_fwcfg_matches_register_block() {
    assert_eq!(FWCFG_ORG, harvos_registers::fwcfg::FwCfgReg::ADDR);
}

#[test]
fn test_mbox_is_outside_memory() {
    assert!(DMA_MBOX_ORG >= MEMORY_SIZE);
    assert!(FWCFG_ORG >= MEMORY_SIZE);
}

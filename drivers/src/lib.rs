/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the HarvOS driver library.

--*/

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod firewall;
mod fwcfg;
pub mod memory_layout;
pub mod printer;
mod scaps;

pub use firewall::{Firewall, FirewallConfig};
pub use fwcfg::FwCfg;
pub use harvos_error::{HarvosError, HarvosResult};
pub use printer::HexWord;
pub use scaps::{
    CapabilityBits, CsrScaps, FixedScaps, Scaps, ScapsRead, SCAPS_DMA_FW, SCAPS_DMA_FW_BIT,
    SCAPS_FENCEI, SCAPS_FENCEI_BIT, SCAPS_HARVARD, SCAPS_HARVARD_BIT, SCAPS_NX_D,
    SCAPS_NX_D_BIT, SCAPS_PAGING_ALWAYS, SCAPS_PAGING_ALWAYS_BIT, SCAPS_SV32, SCAPS_SV32_BIT,
    SCAPS_WX_ENFORCED, SCAPS_WX_ENFORCED_BIT,
};
pub use harvos_cpu::csr::CSR_SCAPS;

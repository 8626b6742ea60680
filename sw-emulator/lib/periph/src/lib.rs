/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the HarvOS Emulator Peripheral library.

--*/
mod fwcfg;
mod root_bus;

pub use fwcfg::FwCfgPeriph;
pub use root_bus::HarvosRootBus;

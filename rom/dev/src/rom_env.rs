/*++

Licensed under the Apache-2.0 license.

File Name:

    rom_env.rs

Abstract:

    File implements a context holding all the services utilized by ROM.
    Flows only see this context, so tests can hand them an emulated
    fwcfg block and a canned SCAPS value.

--*/

use harvos_drivers::{FwCfg, Scaps, ScapsRead};
use harvos_registers::fwcfg::FwCfgReg;
use ureg::{MmioMut, RealMmioMut};

cfg_if::cfg_if! {
    if #[cfg(feature = "emu")] {
        use harvos_drivers::{FixedScaps, SCAPS_DMA_FW, SCAPS_HARVARD};

        /// The emulated hart does not implement the SCAPS CSR.
        pub type PlatformScaps = FixedScaps;

        fn platform_scaps() -> PlatformScaps {
            FixedScaps(SCAPS_DMA_FW | SCAPS_HARVARD)
        }
    } else {
        use harvos_drivers::CsrScaps;

        pub type PlatformScaps = CsrScaps;

        fn platform_scaps() -> PlatformScaps {
            CsrScaps
        }
    }
}

/// Rom Context
pub struct RomEnv<TMmio: MmioMut = RealMmioMut<'static>, TRead: ScapsRead = PlatformScaps> {
    /// DMA firewall configuration block
    pub fwcfg: FwCfg<TMmio>,

    /// Capability register
    pub scaps: Scaps<TRead>,
}

impl RomEnv {
    /// Builds the context for the platform's own peripherals.
    ///
    /// # Safety
    ///
    /// Must be called at most once; the context takes ownership of the
    /// fwcfg block.
    pub unsafe fn new_from_registers() -> Self {
        Self {
            fwcfg: FwCfg::new(FwCfgReg::new()),
            scaps: Scaps::new(platform_scaps()),
        }
    }
}

impl<TMmio: MmioMut, TRead: ScapsRead> RomEnv<TMmio, TRead> {
    pub fn new(fwcfg: FwCfg<TMmio>, scaps: Scaps<TRead>) -> Self {
        Self { fwcfg, scaps }
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    scaps.rs

Abstract:

    File contains the decoder and reader for the SCAPS capability CSR.

--*/

use core::cell::Cell;
use ufmt::{uDisplay, uWrite};

pub const SCAPS_WX_ENFORCED_BIT: u32 = 0;
pub const SCAPS_NX_D_BIT: u32 = 1;
pub const SCAPS_PAGING_ALWAYS_BIT: u32 = 2;
pub const SCAPS_DMA_FW_BIT: u32 = 3;
pub const SCAPS_SV32_BIT: u32 = 4;
pub const SCAPS_HARVARD_BIT: u32 = 5;
pub const SCAPS_FENCEI_BIT: u32 = 6;

pub const SCAPS_WX_ENFORCED: u32 = 1 << SCAPS_WX_ENFORCED_BIT;
pub const SCAPS_NX_D: u32 = 1 << SCAPS_NX_D_BIT;
pub const SCAPS_PAGING_ALWAYS: u32 = 1 << SCAPS_PAGING_ALWAYS_BIT;
pub const SCAPS_DMA_FW: u32 = 1 << SCAPS_DMA_FW_BIT;
pub const SCAPS_SV32: u32 = 1 << SCAPS_SV32_BIT;
pub const SCAPS_HARVARD: u32 = 1 << SCAPS_HARVARD_BIT;
pub const SCAPS_FENCEI: u32 = 1 << SCAPS_FENCEI_BIT;

bitflags::bitflags! {
    /// Security features reported by SCAPS. Bits 7 to 31 are reserved.
    #[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
    pub struct CapabilityBits: u32 {
        // W^X is enforced by the MMU
        const WX_ENFORCED = SCAPS_WX_ENFORCED;
        // Data pages are never executable
        const NX_D = SCAPS_NX_D;
        // Translation cannot be turned off
        const PAGING_ALWAYS = SCAPS_PAGING_ALWAYS;
        // fwcfg is present
        const DMA_FW = SCAPS_DMA_FW;
        const SV32 = SCAPS_SV32;
        // Split instruction and data ports
        const HARVARD = SCAPS_HARVARD;
        const FENCEI = SCAPS_FENCEI;
    }
}

impl CapabilityBits {
    /// Decodes a raw SCAPS word, dropping the reserved bits.
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }
}

impl uDisplay for CapabilityBits {
    /// Writes the set flags as `NAME|NAME`, or `-` when none is set.
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (i, (name, _)) in self.iter_names().enumerate() {
            if i != 0 {
                f.write_char('|')?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Source of the raw SCAPS word.
pub trait ScapsRead {
    fn read_scaps(&self) -> u32;
}

/// Reads SCAPS from the CSR on the running hart.
#[derive(Default, Clone, Copy)]
pub struct CsrScaps;

impl ScapsRead for CsrScaps {
    fn read_scaps(&self) -> u32 {
        harvos_cpu::csr::read_scaps()
    }
}

/// A fixed SCAPS word, for hosts without the CSR.
#[derive(Default, Clone, Copy)]
pub struct FixedScaps(pub u32);

impl ScapsRead for FixedScaps {
    fn read_scaps(&self) -> u32 {
        self.0
    }
}

/// Capability reader.
///
/// SCAPS is constant for the life of the hart, so it is read at most once.
pub struct Scaps<TRead: ScapsRead = CsrScaps> {
    source: TRead,
    cached: Cell<Option<CapabilityBits>>,
}

impl<TRead: ScapsRead> Scaps<TRead> {
    pub fn new(source: TRead) -> Self {
        Self {
            source,
            cached: Cell::new(None),
        }
    }

    pub fn capabilities(&self) -> CapabilityBits {
        if let Some(caps) = self.cached.get() {
            return caps;
        }
        let caps = CapabilityBits::from_raw(self.source.read_scaps());
        self.cached.set(Some(caps));
        caps
    }

    pub fn wx_enforced(&self) -> bool {
        self.capabilities().contains(CapabilityBits::WX_ENFORCED)
    }

    pub fn nx_data(&self) -> bool {
        self.capabilities().contains(CapabilityBits::NX_D)
    }

    pub fn paging_always(&self) -> bool {
        self.capabilities().contains(CapabilityBits::PAGING_ALWAYS)
    }

    /// True if the fwcfg block exists and may be programmed.
    pub fn dma_firewall_present(&self) -> bool {
        self.capabilities().contains(CapabilityBits::DMA_FW)
    }

    pub fn sv32(&self) -> bool {
        self.capabilities().contains(CapabilityBits::SV32)
    }

    pub fn harvard(&self) -> bool {
        self.capabilities().contains(CapabilityBits::HARVARD)
    }

    pub fn fence_i(&self) -> bool {
        self.capabilities().contains(CapabilityBits::FENCEI)
    }
}

impl Default for Scaps {
    fn default() -> Self {
        Self::new(CsrScaps)
    }
}

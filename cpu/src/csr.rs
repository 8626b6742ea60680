// Licensed under the Apache-2.0 license

/// HarvOS security capabilities status register (SCAPS), machine read-only.
pub const CSR_SCAPS: u32 = 0x140;

/// Reads SCAPS with a single `csrr`.
#[cfg(feature = "riscv")]
#[inline(always)]
pub fn read_scaps() -> u32 {
    let val: usize;
    unsafe {
        core::arch::asm!(
            "csrr {r}, {csr}",
            r = out(reg) val,
            csr = const CSR_SCAPS,
            options(nomem, nostack)
        );
    }
    val as u32
}

// Off-target builds have no SCAPS; report that no feature is present.
#[cfg(not(feature = "riscv"))]
#[inline(always)]
pub fn read_scaps() -> u32 {
    0
}

/// Orders all prior memory-mapped stores before any later ones.
#[cfg(feature = "riscv")]
#[inline(always)]
pub fn fence() {
    unsafe {
        core::arch::asm!("fence");
    }
}

#[cfg(not(feature = "riscv"))]
#[inline(always)]
pub fn fence() {
    core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
}

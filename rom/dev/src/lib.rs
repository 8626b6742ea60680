/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the entry point of the HarvOS boot ROM security setup.

--*/
#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod flow;
mod rom_env;

pub use rom_env::{PlatformScaps, RomEnv};

use harvos_drivers::{cprintln, HarvosError, HexWord};
use ureg::MmioMut;

const BANNER: &str = "[rom] HarvOS boot ROM";

/// Runs the ROM security flows.
///
/// Returns 0 on success, otherwise the code of the error that stopped the
/// boot.
pub fn rom_main<TMmio: MmioMut, TRead: harvos_drivers::ScapsRead>(
    env: &mut RomEnv<TMmio, TRead>,
) -> u32 {
    cprintln!("{}", BANNER);
    match flow::flow_run(env) {
        Ok(()) => {
            cprintln!("[rom] Security setup complete");
            0
        }
        Err(err) => handle_fatal_error(err),
    }
}

fn handle_fatal_error(err: HarvosError) -> u32 {
    let code = u32::from(err);
    cprintln!("ROM Fatal Error: {}", HexWord(code));
    code
}

#[cfg(all(target_os = "none", not(feature = "std")))]
#[panic_handler]
#[inline(never)]
fn rom_panic(_: &core::panic::PanicInfo) -> ! {
    cprintln!("Panic!!");
    handle_fatal_error(HarvosError::ROM_GLOBAL_PANIC);
    loop {
        core::hint::spin_loop();
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains the top level dispatch of the ROM security flows.

--*/

mod firewall;

pub use firewall::{FirewallFlow, BOOT_FIREWALL_CONFIG};

use crate::rom_env::RomEnv;
use harvos_drivers::{HarvosResult, ScapsRead};
use ureg::MmioMut;

/// Execute ROM Flows
///
/// # Arguments
///
/// * `env` - ROM Environment
pub fn flow_run<TMmio: MmioMut, TRead: ScapsRead>(
    env: &mut RomEnv<TMmio, TRead>,
) -> HarvosResult<()> {
    FirewallFlow::run(env)
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains helpers for recording bus traffic in tests.

--*/
mod log;

pub use log::Log;

/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error type shared by the HarvOS drivers and ROM.

--*/
#![cfg_attr(not(any(feature = "std", test)), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// HarvOS Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HarvosError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: HarvosError = HarvosError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl HarvosError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a HarvosError from a u32 is to
    /// use `HarvosError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("HarvosError cannot be 0"),
        }
    }

    // Upper 16 bits select the component, lower 16 bits the error.
    define_error_constants![
        (
            DRIVER_FWCFG_ZERO_REGION_MASK,
            0x00020001,
            "Driver Error: fwcfg region mask of zero matches every address"
        ),
        (
            DRIVER_FWCFG_THRESHOLD_EXCEEDS_MEMORY,
            0x00020002,
            "Driver Error: fwcfg I-space threshold exceeds memory size"
        ),
        (
            ROM_FWCFG_DMA_FW_NOT_PRESENT,
            0x01000001,
            "ROM Error: DMA firewall capability not reported by SCAPS"
        ),
        (
            ROM_GLOBAL_PANIC,
            0x01000002,
            "ROM Error: panic during boot"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::HarvosError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::HarvosError(val)
    }
}

impl From<HarvosError> for core::num::NonZeroU32 {
    fn from(val: HarvosError) -> Self {
        val.0
    }
}

impl From<HarvosError> for u32 {
    fn from(val: HarvosError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for HarvosError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(HarvosError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type HarvosResult<T> = Result<T, HarvosError>;

// Licensed under the Apache-2.0 license

#![no_std]

pub mod csr;

// Licensed under the Apache-2.0 license

use std::cell::RefCell;

use crate::{Bus, BusError, RvSize};

/// An MMIO implementation that reads and writes to a `harvos_emu_bus::Bus`.
///
/// Pointers handed to the `ureg` traits are never dereferenced; their
/// numeric value is used as the bus address.
pub struct BusMmio<TBus: Bus> {
    bus: RefCell<TBus>,
}
impl<TBus: Bus> BusMmio<TBus> {
    pub fn new(bus: TBus) -> Self {
        Self {
            bus: RefCell::new(bus),
        }
    }
    pub fn bus(&self) -> std::cell::Ref<'_, TBus> {
        self.bus.borrow()
    }
    pub fn bus_mut(&self) -> std::cell::RefMut<'_, TBus> {
        self.bus.borrow_mut()
    }
    pub fn into_inner(self) -> TBus {
        self.bus.into_inner()
    }
}
impl<TBus: Bus> ureg::Mmio for BusMmio<TBus> {
    /// Loads from address `src` on the bus and returns the value.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't read from, this Mmio implementation isn't actually
    /// unsafe for POD types like u8/u16/u32.
    unsafe fn read_volatile<T: ureg::Uint>(&self, src: *const T) -> T {
        let result: Result<u32, BusError> = self
            .bus
            .borrow_mut()
            .read(RvSize::of::<T>(), src as usize as u32);
        T::from_u32(result.unwrap())
    }
}

impl<TBus: Bus> ureg::MmioMut for BusMmio<TBus> {
    /// Stores `src` to address `dst` on the bus.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't written to, this Mmio implementation isn't actually
    /// unsafe for POD types like u8/u16/u32.
    unsafe fn write_volatile<T: ureg::Uint>(&self, dst: *mut T, src: T) {
        let val = src.try_into().unwrap_or_default();
        self.bus
            .borrow_mut()
            .write(RvSize::of::<T>(), dst as usize as u32, val)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ureg::{Mmio, MmioMut};

    use super::*;
    use crate::{RvAddr, RvData};

    /// Sparse memory that remembers the width of the last store to each
    /// address and faults outside `0..limit`.
    struct ScratchBus {
        words: HashMap<RvAddr, (RvSize, RvData)>,
        limit: RvAddr,
    }
    impl ScratchBus {
        fn new(limit: RvAddr) -> Self {
            Self {
                words: HashMap::new(),
                limit,
            }
        }
    }
    impl Bus for ScratchBus {
        fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
            if addr >= self.limit {
                return Err(BusError::LoadAccessFault);
            }
            match self.words.get(&addr) {
                Some((stored, val)) if *stored == size => Ok(*val),
                _ => Ok(0),
            }
        }
        fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
            if addr >= self.limit {
                return Err(BusError::StoreAccessFault);
            }
            self.words.insert(addr, (size, val));
            Ok(())
        }
    }

    #[test]
    fn test_pointer_value_is_bus_address() {
        let mmio = BusMmio::new(ScratchBus::new(0x100));
        unsafe {
            mmio.write_volatile(0x10 as *mut u32, 0x3000_0000);
            assert_eq!(mmio.read_volatile(0x10 as *const u32), 0x3000_0000);
        }
        assert_eq!(
            mmio.bus().words.get(&0x10),
            Some(&(RvSize::Word, 0x3000_0000))
        );
    }

    #[test]
    fn test_access_width_follows_pointer_type() {
        let mmio = BusMmio::new(ScratchBus::new(0x100));
        unsafe {
            mmio.write_volatile(8 as *mut u16, 0x39af);
            mmio.write_volatile(10 as *mut u8, 0xf3);
            assert_eq!(mmio.read_volatile(8 as *const u16), 0x39af);
            assert_eq!(mmio.read_volatile(10 as *const u8), 0xf3);
            // A word read of a half-word store misses in this bus.
            assert_eq!(mmio.read_volatile(8 as *const u32), 0);
        }
        let bus = mmio.into_inner();
        assert_eq!(bus.words.get(&8), Some(&(RvSize::HalfWord, 0x39af)));
        assert_eq!(bus.words.get(&10), Some(&(RvSize::Byte, 0xf3)));
    }

    #[test]
    #[should_panic]
    fn test_store_fault_panics() {
        let mmio = BusMmio::new(ScratchBus::new(0x100));
        unsafe { mmio.write_volatile(0x100 as *mut u32, 1) };
    }

    #[test]
    #[should_panic]
    fn test_load_fault_panics() {
        let mmio = BusMmio::new(ScratchBus::new(0x100));
        unsafe { mmio.read_volatile(0x200 as *const u32) };
    }
}

pub mod aggregate;

pub use aggregate::{
    BuildAvailability, PreBuildPc, PreBuildPcDto, PrebuildPricing, SlotKey, SlotRef, SLOT_KEYS,
};

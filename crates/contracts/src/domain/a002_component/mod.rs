pub mod aggregate;

pub use aggregate::{
    Availability, AvailabilityStatus, Component, ComponentDto, ComponentPricing, Ratings,
};

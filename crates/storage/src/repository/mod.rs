pub mod conversion;
pub mod event_registration;
pub mod waitlist;

#[cfg(test)]
pub(crate) mod memory;

pub mod conversion;
pub mod rsvp;
pub mod rsvp_mapping;
pub mod waitlist;

pub mod rsvp;
pub mod waitlist;

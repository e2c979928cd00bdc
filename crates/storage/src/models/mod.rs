pub mod event_registration;
pub mod member;
pub mod payment;
pub mod rsvp;
pub mod waitlist_application;

pub use event_registration::{EventRegistration, EventRegistrationRow, RegistrationStatus};
pub use member::{Member, MemberRow, MemberType, NewMember};
pub use payment::PaymentStatus;
pub use rsvp::{EventRsvp, RsvpCounts, RsvpStatus};
pub use waitlist_application::{
    NewWaitlistApplication, WaitlistApplication, WaitlistApplicationRow, WaitlistStatus,
};
